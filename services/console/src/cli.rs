use crate::commands::{
    run_export_roster, run_import_staff, run_report, ExportRosterArgs, ImportStaffArgs, ReportArgs,
};
use crate::infra::run_session;
use clap::{Parser, Subcommand};
use course_staffing::config::AppConfig;
use course_staffing::error::AppError;
use course_staffing::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "course-staffing",
    about = "Track courses, staff, teaching requirement assignments and approvals",
    version
)]
struct Cli {
    /// Override the configured state file
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Do not save state when the interactive session ends
    #[arg(long, global = true)]
    no_autosave: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive role menu (default command)
    Session,
    /// Print a staffing summary of every course and staff member
    Report(ReportArgs),
    /// Create staff members from a CSV file with `name` and optional `trained` columns
    ImportStaff(ImportStaffArgs),
    /// Write course rosters to a CSV file
    ExportRoster(ExportRosterArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.state {
        config.storage.state_path = path;
    }
    if cli.no_autosave {
        config.storage.autosave = false;
    }

    telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => run_session(&config),
        Command::Report(args) => run_report(&config, args),
        Command::ImportStaff(args) => run_import_staff(&config, args),
        Command::ExportRoster(args) => run_export_roster(&config, args),
    }
}
