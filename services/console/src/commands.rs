use crate::infra::{load_office, open_store};
use crate::render::render_report;
use clap::Args;
use course_staffing::config::AppConfig;
use course_staffing::error::AppError;
use course_staffing::staffing::roster::{export_roster_to_path, import_staff_from_path};
use course_staffing::staffing::StaffingReport;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportStaffArgs {
    /// CSV file to read staff members from
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ExportRosterArgs {
    /// Destination CSV file
    #[arg(long)]
    pub(crate) output: PathBuf,
}

pub(crate) fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let office = load_office(&open_store(config))?;
    let report = StaffingReport::from_office(&office);

    if args.json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        println!("{body}");
        return Ok(());
    }

    let stdout = io::stdout();
    render_report(&report, &mut stdout.lock())?;
    Ok(())
}

pub(crate) fn run_import_staff(config: &AppConfig, args: ImportStaffArgs) -> Result<(), AppError> {
    let store = open_store(config);
    let mut office = load_office(&store)?;

    let created = import_staff_from_path(&mut office, &args.csv)?;
    office.save_to(&store)?;

    println!(
        "Imported {} staff members from {}",
        created.len(),
        args.csv.display()
    );
    Ok(())
}

pub(crate) fn run_export_roster(config: &AppConfig, args: ExportRosterArgs) -> Result<(), AppError> {
    let office = load_office(&open_store(config))?;
    let rows = export_roster_to_path(&office, &args.output)?;
    println!("Wrote {rows} roster rows to {}", args.output.display());
    Ok(())
}
