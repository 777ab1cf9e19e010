mod cli;
mod commands;
mod infra;
mod render;
mod session;

use course_staffing::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
