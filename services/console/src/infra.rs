use crate::session::Session;
use course_staffing::config::AppConfig;
use course_staffing::error::AppError;
use course_staffing::staffing::{JsonFileStore, StaffingOffice};
use std::io;
use tracing::info;

pub(crate) fn open_store(config: &AppConfig) -> JsonFileStore {
    JsonFileStore::new(config.storage.state_path.clone())
}

pub(crate) fn load_office(store: &JsonFileStore) -> Result<StaffingOffice, AppError> {
    let office = StaffingOffice::load_from(store)?;
    info!(
        path = %store.path().display(),
        staff = office.staff().len(),
        courses = office.courses().len(),
        "staffing state ready"
    );
    Ok(office)
}

pub(crate) fn run_session(config: &AppConfig) -> Result<(), AppError> {
    let store = open_store(config);
    let mut office = load_office(&store)?;

    {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(&mut office, stdin.lock(), stdout.lock()).run()?;
    }

    if config.storage.autosave {
        office.save_to(&store)?;
        println!("Saved to {}", store.path().display());
    } else {
        info!(environment = ?config.environment, "autosave disabled, session changes discarded");
    }
    Ok(())
}
