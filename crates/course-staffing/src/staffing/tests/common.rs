use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::staffing::domain::{CourseId, StaffId};
use crate::staffing::office::StaffingOffice;
use crate::staffing::store::{Snapshot, StateStore, StoreError};

/// Office with one course needing two staff and three staff members, of which the
/// first two are trained.
pub(super) struct Fixture {
    pub(super) office: StaffingOffice,
    pub(super) course: CourseId,
    pub(super) ada: StaffId,
    pub(super) grace: StaffId,
    pub(super) linus: StaffId,
}

pub(super) fn fixture() -> Fixture {
    let mut office = StaffingOffice::new();
    let course = office
        .create_course("Operating Systems", 2)
        .expect("valid course");
    let ada = office.create_staff("Ada");
    let grace = office.create_staff("Grace");
    let linus = office.create_staff("Linus");
    office.train(ada).expect("ada exists");
    office.train(grace).expect("grace exists");

    Fixture {
        office,
        course,
        ada,
        grace,
        linus,
    }
}

/// Fixture with both trained staff assigned and the course approved.
pub(super) fn approved_fixture() -> Fixture {
    let mut fixture = fixture();
    fixture
        .office
        .assign(fixture.course, fixture.ada)
        .expect("ada assignable");
    fixture
        .office
        .assign(fixture.course, fixture.grace)
        .expect("grace assignable");
    fixture
        .office
        .approve(fixture.course)
        .expect("full course approvable");
    fixture
}

/// Asserts the capacity and back-reference invariants hold across the whole office.
pub(super) fn assert_consistent(office: &StaffingOffice) {
    office
        .snapshot()
        .validate()
        .expect("office state satisfies all invariants");
}

#[derive(Default)]
pub(super) struct MemoryStore {
    saved: RefCell<Option<Snapshot>>,
}

impl MemoryStore {
    pub(super) fn saved(&self) -> Option<Snapshot> {
        self.saved.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}

pub(super) fn scratch_path(label: &str) -> PathBuf {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let id = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "course-staffing-{label}-{}-{id}.json",
        std::process::id()
    ))
}
