use super::common::*;
use crate::staffing::domain::{ApprovalState, StaffId};
use crate::staffing::office::StaffingOffice;
use crate::staffing::store::{JsonFileStore, StateStore, StoreError, SNAPSHOT_VERSION};

#[test]
fn snapshot_round_trips_ids_and_relations() {
    let fx = approved_fixture();
    let store = MemoryStore::default();

    fx.office.save_to(&store).expect("memory save");
    let restored = StaffingOffice::load_from(&store).expect("memory load");

    let saved = store.saved().expect("snapshot stored");
    assert_eq!(saved.version, SNAPSHOT_VERSION);
    let reloaded = restored.snapshot();
    assert_eq!(reloaded.staff, saved.staff);
    assert_eq!(reloaded.courses, saved.courses);
    assert_eq!(
        restored
            .course(fx.course)
            .expect("course restored")
            .approval(),
        ApprovalState::Approved
    );
    assert_eq!(
        restored
            .staff_member(fx.grace)
            .expect("grace restored")
            .assigned_course(),
        Some(fx.course)
    );
}

#[test]
fn restored_office_continues_id_sequences() {
    let fx = fixture();
    let mut restored = StaffingOffice::restore(fx.office.snapshot()).expect("valid snapshot");

    let next = restored.create_staff("Barbara");
    let course = restored.create_course("Networks", 1).expect("valid course");

    assert_eq!(next, StaffId(fx.linus.0 + 1));
    assert_eq!(course.0, fx.course.0 + 1);
}

#[test]
fn empty_store_yields_empty_office() {
    let store = MemoryStore::default();
    let office = StaffingOffice::load_from(&store).expect("empty load");
    assert!(office.staff().is_empty());
    assert!(office.courses().is_empty());
}

#[test]
fn restore_rejects_dangling_back_reference() {
    let fx = approved_fixture();
    let mut snapshot = fx.office.snapshot();
    snapshot.courses[0].staff.retain(|id| *id != fx.ada);
    snapshot.courses[0].approval = ApprovalState::Unapproved;

    match StaffingOffice::restore(snapshot) {
        Err(StoreError::Inconsistent(detail)) => assert!(detail.contains("does not list it")),
        other => panic!("expected inconsistent state, got {other:?}"),
    }
}

#[test]
fn restore_rejects_approved_understaffed_course() {
    let fx = fixture();
    let mut snapshot = fx.office.snapshot();
    snapshot.courses[0].approval = ApprovalState::Approved;

    match StaffingOffice::restore(snapshot) {
        Err(StoreError::Inconsistent(detail)) => assert!(detail.contains("approved but not full")),
        other => panic!("expected inconsistent state, got {other:?}"),
    }
}

#[test]
fn restore_rejects_untrained_assignment() {
    let fx = approved_fixture();
    let mut snapshot = fx.office.snapshot();
    let ada = snapshot
        .staff
        .iter_mut()
        .find(|staff| staff.id == fx.ada)
        .expect("ada in snapshot");
    ada.trained = false;

    assert!(matches!(
        StaffingOffice::restore(snapshot),
        Err(StoreError::Inconsistent(_))
    ));
}

#[test]
fn restore_rejects_unknown_version() {
    let fx = fixture();
    let mut snapshot = fx.office.snapshot();
    snapshot.version = SNAPSHOT_VERSION + 1;

    assert!(matches!(
        StaffingOffice::restore(snapshot),
        Err(StoreError::UnsupportedVersion { .. })
    ));
}

#[test]
fn json_file_store_round_trips_through_disk() {
    let path = scratch_path("store");
    let store = JsonFileStore::new(&path);
    assert!(store.load().expect("missing file is fine").is_none());

    let fx = approved_fixture();
    fx.office.save_to(&store).expect("writes state file");
    let loaded = StaffingOffice::load_from(&store).expect("reads state file");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.snapshot().courses, fx.office.snapshot().courses);
    assert_eq!(loaded.snapshot().staff, fx.office.snapshot().staff);
}

#[test]
fn json_file_store_reports_corrupt_file() {
    let path = scratch_path("corrupt");
    std::fs::write(&path, b"{ not json").expect("write scratch file");
    let result = JsonFileStore::new(&path).load();
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(StoreError::Json(_))));
}
