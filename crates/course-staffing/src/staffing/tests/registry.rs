use super::common::*;
use crate::staffing::domain::{ErrorKind, StaffingError};

#[test]
fn staff_queries_partition_by_training_and_assignment() {
    let mut fx = fixture();
    fx.office.assign(fx.course, fx.ada).expect("ada assignable");
    let staff = fx.office.staff();

    let names = |list: Vec<&crate::staffing::Staff>| -> Vec<String> {
        list.into_iter().map(|s| s.name().to_string()).collect()
    };

    assert_eq!(names(staff.list()), vec!["Ada", "Grace", "Linus"]);
    assert_eq!(names(staff.untrained()), vec!["Linus"]);
    assert_eq!(names(staff.available()), vec!["Grace"]);
    assert_eq!(names(staff.assigned()), vec!["Ada"]);
}

#[test]
fn train_is_idempotent() {
    let mut fx = fixture();

    fx.office.train(fx.linus).expect("linus exists");
    fx.office.train(fx.linus).expect("training twice is fine");

    let linus = fx.office.staff_member(fx.linus).expect("linus present");
    assert!(linus.is_trained());
    assert!(fx.office.staff().untrained().is_empty());
}

#[test]
fn course_queries_follow_approval_and_fullness() {
    let mut fx = approved_fixture();
    let networks = fx.office.create_course("Networks", 1).expect("valid course");
    let seminar = fx.office.create_course("Seminar", 0).expect("valid course");

    let ids = |list: Vec<&crate::staffing::Course>| -> Vec<crate::staffing::CourseId> {
        list.into_iter().map(|c| c.id()).collect()
    };

    let courses = fx.office.courses();
    assert_eq!(ids(courses.approved()), vec![fx.course]);
    assert_eq!(ids(courses.unapproved()), vec![networks, seminar]);
    assert_eq!(ids(courses.full()), vec![fx.course, seminar]);
    assert_eq!(ids(courses.list()), vec![fx.course, networks, seminar]);
}

#[test]
fn create_course_with_negative_requirement_is_validation_error() {
    let mut fx = fixture();

    let err = fx.office.create_course("Broken", -1).unwrap_err();

    assert_eq!(err, StaffingError::RequirementOutOfRange { requested: -1 });
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(fx.office.courses().len(), 1);
}

#[test]
fn requirement_cannot_shrink_below_assigned_staff() {
    let mut fx = fixture();
    fx.office.assign(fx.course, fx.ada).expect("ada assignable");
    fx.office.assign(fx.course, fx.grace).expect("grace assignable");

    let err = fx.office.set_requirement(fx.course, 1).unwrap_err();

    assert_eq!(
        err,
        StaffingError::InvalidRequirement {
            course: fx.course,
            requested: 1,
            assigned: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        fx.office
            .course(fx.course)
            .expect("course present")
            .requirement(),
        2
    );
}

#[test]
fn set_requirement_flips_fullness() {
    let mut fx = fixture();
    fx.office.assign(fx.course, fx.ada).expect("ada assignable");

    let change = fx.office.set_requirement(fx.course, 1).expect("shrink to assigned");
    assert!(!change.approval_revoked);
    assert!(fx.office.course(fx.course).expect("course present").is_full());

    fx.office.set_requirement(fx.course, 4).expect("grow");
    let course = fx.office.course(fx.course).expect("course present");
    assert!(!course.is_full());
    assert_eq!(course.open_positions(), 3);
}

#[test]
fn set_requirement_rejects_negative_values() {
    let mut fx = fixture();
    assert_eq!(
        fx.office.set_requirement(fx.course, -5),
        Err(StaffingError::RequirementOutOfRange { requested: -5 })
    );
}
