//! Course, staff and assignment records with the course approval workflow.
//!
//! Each registry owns its own records. The assignment relation lives on both sides as
//! ids, and every mutation goes through [`AssignmentEngine`] or [`ApprovalWorkflow`]
//! so that a course never holds more staff than it requires and is never approved
//! while understaffed. [`StaffingOffice`] bundles the registries for callers that just
//! want to issue operations by id.

mod approval;
mod assignment;
mod courses;
pub mod domain;
mod office;
pub mod report;
pub mod roster;
mod staff;
pub mod store;

#[cfg(test)]
mod tests;

pub use approval::ApprovalWorkflow;
pub use assignment::AssignmentEngine;
pub use courses::{CourseRegistry, RequirementChange};
pub use domain::{
    ApprovalState, Course, CourseId, ErrorKind, Staff, StaffId, StaffingError, UnavailableReason,
};
pub use office::StaffingOffice;
pub use report::{CourseStaffingView, StaffingReport};
pub use roster::{export_roster, import_staff, RosterError};
pub use staff::StaffRegistry;
pub use store::{JsonFileStore, Snapshot, StateStore, StoreError, SNAPSHOT_VERSION};
