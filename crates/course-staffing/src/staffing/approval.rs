use super::courses::CourseRegistry;
use super::domain::{ApprovalState, Course, CourseId, StaffingError};

/// Approval state machine over the courses in a registry.
///
/// `Unapproved -> Approved` requires the course to be full. `Approved -> Unapproved`
/// is always allowed, and is forced whenever a course stops being full.
pub struct ApprovalWorkflow<'a> {
    courses: &'a mut CourseRegistry,
}

impl<'a> ApprovalWorkflow<'a> {
    pub fn new(courses: &'a mut CourseRegistry) -> Self {
        Self { courses }
    }

    /// Approves a full course. Approving an already approved course changes nothing.
    pub fn approve(&mut self, id: CourseId) -> Result<ApprovalState, StaffingError> {
        let course = self
            .courses
            .get_mut(id)
            .ok_or(StaffingError::CourseNotFound(id))?;

        if !course.is_full() {
            return Err(StaffingError::RequirementsNotMet {
                course: id,
                assigned: course.assigned_count(),
                required: course.requirement,
            });
        }

        course.approval = ApprovalState::Approved;
        Ok(course.approval)
    }

    /// Withdraws approval. Returns whether the course was approved beforehand.
    pub fn revoke(&mut self, id: CourseId) -> Result<bool, StaffingError> {
        let course = self
            .courses
            .get_mut(id)
            .ok_or(StaffingError::CourseNotFound(id))?;

        let was_approved = course.is_approved();
        course.approval = ApprovalState::Unapproved;
        Ok(was_approved)
    }

    /// Authority toggle: `true` approves (subject to fullness), `false` revokes.
    pub fn set_approval(
        &mut self,
        id: CourseId,
        approved: bool,
    ) -> Result<ApprovalState, StaffingError> {
        if approved {
            self.approve(id)
        } else {
            self.revoke(id).map(|_| ApprovalState::Unapproved)
        }
    }
}

/// Restores the approved-implies-full invariant after a course's staffing changed.
///
/// Returns `true` when approval had to be withdrawn.
pub(crate) fn revoke_if_understaffed(course: &mut Course) -> bool {
    if course.is_approved() && !course.is_full() {
        course.approval = ApprovalState::Unapproved;
        true
    } else {
        false
    }
}
