use super::approval::revoke_if_understaffed;
use super::courses::CourseRegistry;
use super::domain::{CourseId, Staff, StaffId, StaffingError, UnavailableReason};
use super::staff::StaffRegistry;

/// Maintains the course/staff relation across both registries.
///
/// The relation is stored twice as plain ids: the course keeps its staff list and each
/// staff member keeps the course it is assigned to. Every operation validates first
/// and only then touches both sides, so a failed call leaves both registries unchanged.
pub struct AssignmentEngine<'a> {
    courses: &'a mut CourseRegistry,
    staff: &'a mut StaffRegistry,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(courses: &'a mut CourseRegistry, staff: &'a mut StaffRegistry) -> Self {
        Self { courses, staff }
    }

    pub fn assign(&mut self, course_id: CourseId, staff_id: StaffId) -> Result<(), StaffingError> {
        let course = self
            .courses
            .get(course_id)
            .ok_or(StaffingError::CourseNotFound(course_id))?;
        let member = self
            .staff
            .get(staff_id)
            .ok_or(StaffingError::StaffNotFound(staff_id))?;

        if course.is_full() {
            return Err(StaffingError::CourseFull {
                course: course_id,
                requirement: course.requirement,
            });
        }
        if !member.trained {
            return Err(StaffingError::StaffUnavailable {
                staff: staff_id,
                reason: UnavailableReason::Untrained,
            });
        }
        if let Some(current) = member.assigned_course {
            return Err(StaffingError::StaffUnavailable {
                staff: staff_id,
                reason: UnavailableReason::AlreadyAssigned(current),
            });
        }

        if let Some(course) = self.courses.get_mut(course_id) {
            course.staff.push(staff_id);
        }
        if let Some(member) = self.staff.get_mut(staff_id) {
            member.assigned_course = Some(course_id);
        }
        Ok(())
    }

    /// Removes a staff member from a course.
    ///
    /// Returns `true` when the course was approved and lost its approval because it is
    /// no longer full.
    pub fn unassign(&mut self, course_id: CourseId, staff_id: StaffId) -> Result<bool, StaffingError> {
        if self.courses.get(course_id).is_none() {
            return Err(StaffingError::CourseNotFound(course_id));
        }
        let member = self
            .staff
            .get(staff_id)
            .ok_or(StaffingError::StaffNotFound(staff_id))?;
        if member.assigned_course != Some(course_id) {
            return Err(StaffingError::NotAssigned {
                course: course_id,
                staff: staff_id,
            });
        }

        let mut approval_revoked = false;
        if let Some(course) = self.courses.get_mut(course_id) {
            course.staff.retain(|id| *id != staff_id);
            approval_revoked = revoke_if_understaffed(course);
        }
        if let Some(member) = self.staff.get_mut(staff_id) {
            member.assigned_course = None;
        }
        Ok(approval_revoked)
    }

    /// Staff assigned to a course, in assignment order.
    pub fn staff_of(&self, course_id: CourseId) -> Result<Vec<&Staff>, StaffingError> {
        staff_of(&*self.courses, &*self.staff, course_id)
    }
}

pub(crate) fn staff_of<'r>(
    courses: &'r CourseRegistry,
    staff: &'r StaffRegistry,
    course_id: CourseId,
) -> Result<Vec<&'r Staff>, StaffingError> {
    let course = courses
        .get(course_id)
        .ok_or(StaffingError::CourseNotFound(course_id))?;
    Ok(course.staff.iter().filter_map(|id| staff.get(*id)).collect())
}
