use super::approval::revoke_if_understaffed;
use super::domain::{validate_requirement, ApprovalState, Course, CourseId, StaffingError};

/// Owns every course record, in creation order.
#[derive(Debug, Default, Clone)]
pub struct CourseRegistry {
    courses: Vec<Course>,
    last_id: u64,
}

/// Result of changing a course's staffing requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementChange {
    pub previous: u32,
    pub current: u32,
    pub approval_revoked: bool,
}

impl CourseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_courses(courses: Vec<Course>) -> Self {
        let last_id = courses.iter().map(|course| course.id.0).max().unwrap_or(0);
        Self { courses, last_id }
    }

    /// Registers a new, unapproved course with no staff.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        requirement: i64,
    ) -> Result<&Course, StaffingError> {
        let requirement = validate_requirement(requirement)?;
        self.last_id += 1;
        let index = self.courses.len();
        self.courses
            .push(Course::new(CourseId(self.last_id), name.into(), requirement));
        Ok(&self.courses[index])
    }

    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: CourseId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn list(&self) -> Vec<&Course> {
        self.courses.iter().collect()
    }

    pub fn unapproved(&self) -> Vec<&Course> {
        self.with_approval(ApprovalState::Unapproved)
    }

    pub fn approved(&self) -> Vec<&Course> {
        self.with_approval(ApprovalState::Approved)
    }

    pub fn full(&self) -> Vec<&Course> {
        self.courses.iter().filter(|course| course.is_full()).collect()
    }

    fn with_approval(&self, state: ApprovalState) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| course.approval == state)
            .collect()
    }

    /// Changes how many staff a course needs.
    ///
    /// The requirement can never drop below the staff already committed. Raising the
    /// requirement of an approved course leaves it understaffed, so its approval is
    /// withdrawn.
    pub fn set_requirement(
        &mut self,
        id: CourseId,
        requirement: i64,
    ) -> Result<RequirementChange, StaffingError> {
        let requested = validate_requirement(requirement)?;
        let course = self.get_mut(id).ok_or(StaffingError::CourseNotFound(id))?;

        let assigned = course.assigned_count();
        if requested < assigned {
            return Err(StaffingError::InvalidRequirement {
                course: id,
                requested,
                assigned,
            });
        }

        let previous = course.requirement;
        course.requirement = requested;
        let approval_revoked = revoke_if_understaffed(course);

        Ok(RequirementChange {
            previous,
            current: requested,
            approval_revoked,
        })
    }

    pub(crate) fn courses(&self) -> &[Course] {
        &self.courses
    }
}
