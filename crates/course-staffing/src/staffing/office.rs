use tracing::{info, warn};

use super::approval::ApprovalWorkflow;
use super::assignment::{self, AssignmentEngine};
use super::courses::{CourseRegistry, RequirementChange};
use super::domain::{ApprovalState, Course, CourseId, Staff, StaffId, StaffingError};
use super::staff::StaffRegistry;
use super::store::{Snapshot, StateStore, StoreError};

/// Facade owning both registries and exposing every staffing operation by id.
///
/// Mutations are logged; rejected mutations are logged at `warn` and returned to the
/// caller untouched so an interactive front end can re-prompt.
#[derive(Debug, Default, Clone)]
pub struct StaffingOffice {
    staff: StaffRegistry,
    courses: CourseRegistry,
}

impl StaffingOffice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an office from a snapshot after checking its invariants.
    pub fn restore(snapshot: Snapshot) -> Result<Self, StoreError> {
        snapshot.validate()?;
        let Snapshot { staff, courses, .. } = snapshot;
        Ok(Self {
            staff: StaffRegistry::from_members(staff),
            courses: CourseRegistry::from_courses(courses),
        })
    }

    /// Loads the office from a store, starting empty when nothing was saved.
    pub fn load_from<S: StateStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        match store.load()? {
            Some(snapshot) => Self::restore(snapshot),
            None => Ok(Self::new()),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.staff.members().to_vec(),
            self.courses.courses().to_vec(),
        )
    }

    pub fn save_to<S: StateStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        let snapshot = self.snapshot();
        store.save(&snapshot)?;
        info!(
            staff = snapshot.staff.len(),
            courses = snapshot.courses.len(),
            "staffing state saved"
        );
        Ok(())
    }

    pub fn staff(&self) -> &StaffRegistry {
        &self.staff
    }

    pub fn courses(&self) -> &CourseRegistry {
        &self.courses
    }

    pub fn course(&self, id: CourseId) -> Result<&Course, StaffingError> {
        self.courses.get(id).ok_or(StaffingError::CourseNotFound(id))
    }

    pub fn staff_member(&self, id: StaffId) -> Result<&Staff, StaffingError> {
        self.staff.get(id).ok_or(StaffingError::StaffNotFound(id))
    }

    pub fn assignments(&mut self) -> AssignmentEngine<'_> {
        AssignmentEngine::new(&mut self.courses, &mut self.staff)
    }

    pub fn approvals(&mut self) -> ApprovalWorkflow<'_> {
        ApprovalWorkflow::new(&mut self.courses)
    }

    pub fn create_staff(&mut self, name: impl Into<String>) -> StaffId {
        let staff = self.staff.create(name);
        info!(staff = %staff.id(), name = staff.name(), "staff member created");
        staff.id()
    }

    pub fn train(&mut self, id: StaffId) -> Result<(), StaffingError> {
        match self.staff.train(id) {
            Ok(true) => {
                info!(staff = %id, "staff member trained");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => Err(rejected("train", err)),
        }
    }

    pub fn create_course(
        &mut self,
        name: impl Into<String>,
        requirement: i64,
    ) -> Result<CourseId, StaffingError> {
        let course = self
            .courses
            .create(name, requirement)
            .map_err(|err| rejected("create_course", err))?;
        info!(
            course = %course.id(),
            name = course.name(),
            requirement = course.requirement(),
            "course created"
        );
        Ok(course.id())
    }

    pub fn set_requirement(
        &mut self,
        id: CourseId,
        requirement: i64,
    ) -> Result<RequirementChange, StaffingError> {
        let change = self
            .courses
            .set_requirement(id, requirement)
            .map_err(|err| rejected("set_requirement", err))?;
        info!(
            course = %id,
            previous = change.previous,
            current = change.current,
            "course requirement updated"
        );
        if change.approval_revoked {
            info!(course = %id, "approval revoked, course no longer full");
        }
        Ok(change)
    }

    pub fn assign(&mut self, course: CourseId, staff: StaffId) -> Result<(), StaffingError> {
        self.assignments()
            .assign(course, staff)
            .map_err(|err| rejected("assign", err))?;
        info!(course = %course, staff = %staff, "staff assigned");
        Ok(())
    }

    /// Returns `true` when the course lost its approval as a result.
    pub fn unassign(&mut self, course: CourseId, staff: StaffId) -> Result<bool, StaffingError> {
        let revoked = self
            .assignments()
            .unassign(course, staff)
            .map_err(|err| rejected("unassign", err))?;
        info!(course = %course, staff = %staff, "staff unassigned");
        if revoked {
            info!(course = %course, "approval revoked, course no longer full");
        }
        Ok(revoked)
    }

    pub fn staff_of(&self, course: CourseId) -> Result<Vec<&Staff>, StaffingError> {
        assignment::staff_of(&self.courses, &self.staff, course)
    }

    pub fn approve(&mut self, course: CourseId) -> Result<(), StaffingError> {
        self.approvals()
            .approve(course)
            .map_err(|err| rejected("approve", err))?;
        info!(course = %course, "course approved");
        Ok(())
    }

    /// Returns whether the course was approved beforehand.
    pub fn revoke(&mut self, course: CourseId) -> Result<bool, StaffingError> {
        let was_approved = self
            .approvals()
            .revoke(course)
            .map_err(|err| rejected("revoke", err))?;
        if was_approved {
            info!(course = %course, "course approval revoked");
        }
        Ok(was_approved)
    }

    pub fn set_approval(
        &mut self,
        course: CourseId,
        approved: bool,
    ) -> Result<ApprovalState, StaffingError> {
        if approved {
            self.approve(course)?;
            Ok(ApprovalState::Approved)
        } else {
            self.revoke(course)?;
            Ok(ApprovalState::Unapproved)
        }
    }
}

fn rejected(operation: &'static str, err: StaffingError) -> StaffingError {
    warn!(operation, kind = err.kind().label(), error = %err, "staffing operation rejected");
    err
}
