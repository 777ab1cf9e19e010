use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a staff member, allocated sequentially by the staff registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub u64);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{:04}", self.0)
    }
}

/// Identifier for a course, allocated sequentially by the course registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{:04}", self.0)
    }
}

/// A person who can be trained and then assigned to at most one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub(crate) id: StaffId,
    pub(crate) name: String,
    pub(crate) trained: bool,
    #[serde(default)]
    pub(crate) assigned_course: Option<CourseId>,
}

impl Staff {
    pub(crate) fn new(id: StaffId, name: String) -> Self {
        Self {
            id,
            name,
            trained: false,
            assigned_course: None,
        }
    }

    pub fn id(&self) -> StaffId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn assigned_course(&self) -> Option<CourseId> {
        self.assigned_course
    }

    /// Trained and not committed to any course.
    pub fn is_available(&self) -> bool {
        self.trained && self.assigned_course.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    #[default]
    Unapproved,
    Approved,
}

impl ApprovalState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unapproved => "Unapproved",
            Self::Approved => "Approved",
        }
    }
}

/// A teaching unit with a fixed staffing requirement.
///
/// The assigned staff list never grows past `requirement`, and a course is only
/// ever `Approved` while it is full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub(crate) id: CourseId,
    pub(crate) name: String,
    pub(crate) requirement: u32,
    #[serde(default)]
    pub(crate) staff: Vec<StaffId>,
    #[serde(default)]
    pub(crate) approval: ApprovalState,
}

impl Course {
    pub(crate) fn new(id: CourseId, name: String, requirement: u32) -> Self {
        Self {
            id,
            name,
            requirement,
            staff: Vec::new(),
            approval: ApprovalState::Unapproved,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> u32 {
        self.requirement
    }

    pub fn assigned_count(&self) -> u32 {
        // bounded by `requirement`, which is itself a u32
        self.staff.len() as u32
    }

    /// Assigned staff in the order they were assigned.
    pub fn staff(&self) -> &[StaffId] {
        &self.staff
    }

    pub fn is_full(&self) -> bool {
        self.assigned_count() == self.requirement
    }

    pub fn approval(&self) -> ApprovalState {
        self.approval
    }

    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }

    pub fn open_positions(&self) -> u32 {
        self.requirement - self.assigned_count()
    }

    pub fn status_label(&self) -> &'static str {
        match (self.approval, self.is_full()) {
            (ApprovalState::Approved, _) => "Approved",
            (ApprovalState::Unapproved, true) => "Full",
            (ApprovalState::Unapproved, false) => "Open",
        }
    }
}

/// Coarse grouping of [`StaffingError`] so callers can decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Capacity,
    State,
    NotFound,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Capacity => "capacity",
            Self::State => "state",
            Self::NotFound => "not found",
        }
    }
}

/// Why a staff member cannot take on an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    Untrained,
    AlreadyAssigned(CourseId),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Untrained => write!(f, "has not been trained"),
            UnavailableReason::AlreadyAssigned(course) => {
                write!(f, "is already assigned to {course}")
            }
        }
    }
}

/// Recoverable failure raised by registry, assignment and approval operations.
///
/// No operation mutates state before returning one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("requirement must be a whole number between 0 and 4294967295, got {requested}")]
    RequirementOutOfRange { requested: i64 },
    #[error("{course} already has {assigned} staff assigned, cannot lower requirement to {requested}")]
    InvalidRequirement {
        course: CourseId,
        requested: u32,
        assigned: u32,
    },
    #[error("{course} is full ({requirement} of {requirement} staff assigned)")]
    CourseFull { course: CourseId, requirement: u32 },
    #[error("{staff} {reason}")]
    StaffUnavailable {
        staff: StaffId,
        reason: UnavailableReason,
    },
    #[error("{staff} is not assigned to {course}")]
    NotAssigned { course: CourseId, staff: StaffId },
    #[error("{course} has {assigned} of {required} required staff, cannot approve")]
    RequirementsNotMet {
        course: CourseId,
        assigned: u32,
        required: u32,
    },
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error("staff member {0} not found")]
    StaffNotFound(StaffId),
}

impl StaffingError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RequirementOutOfRange { .. } | Self::InvalidRequirement { .. } => {
                ErrorKind::Validation
            }
            Self::CourseFull { .. } => ErrorKind::Capacity,
            Self::StaffUnavailable { .. }
            | Self::NotAssigned { .. }
            | Self::RequirementsNotMet { .. } => ErrorKind::State,
            Self::CourseNotFound(_) | Self::StaffNotFound(_) => ErrorKind::NotFound,
        }
    }
}

pub(crate) fn validate_requirement(requested: i64) -> Result<u32, StaffingError> {
    u32::try_from(requested).map_err(|_| StaffingError::RequirementOutOfRange { requested })
}
