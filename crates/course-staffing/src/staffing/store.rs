use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Course, Staff, StaffId};

/// Version written into every snapshot; bumped when the layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Flat, serializable image of both registries including the assignment relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub staff: Vec<Staff>,
    pub courses: Vec<Course>,
}

impl Snapshot {
    pub(crate) fn new(staff: Vec<Staff>, courses: Vec<Course>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            staff,
            courses,
        }
    }

    /// Checks every invariant the registries rely on, so a hand-edited or truncated
    /// state file is rejected instead of loaded half-consistent.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut staff_by_id: HashMap<StaffId, &Staff> = HashMap::new();
        for member in &self.staff {
            if staff_by_id.insert(member.id, member).is_some() {
                return Err(inconsistent(format!("duplicate staff id {}", member.id)));
            }
        }

        let mut course_ids = HashSet::new();
        let mut linked = HashSet::new();
        for course in &self.courses {
            if !course_ids.insert(course.id) {
                return Err(inconsistent(format!("duplicate course id {}", course.id)));
            }
            if course.staff.len() > course.requirement as usize {
                return Err(inconsistent(format!(
                    "{} has {} staff but requires {}",
                    course.id,
                    course.staff.len(),
                    course.requirement
                )));
            }
            if course.is_approved() && !course.is_full() {
                return Err(inconsistent(format!(
                    "{} is approved but not full",
                    course.id
                )));
            }
            for staff_id in &course.staff {
                let member = staff_by_id.get(staff_id).ok_or_else(|| {
                    inconsistent(format!("{} lists unknown staff {}", course.id, staff_id))
                })?;
                if member.assigned_course != Some(course.id) {
                    return Err(inconsistent(format!(
                        "{} lists {} but the staff record points elsewhere",
                        course.id, staff_id
                    )));
                }
                if !member.trained {
                    return Err(inconsistent(format!(
                        "{} is assigned to {} without training",
                        staff_id, course.id
                    )));
                }
                if !linked.insert(*staff_id) {
                    return Err(inconsistent(format!(
                        "{} appears more than once in {}",
                        staff_id, course.id
                    )));
                }
            }
        }

        for member in &self.staff {
            if member.assigned_course.is_some() && !linked.contains(&member.id) {
                return Err(inconsistent(format!(
                    "{} points at a course that does not list it",
                    member.id
                )));
            }
        }

        Ok(())
    }
}

fn inconsistent(detail: String) -> StoreError {
    StoreError::Inconsistent(detail)
}

/// Save/load boundary for office state.
pub trait StateStore {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state file io failed: {0}")]
    Io(#[from] io::Error),
    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported state format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("inconsistent state: {0}")]
    Inconsistent(String),
}

/// Stores snapshots as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved state found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        snapshot.validate()?;
        debug!(
            path = %self.path.display(),
            staff = snapshot.staff.len(),
            courses = snapshot.courses.len(),
            "loaded saved state"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staging = self.staging_path();
        let payload = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), "saved state");
        Ok(())
    }
}
