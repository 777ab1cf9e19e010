use serde::Serialize;

use super::domain::{ApprovalState, CourseId};
use super::office::StaffingOffice;

#[derive(Debug, Clone, Serialize)]
pub struct CourseStaffingView {
    pub course_id: CourseId,
    pub course_label: String,
    pub name: String,
    pub assigned: u32,
    pub requirement: u32,
    pub approval: ApprovalState,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseCounts {
    pub total: usize,
    pub approved: usize,
    pub full: usize,
    pub understaffed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffCounts {
    pub total: usize,
    pub trained: usize,
    pub untrained: usize,
    pub assigned: usize,
    pub available: usize,
}

/// Read-only overview of the office for display and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingReport {
    pub courses: CourseCounts,
    pub staff: StaffCounts,
    pub course_views: Vec<CourseStaffingView>,
}

impl StaffingReport {
    pub fn from_office(office: &StaffingOffice) -> Self {
        let courses = office.courses();
        let staff = office.staff();

        let course_counts = CourseCounts {
            total: courses.len(),
            approved: courses.approved().len(),
            full: courses.full().len(),
            understaffed: courses.len() - courses.full().len(),
        };

        let staff_counts = StaffCounts {
            total: staff.len(),
            trained: staff.len() - staff.untrained().len(),
            untrained: staff.untrained().len(),
            assigned: staff.assigned().len(),
            available: staff.available().len(),
        };

        let course_views = courses
            .list()
            .into_iter()
            .map(|course| CourseStaffingView {
                course_id: course.id(),
                course_label: course.id().to_string(),
                name: course.name().to_string(),
                assigned: course.assigned_count(),
                requirement: course.requirement(),
                approval: course.approval(),
                status_label: course.status_label(),
            })
            .collect();

        Self {
            courses: course_counts,
            staff: staff_counts,
            course_views,
        }
    }

    /// Courses that still need staff before they can be approved.
    pub fn open_courses(&self) -> impl Iterator<Item = &CourseStaffingView> {
        self.course_views
            .iter()
            .filter(|view| view.assigned < view.requirement)
    }
}
