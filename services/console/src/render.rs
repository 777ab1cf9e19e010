use course_staffing::staffing::{Course, Staff, StaffingReport};
use std::io::{self, Write};

pub(crate) fn course_line(course: &Course) -> String {
    format!(
        "{} {} ({}/{} staff, {})",
        course.id(),
        course.name(),
        course.assigned_count(),
        course.requirement(),
        course.status_label()
    )
}

pub(crate) fn staff_line(staff: &Staff) -> String {
    let training = if staff.is_trained() {
        "trained"
    } else {
        "untrained"
    };
    match staff.assigned_course() {
        Some(course) => format!(
            "{} {} ({training}, assigned to {course})",
            staff.id(),
            staff.name()
        ),
        None => format!("{} {} ({training}, unassigned)", staff.id(), staff.name()),
    }
}

pub(crate) fn render_report<W: Write>(report: &StaffingReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Staffing report")?;
    writeln!(
        out,
        "Courses: {} total, {} approved, {} full, {} understaffed",
        report.courses.total, report.courses.approved, report.courses.full, report.courses.understaffed
    )?;
    writeln!(
        out,
        "Staff: {} total, {} trained, {} untrained, {} assigned, {} available",
        report.staff.total,
        report.staff.trained,
        report.staff.untrained,
        report.staff.assigned,
        report.staff.available
    )?;

    if report.course_views.is_empty() {
        writeln!(out, "\nCourses: none")?;
        return Ok(());
    }

    writeln!(out, "\nCourses")?;
    for view in &report.course_views {
        writeln!(
            out,
            "- {} {}: {}/{} staff, {}",
            view.course_label, view.name, view.assigned, view.requirement, view.status_label
        )?;
    }

    let open: Vec<_> = report.open_courses().collect();
    if !open.is_empty() {
        writeln!(out, "\nStill needs staff")?;
        for view in open {
            writeln!(
                out,
                "- {} {}: {} more",
                view.course_label,
                view.name,
                view.requirement - view.assigned
            )?;
        }
    }

    Ok(())
}
