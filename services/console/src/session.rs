use crate::render::{course_line, staff_line};
use course_staffing::staffing::{CourseId, StaffId, StaffingOffice};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Why a menu stopped early.
#[derive(Debug)]
enum Interrupt {
    /// Input was closed; the session ends quietly.
    Closed,
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

type Step<T> = Result<T, Interrupt>;

/// Role-based numeric menu over a [`StaffingOffice`].
///
/// Every selection is range checked and re-prompted. Staffing errors are printed and
/// the user is returned to the menu they came from.
pub(crate) struct Session<'o, R, W> {
    office: &'o mut StaffingOffice,
    input: R,
    output: W,
}

impl<'o, R: BufRead, W: Write> Session<'o, R, W> {
    pub(crate) fn new(office: &'o mut StaffingOffice, input: R, output: W) -> Self {
        Self {
            office,
            input,
            output,
        }
    }

    pub(crate) fn run(&mut self) -> io::Result<()> {
        match self.role_loop() {
            Ok(()) | Err(Interrupt::Closed) => Ok(()),
            Err(Interrupt::Io(err)) => Err(err),
        }
    }

    fn role_loop(&mut self) -> Step<()> {
        loop {
            let choice = self.menu(
                "Select user",
                &[
                    "Course director",
                    "Administrator",
                    "Approval authority",
                ],
                "Save and exit",
            )?;
            match choice {
                0 => return Ok(()),
                1 => self.course_director()?,
                2 => self.administrator()?,
                _ => self.approval_authority()?,
            }
        }
    }

    fn course_director(&mut self) -> Step<()> {
        loop {
            let choice = self.menu(
                "Course director",
                &["Set requirement for an unapproved course", "Create course"],
                "Back",
            )?;
            match choice {
                0 => return Ok(()),
                1 => self.set_requirement()?,
                _ => self.create_course()?,
            }
        }
    }

    fn administrator(&mut self) -> Step<()> {
        loop {
            let choice = self.menu(
                "Administrator",
                &[
                    "List staff",
                    "Fill requirements",
                    "Create staff member",
                    "Train staff",
                ],
                "Back",
            )?;
            match choice {
                0 => return Ok(()),
                1 => self.list_staff()?,
                2 => self.fill_requirements()?,
                3 => self.create_staff()?,
                _ => self.train_staff()?,
            }
        }
    }

    fn approval_authority(&mut self) -> Step<()> {
        loop {
            let choice = self.menu(
                "Approval authority",
                &["Approve a course", "Revoke an approved course"],
                "Back",
            )?;
            match choice {
                0 => return Ok(()),
                1 => self.approve_course()?,
                _ => self.revoke_course()?,
            }
        }
    }

    fn set_requirement(&mut self) -> Step<()> {
        let courses = self.unapproved_courses();
        let Some(course) = self.pick("Unapproved courses", courses)? else {
            return Ok(());
        };
        let requirement = self.read_number("Enter the number of staff required: ")?;
        match self.office.set_requirement(course, requirement) {
            Ok(change) => {
                writeln!(
                    self.output,
                    "Requirement for {course} changed from {} to {}.",
                    change.previous, change.current
                )?;
            }
            Err(err) => writeln!(self.output, "Could not change requirement: {err}")?,
        }
        Ok(())
    }

    fn create_course(&mut self) -> Step<()> {
        let name = self.read_text("Enter the course name: ")?;
        loop {
            let requirement = self.read_number("Enter the number of staff required: ")?;
            match self.office.create_course(name.clone(), requirement) {
                Ok(id) => {
                    writeln!(self.output, "Created course {id} {name}.")?;
                    return Ok(());
                }
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn list_staff(&mut self) -> Step<()> {
        let lines: Vec<String> = self
            .office
            .staff()
            .list()
            .into_iter()
            .map(staff_line)
            .collect();
        if lines.is_empty() {
            writeln!(self.output, "No staff members yet.")?;
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn fill_requirements(&mut self) -> Step<()> {
        let courses = self.unapproved_courses();
        let Some(course) = self.pick("Unapproved courses", courses)? else {
            return Ok(());
        };

        loop {
            let heading = match self.office.course(course) {
                Ok(details) => course_line(details),
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    return Ok(());
                }
            };
            let choice = self.menu(&heading, &["Assign staff", "Remove staff"], "Back")?;
            match choice {
                0 => return Ok(()),
                1 => self.assign_staff(course)?,
                _ => self.remove_staff(course)?,
            }
        }
    }

    fn assign_staff(&mut self, course: CourseId) -> Step<()> {
        let available = staff_entries(self.office.staff().available());
        let Some(staff) = self.pick("Available staff", available)? else {
            return Ok(());
        };
        match self.office.assign(course, staff) {
            Ok(()) => writeln!(self.output, "Assigned {staff} to {course}.")?,
            Err(err) => writeln!(self.output, "Could not assign staff: {err}")?,
        }
        Ok(())
    }

    fn remove_staff(&mut self, course: CourseId) -> Step<()> {
        let assigned = match self.office.staff_of(course) {
            Ok(members) => staff_entries(members),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };
        let Some(staff) = self.pick("Assigned staff", assigned)? else {
            return Ok(());
        };
        match self.office.unassign(course, staff) {
            Ok(revoked) => {
                writeln!(self.output, "Removed {staff} from {course}.")?;
                if revoked {
                    writeln!(
                        self.output,
                        "{course} is no longer full and its approval was withdrawn."
                    )?;
                }
            }
            Err(err) => writeln!(self.output, "Could not remove staff: {err}")?,
        }
        Ok(())
    }

    fn create_staff(&mut self) -> Step<()> {
        let name = self.read_text("Enter the staff member's name: ")?;
        let id = self.office.create_staff(name.clone());
        writeln!(self.output, "Created staff member {id} {name}.")?;
        Ok(())
    }

    fn train_staff(&mut self) -> Step<()> {
        let untrained = staff_entries(self.office.staff().untrained());
        let Some(staff) = self.pick("Untrained staff", untrained)? else {
            return Ok(());
        };
        match self.office.train(staff) {
            Ok(()) => writeln!(self.output, "{staff} is now trained.")?,
            Err(err) => writeln!(self.output, "Could not train staff: {err}")?,
        }
        Ok(())
    }

    fn approve_course(&mut self) -> Step<()> {
        let courses = self.unapproved_courses();
        let Some(course) = self.pick("Unapproved courses", courses)? else {
            return Ok(());
        };
        match self.office.approve(course) {
            Ok(()) => writeln!(self.output, "Approved {course}.")?,
            Err(err) => writeln!(self.output, "Could not approve: {err}")?,
        }
        Ok(())
    }

    fn revoke_course(&mut self) -> Step<()> {
        let courses: Vec<(CourseId, String)> = self
            .office
            .courses()
            .approved()
            .into_iter()
            .map(|course| (course.id(), course_line(course)))
            .collect();
        let Some(course) = self.pick("Approved courses", courses)? else {
            return Ok(());
        };
        match self.office.revoke(course) {
            Ok(_) => writeln!(self.output, "Revoked approval for {course}.")?,
            Err(err) => writeln!(self.output, "Could not revoke: {err}")?,
        }
        Ok(())
    }

    fn unapproved_courses(&self) -> Vec<(CourseId, String)> {
        self.office
            .courses()
            .unapproved()
            .into_iter()
            .map(|course| (course.id(), course_line(course)))
            .collect()
    }

    /// Shows a numbered menu and returns the chosen option, `0` being `back_label`.
    fn menu(&mut self, heading: &str, options: &[&str], back_label: &str) -> Step<usize> {
        loop {
            writeln!(self.output, "\n{heading}")?;
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "{}. {option}", index + 1)?;
            }
            writeln!(self.output, "0. {back_label}")?;

            if let Some(choice) = self.read_choice(options.len())? {
                return Ok(choice);
            }
        }
    }

    /// Lets the user pick one entry from a list; `None` means they went back.
    fn pick<Id: Copy>(&mut self, heading: &str, entries: Vec<(Id, String)>) -> Step<Option<Id>> {
        if entries.is_empty() {
            writeln!(self.output, "{heading}: none.")?;
            return Ok(None);
        }

        loop {
            writeln!(self.output, "\n{heading}")?;
            for (index, (_, label)) in entries.iter().enumerate() {
                writeln!(self.output, "{}. {label}", index + 1)?;
            }
            writeln!(self.output, "0. Back")?;

            if let Some(choice) = self.read_choice(entries.len())? {
                return Ok(choice.checked_sub(1).map(|index| entries[index].0));
            }
        }
    }

    /// Reads one selection in `0..=max`. `None` asks the caller to re-render its prompt.
    fn read_choice(&mut self, max: usize) -> Step<Option<usize>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let line = self.read_line()?;
        match line.parse::<usize>() {
            Ok(choice) if choice <= max => Ok(Some(choice)),
            _ => {
                debug!(input = %line, max, "menu selection rejected");
                writeln!(
                    self.output,
                    "Invalid input, enter a number between 0 and {max}."
                )?;
                Ok(None)
            }
        }
    }

    fn read_number(&mut self, prompt: &str) -> Step<i64> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let line = self.read_line()?;
            match line.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input, enter a whole number.")?,
            }
        }
    }

    fn read_text(&mut self, prompt: &str) -> Step<String> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let line = self.read_line()?;
            if !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "A name is required.")?;
        }
    }

    fn read_line(&mut self) -> Step<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::Closed);
        }
        Ok(line.trim().to_string())
    }
}

fn staff_entries(members: Vec<&course_staffing::staffing::Staff>) -> Vec<(StaffId, String)> {
    members
        .into_iter()
        .map(|staff| (staff.id(), staff_line(staff)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_staffing::staffing::ApprovalState;

    fn drive(office: &mut StaffingOffice, script: &str) -> String {
        let mut output = Vec::new();
        Session::new(office, script.as_bytes(), &mut output)
            .run()
            .expect("session io succeeds");
        String::from_utf8(output).expect("utf8 output")
    }

    #[test]
    fn director_creates_course_after_rejected_requirement() {
        let mut office = StaffingOffice::new();

        let output = drive(&mut office, "1\n2\nCompilers\n-1\n2\n0\n0\n");

        assert!(output.contains("requirement must be a whole number"));
        let courses = office.courses().list();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name(), "Compilers");
        assert_eq!(courses[0].requirement(), 2);
    }

    #[test]
    fn out_of_range_and_non_numeric_choices_are_reprompted() {
        let mut office = StaffingOffice::new();

        let output = drive(&mut office, "7\nabc\n0\n");

        assert_eq!(
            output
                .matches("Invalid input, enter a number between 0 and 3.")
                .count(),
            2
        );
        assert_eq!(output.matches("Select user").count(), 3);
    }

    #[test]
    fn administrator_trains_and_assigns_then_authority_approves() {
        let mut office = StaffingOffice::new();
        let course = office.create_course("Databases", 1).expect("valid course");
        let staff = office.create_staff("Edgar");

        // admin: train #1, fill requirements -> course #1 -> assign -> staff #1, back out
        // authority: approve course #1
        let script = "2\n4\n1\n2\n1\n1\n1\n0\n0\n3\n1\n1\n0\n0\n";
        let output = drive(&mut office, script);

        assert!(output.contains("is now trained"));
        assert!(output.contains(&format!("Assigned {staff} to {course}.")));
        assert!(output.contains(&format!("Approved {course}.")));
        assert_eq!(
            office.course(course).expect("course present").approval(),
            ApprovalState::Approved
        );
    }

    #[test]
    fn removing_staff_reports_withdrawn_approval() {
        let mut office = StaffingOffice::new();
        let course = office.create_course("Networks", 1).expect("valid course");
        let staff = office.create_staff("Radia");
        office.train(staff).expect("staff exists");
        office.assign(course, staff).expect("assignable");
        office.approve(course).expect("full");

        // approved courses are only offered for filling once revoked
        let script = "3\n2\n1\n0\n2\n2\n1\n2\n1\n0\n0\n0\n";
        let output = drive(&mut office, script);

        assert!(output.contains(&format!("Revoked approval for {course}.")));
        assert!(output.contains(&format!("Removed {staff} from {course}.")));
        assert_eq!(
            office.course(course).expect("course present").assigned_count(),
            0
        );
    }

    #[test]
    fn approval_of_understaffed_course_is_reported() {
        let mut office = StaffingOffice::new();
        office.create_course("Graphics", 2).expect("valid course");

        let output = drive(&mut office, "3\n1\n1\n0\n0\n");

        assert!(output.contains("Could not approve"));
        assert!(office.courses().approved().is_empty());
    }

    #[test]
    fn closed_input_ends_session_quietly() {
        let mut office = StaffingOffice::new();

        let output = drive(&mut office, "2\n3\n");

        assert!(output.contains("Enter the staff member's name"));
        assert!(office.staff().is_empty());
    }
}
