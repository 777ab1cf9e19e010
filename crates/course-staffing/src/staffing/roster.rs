//! CSV import of staff lists and export of course rosters.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use super::domain::{Course, Staff, StaffId, StaffingError};
use super::office::StaffingOffice;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to access roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Staffing(#[from] StaffingError),
    #[error("line {line}: staff name is empty")]
    MissingName { line: u64 },
    #[error("line {line}: '{value}' is not a valid trained flag (use yes/no, true/false or 1/0)")]
    InvalidTrained { line: u64, value: String },
}

#[derive(Debug, Deserialize)]
struct StaffRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    trained: Option<String>,
}

struct ParsedStaff {
    name: String,
    trained: bool,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

fn parse_trained(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedStaff>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |position| position.line());
        let row: StaffRow = record.deserialize(Some(&headers))?;

        if row.name.is_empty() {
            return Err(RosterError::MissingName { line });
        }
        let trained = match row.trained.as_deref() {
            None => false,
            Some(raw) => parse_trained(raw).ok_or_else(|| RosterError::InvalidTrained {
                line,
                value: raw.to_string(),
            })?,
        };

        rows.push(ParsedStaff {
            name: row.name,
            trained,
        });
    }

    Ok(rows)
}

/// Creates one staff member per CSV row (`name`, optional `trained`).
///
/// The whole file is parsed before anything is created, so a bad row leaves the
/// office unchanged.
pub fn import_staff<R: Read>(
    office: &mut StaffingOffice,
    reader: R,
) -> Result<Vec<StaffId>, RosterError> {
    let rows = parse_rows(reader)?;
    let mut created = Vec::with_capacity(rows.len());

    for row in rows {
        let id = office.create_staff(row.name);
        if row.trained {
            office.train(id)?;
        }
        created.push(id);
    }

    info!(count = created.len(), "staff roster imported");
    Ok(created)
}

pub fn import_staff_from_path<P: AsRef<Path>>(
    office: &mut StaffingOffice,
    path: P,
) -> Result<Vec<StaffId>, RosterError> {
    let file = std::fs::File::open(path)?;
    import_staff(office, file)
}

#[derive(Debug, Serialize)]
struct RosterRow<'a> {
    course_id: String,
    course_name: &'a str,
    requirement: u32,
    assigned: u32,
    approved: bool,
    staff_id: Option<String>,
    staff_name: Option<&'a str>,
}

fn roster_row<'a>(course: &'a Course, member: Option<&'a Staff>) -> RosterRow<'a> {
    RosterRow {
        course_id: course.id().to_string(),
        course_name: course.name(),
        requirement: course.requirement(),
        assigned: course.assigned_count(),
        approved: course.is_approved(),
        staff_id: member.map(|staff| staff.id().to_string()),
        staff_name: member.map(Staff::name),
    }
}

/// Writes one row per course and assigned staff member. Courses without staff still
/// get a single row with empty staff columns. Returns the number of data rows.
pub fn export_roster<W: Write>(office: &StaffingOffice, writer: W) -> Result<usize, RosterError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0;

    for course in office.courses().list() {
        let members = office.staff_of(course.id())?;
        if members.is_empty() {
            csv_writer.serialize(roster_row(course, None))?;
            written += 1;
            continue;
        }
        for member in members {
            csv_writer.serialize(roster_row(course, Some(member)))?;
            written += 1;
        }
    }

    csv_writer.flush()?;
    Ok(written)
}

pub fn export_roster_to_path<P: AsRef<Path>>(
    office: &StaffingOffice,
    path: P,
) -> Result<usize, RosterError> {
    let file = std::fs::File::create(path)?;
    export_roster(office, file)
}
