//! Task commands
//!
//! Form-style operations against the backend. Field validation happens
//! locally, before any request is made.

mod add;
mod get;
mod update;

pub use add::AddTask;
pub use get::GetTask;
pub use update::UpdateTask;

use crate::api::TaskFields;
use crate::error::{BoardError, Result};
use chrono::NaiveDate;

/// Wire format of `startDate` and `dueDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    // chrono tolerates signs, padding and short fields; the backend does not
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(BoardError::invalid_value(
            field,
            format!("'{}' is not a YYYY-MM-DD date", value),
        ));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        BoardError::invalid_value(field, format!("'{}' is not a YYYY-MM-DD date: {}", value, e))
    })
}

/// Check a field set before it is sent
pub(crate) fn validate_fields(fields: &TaskFields) -> Result<()> {
    if fields.title.trim().is_empty() {
        return Err(BoardError::missing_field("title"));
    }
    let start = parse_date("startDate", &fields.start_date)?;
    let due = parse_date("dueDate", &fields.due_date)?;
    if due < start {
        return Err(BoardError::invalid_value(
            "dueDate",
            format!("{} is before start date {}", fields.due_date, fields.start_date),
        ));
    }
    Ok(())
}
