//! Report export
//!
//! Serializes the viewer's currently-visible, currently-filtered ticket set
//! to semicolon-delimited text. Exporting an empty set is an error, not an
//! empty file.

use crate::core::{Ticket, User, UserId};
use crate::error::{HelpdeskError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Fixed column set, one header row
pub const REPORT_COLUMNS: [&str; 8] = [
    "Ticket ID",
    "Title",
    "Description",
    "Status",
    "Logged By",
    "Logged At",
    "Logged For",
    "Is Technician Logged",
];

const DELIMITER: u8 = b';';

/// Escape a field for the report
///
/// Embedded newlines collapse to spaces, the column delimiter becomes a
/// comma, and any field containing a space is quoted. Quoting is done here,
/// so the writer itself never quotes.
fn format_field(value: &str) -> String {
    let cleaned: String = value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace(';', ",");
    if cleaned.contains(' ') {
        format!("\"{cleaned}\"")
    } else {
        cleaned
    }
}

/// Resolve the beneficiary column through the user directory
fn logged_for_display(ticket: &Ticket, directory: &HashMap<UserId, User>) -> String {
    match &ticket.logged_for {
        None => "N/A".to_string(),
        // A stale reference (user removed from the directory) is not an error
        Some(id) => directory
            .get(id)
            .map_or_else(|| "Unknown user".to_string(), User::display_name),
    }
}

/// Serialize tickets to the semicolon-delimited report format
///
/// The input must already be the viewer's filtered set; this function does
/// no access control of its own.
pub fn write_report(tickets: &[Ticket], directory: &HashMap<UserId, User>) -> Result<String> {
    if tickets.is_empty() {
        return Err(HelpdeskError::EmptyReport);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(vec![]);

    writer
        .write_record(REPORT_COLUMNS)
        .map_err(|e| HelpdeskError::Serialization(format!("report header: {e}")))?;

    for ticket in tickets {
        writer
            .write_record([
                format_field(&ticket.id.to_string()),
                format_field(&ticket.title),
                format_field(&ticket.description),
                format_field(&ticket.status.to_string()),
                format_field(&ticket.logged_by),
                format_field(&ticket.created_at.to_display()),
                format_field(&logged_for_display(ticket, directory)),
                format_field(if ticket.is_logged_by_tech { "Yes" } else { "No" }),
            ])
            .map_err(|e| HelpdeskError::Serialization(format!("report row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| HelpdeskError::Serialization(format!("report flush: {e}")))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| HelpdeskError::Serialization(format!("report buffer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| HelpdeskError::Serialization(format!("report utf8: {e}")))
}

/// Download filename for a report pulled on the given date
#[must_use]
pub fn report_filename(date: NaiveDate) -> String {
    format!("filtered_tickets_{}.csv", date.format("%Y-%m-%d"))
}
