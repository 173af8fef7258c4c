//! Report command handler

use super::base::HandlerContext;
use super::list::build_query;
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::error::{HelpdeskError, Result};
use crate::report::{report_filename, write_report};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Handle the report command
///
/// The same filters as `list` apply; the export contains exactly what the
/// technician currently sees. An empty result set produces no file at all.
pub fn handle_report(
    output: Option<&str>,
    search: Option<&str>,
    status: Option<&str>,
    for_email: Option<&str>,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;

    if !access::can_export_report(&session) {
        return Err(HelpdeskError::PermissionDenied {
            action: "export reports".to_string(),
        });
    }

    let query = build_query(&ctx, &session, search, status, for_email)?;
    let snapshot = ctx.store.snapshot_once()?;
    let tickets = access::filter_visible(&session, snapshot, &query);
    let directory = ctx.directory()?;

    // Fails with EmptyReport before any file is written
    let rendered = write_report(&tickets, &directory)?;

    let path = output.map_or_else(
        || PathBuf::from(report_filename(Utc::now().date_naive())),
        PathBuf::from,
    );
    fs::write(&path, rendered)?;
    debug!(rows = tickets.len(), path = %path.display(), "report written");

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "rows": tickets.len(),
            "path": path,
        }))?;
    } else {
        formatter.success(&format!(
            "Exported {} ticket(s) to {}",
            tickets.len(),
            path.display()
        ));
    }
    Ok(())
}
