//! Delete command handler

use super::base::HandlerContext;
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::error::{HelpdeskError, Result};
use crate::storage::TicketStore;

/// Handle the delete command
///
/// Deletion is permanent: there is no archive or soft-delete state, so the
/// `--force` flag stands in for an interactive confirmation.
pub fn handle_delete(
    reference: &str,
    force: bool,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;
    let ticket = ctx.load_ticket(reference)?;

    if !access::can_delete(&session, &ticket) {
        return Err(HelpdeskError::PermissionDenied {
            action: "delete tickets".to_string(),
        });
    }

    if !force {
        return Err(HelpdeskError::custom(format!(
            "deleting ticket '{}' is permanent; pass --force to confirm",
            ticket.title
        )));
    }

    ctx.store.remove(&ticket.id)?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket_id": ticket.id,
        }))?;
    } else {
        formatter.success(&format!("Deleted ticket {} ({})", ticket.id, ticket.title));
    }
    Ok(())
}
