//! Resolve command handler

use super::base::HandlerContext;
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::error::{HelpdeskError, Result};
use crate::lifecycle::{self, Transition};
use crate::storage::TicketStore;

/// Handle the resolve command
pub fn handle_resolve(
    reference: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;
    let mut ticket = ctx.load_ticket(reference)?;

    if !access::can_change_status(&session, &ticket) {
        return Err(HelpdeskError::PermissionDenied {
            action: "resolve tickets".to_string(),
        });
    }

    let transition = lifecycle::resolve(&mut ticket);
    if transition.needs_write() {
        ctx.store.update_status(&ticket.id, ticket.status)?;
    }

    if formatter.is_json() {
        return formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket_id": ticket.id,
            "ticket_status": ticket.status,
        }));
    }

    match transition {
        Transition::Resolved => {
            formatter.success(&format!("Ticket {} marked as resolved", ticket.id));
        },
        Transition::AlreadyResolved => {
            formatter.info(&format!("Ticket {} is already resolved", ticket.id));
        },
    }
    Ok(())
}
