//! Comment command handler

use super::base::{HandlerContext, validation};
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::core::Comment;
use crate::error::{HelpdeskError, Result};
use crate::storage::TicketStore;

/// Handle the comment command
pub fn handle_comment(
    reference: &str,
    text: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    validation::require_non_empty("comment", text)?;

    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;
    let ticket = ctx.load_ticket(reference)?;

    if !access::can_comment(&session, &ticket) {
        return Err(HelpdeskError::PermissionDenied {
            action: "comment on this ticket".to_string(),
        });
    }

    // The author is recorded by email, not display name
    let comment = Comment::new(text, &session.email);
    ctx.store.append_comment(&ticket.id, comment)?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket_id": ticket.id,
        }))?;
    } else {
        formatter.success(&format!("Comment added to ticket {}", ticket.id));
    }
    Ok(())
}
