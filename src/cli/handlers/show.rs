//! Show command handler

use super::base::HandlerContext;
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::core::Ticket;
use crate::error::{HelpdeskError, Result};
use crate::storage::TicketStore;

/// Handle the show command
pub fn handle_show(
    reference: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;
    let ticket = ctx.load_ticket(reference)?;

    if !access::can_view(&session, &ticket) {
        return Err(HelpdeskError::PermissionDenied {
            action: "view this ticket".to_string(),
        });
    }

    if formatter.is_json() {
        return formatter.print_json(&ticket);
    }

    print_ticket(&ticket, &ctx, formatter)?;
    Ok(())
}

fn print_ticket(ticket: &Ticket, ctx: &HandlerContext, formatter: &OutputFormatter) -> Result<()> {
    formatter.info(&format!("Ticket:      {}", ticket.id));
    formatter.info(&format!("Title:       {}", ticket.title));
    formatter.info(&format!("Status:      {}", ticket.status));
    formatter.info(&format!("Logged by:   {}", ticket.logged_by));
    formatter.info(&format!("Logged at:   {}", ticket.created_at.to_display()));

    if let Some(beneficiary) = &ticket.logged_for {
        let display = ctx
            .store
            .load_user(beneficiary)
            .map_or_else(|_| "Unknown user".to_string(), |user| user.display_name());
        formatter.info(&format!("Logged for:  {display}"));
    }

    formatter.info("");
    formatter.info(&ticket.description);

    if !ticket.comments.is_empty() {
        formatter.info(&format!("\nComments ({}):", ticket.comments.len()));
        for comment in &ticket.comments {
            formatter.info(&format!(
                "  [{}] {}: {}",
                comment.timestamp.format("%Y-%m-%d %H:%M"),
                comment.author,
                comment.text
            ));
        }
    }
    Ok(())
}
