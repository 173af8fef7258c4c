//! List command handler

use super::base::{HandlerContext, validation};
use crate::access::{self, TicketQuery};
use crate::auth::Session;
use crate::cli::output::OutputFormatter;
use crate::core::Ticket;
use crate::error::{HelpdeskError, Result};

/// Build a ticket query from CLI filter arguments
///
/// The beneficiary filter (`--for`) is a technician tool; a regular user
/// already sees only their own tickets.
pub fn build_query(
    ctx: &HandlerContext,
    session: &Session,
    search: Option<&str>,
    status: Option<&str>,
    for_email: Option<&str>,
) -> Result<TicketQuery> {
    let logged_for = match for_email {
        None => None,
        Some(email) => {
            if !session.is_technician() {
                return Err(HelpdeskError::PermissionDenied {
                    action: "filter tickets by beneficiary".to_string(),
                });
            }
            Some(ctx.find_user_by_email(email)?.id)
        },
    };

    Ok(TicketQuery {
        search: search.map(str::to_string),
        status: validation::parse_status_filter(status)?,
        logged_for,
    })
}

/// Handle the list command
pub fn handle_list(
    search: Option<&str>,
    status: Option<&str>,
    for_email: Option<&str>,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;
    let query = build_query(&ctx, &session, search, status, for_email)?;

    let snapshot = ctx.store.snapshot_once()?;
    let tickets = access::filter_visible(&session, snapshot, &query);

    if formatter.is_json() {
        return formatter.print_json(&serde_json::json!({
            "count": tickets.len(),
            "tickets": tickets,
        }));
    }

    if tickets.is_empty() {
        formatter.info("No tickets match your criteria.");
        return Ok(());
    }

    for ticket in &tickets {
        formatter.info(&summary_line(ticket));
    }
    formatter.info(&format!("\n{} ticket(s)", tickets.len()));
    Ok(())
}

fn summary_line(ticket: &Ticket) -> String {
    let short_id: String = ticket.id.to_string().chars().take(8).collect();
    format!(
        "{short_id}  [{}]  {}  (logged by {})",
        ticket.status, ticket.title, ticket.logged_by
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDesk;

    #[test]
    fn test_build_query_rejects_beneficiary_filter_for_regular_user() {
        let desk = TestDesk::new();
        let user = desk.create_regular_user("alice@example.com");
        let session = desk.session_for(&user);

        let err =
            build_query(&desk.context(), &session, None, None, Some("bob@example.com"))
                .unwrap_err();
        assert!(matches!(err, HelpdeskError::PermissionDenied { .. }));
    }

    #[test]
    fn test_build_query_resolves_beneficiary_email() {
        let desk = TestDesk::new();
        let tech = desk.create_technician("tech@example.com");
        let user = desk.create_regular_user("alice@example.com");
        let session = desk.session_for(&tech);

        let query = build_query(
            &desk.context(),
            &session,
            Some("printer"),
            Some("open"),
            Some("ALICE@example.com"),
        )
        .unwrap();
        assert_eq!(query.logged_for, Some(user.id));
        assert_eq!(query.search.as_deref(), Some("printer"));
    }

    #[test]
    fn test_build_query_unknown_beneficiary() {
        let desk = TestDesk::new();
        let tech = desk.create_technician("tech@example.com");
        let session = desk.session_for(&tech);

        let err = build_query(&desk.context(), &session, None, None, Some("nobody@x.com"))
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::UserNotFound { .. }));
    }
}
