//! Log command handler: create a ticket and dispatch the notification
//!
//! Creation and notification are two independent, separately-reported
//! operations. The ticket write happens first; a notification failure is a
//! degraded outcome ("ticket saved, email failed"), never an overall error.

use super::base::{HandlerContext, validation};
use crate::access;
use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::core::{Ticket, TicketBuilder, User};
use crate::error::{HelpdeskError, Result};
use crate::notify::endpoint::ApiMailSender;
use crate::notify::{HttpNotifier, LocalNotifier, NotificationRequest, Notifier, NotifyError};
use crate::storage::TicketStore;
use tracing::{debug, warn};

/// Parameters for logging a ticket
pub struct LogParams {
    pub title: String,
    pub description: String,
    /// Beneficiary email, technician only
    pub for_email: Option<String>,
    pub no_notify: bool,
}

/// Outcome of the notification half of the action
enum NotifyOutcome {
    Sent(String),
    Failed(NotifyError),
    Skipped,
}

/// Handle the log command
pub fn handle_log_command(
    params: LogParams,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    // Validation happens before any store or network call
    validation::require_non_empty("title", &params.title)?;
    validation::require_non_empty("description", &params.description)?;

    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;

    let beneficiary: Option<User> = params
        .for_email
        .as_deref()
        .map(|email| ctx.find_user_by_email(email))
        .transpose()?;

    let beneficiary_id = beneficiary.as_ref().map(|user| user.id);
    if !access::can_create_for(&session, beneficiary_id.as_ref()) {
        return Err(HelpdeskError::PermissionDenied {
            action: "log a ticket for another user".to_string(),
        });
    }

    // Denormalize the creator's display string at creation time
    let logged_by = ctx
        .store
        .load_user(&session.user_id)
        .map_or_else(|_| session.email.clone(), |user| user.display_name());

    let mut builder = TicketBuilder::new()
        .title(&params.title)
        .description(&params.description)
        .logged_by(session.user_id, logged_by);
    if let Some(id) = beneficiary_id {
        builder = builder.logged_for(id);
    }
    let ticket = builder.build();

    // Creation first; notification second, independently failable
    let id = ctx.store.create(ticket.clone())?;
    debug!(ticket = %id, "ticket saved");

    let outcome = if params.no_notify {
        NotifyOutcome::Skipped
    } else {
        dispatch_notification(&ctx.config, &ticket, &session.email, beneficiary.as_ref())
    };

    report_outcome(&id.to_string(), &outcome, formatter)
}

/// Send the creation notification to the beneficiary, or the creator when
/// there is none
fn dispatch_notification(
    config: &Config,
    ticket: &Ticket,
    creator_email: &str,
    beneficiary: Option<&User>,
) -> NotifyOutcome {
    let recipient = beneficiary.map_or(creator_email, |user| user.email.as_str());
    let request = NotificationRequest::for_ticket(ticket, recipient);

    let result = match build_notifier(config) {
        Ok(notifier) => notifier.send(&request),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => NotifyOutcome::Sent(recipient.to_string()),
        Err(e) => {
            warn!(ticket = %ticket.id, "notification dispatch failed: {e}");
            NotifyOutcome::Failed(e)
        },
    }
}

fn build_notifier(config: &Config) -> std::result::Result<Box<dyn Notifier>, NotifyError> {
    if let Some(endpoint) = &config.notify.endpoint {
        return Ok(Box::new(HttpNotifier::new(endpoint)));
    }
    let mailer =
        ApiMailSender::from_env(&config.notify.api_key_env).map_err(NotifyError::Unconfigured)?;
    Ok(Box::new(LocalNotifier::new(&config.notify.sender, mailer)))
}

fn report_outcome(
    ticket_id: &str,
    outcome: &NotifyOutcome,
    formatter: &OutputFormatter,
) -> Result<()> {
    if formatter.is_json() {
        let notification = match outcome {
            NotifyOutcome::Sent(_) => "sent",
            NotifyOutcome::Failed(_) => "failed",
            NotifyOutcome::Skipped => "skipped",
        };
        return formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket_id": ticket_id,
            "notification": notification,
        }));
    }

    formatter.success(&format!("Ticket saved ({ticket_id})"));
    match outcome {
        NotifyOutcome::Sent(recipient) => {
            formatter.info(&format!("Notification email sent to {recipient}"));
        },
        NotifyOutcome::Failed(e) => {
            formatter.warning(&format!(
                "ticket saved, but the notification email failed: {e}"
            ));
        },
        NotifyOutcome::Skipped => {},
    }
    Ok(())
}
