//! Email notification dispatch
//!
//! On ticket creation the handler builds a [`NotificationRequest`] and hands
//! it to a [`Notifier`]. Dispatch is best-effort: a failure never rolls back
//! the ticket and never turns the creation into an overall failure; it is
//! reported separately as a degraded outcome ("ticket saved, email failed").

pub mod endpoint;

use crate::core::Ticket;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Upper bound on any single notification HTTP call; dispatch is best-effort
/// and must never stall ticket creation indefinitely
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client with a bounded per-request timeout
///
/// Panics only if the TLS backend cannot be initialized, the same contract
/// as `Client::new`.
fn http_client(timeout: Duration) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .expect("HTTP client initialization failed")
}

/// Wire body POSTed to the notification endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub description: String,
    pub email: String,
}

impl NotificationRequest {
    /// Build the request for a freshly created ticket and its recipient
    #[must_use]
    pub fn for_ticket(ticket: &Ticket, recipient: &str) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            email: recipient.to_string(),
        }
    }
}

/// Why a notification did not go out
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint answered with a non-success status
    #[error("notification endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The endpoint could not be reached at all
    #[error("could not reach notification endpoint: {0}")]
    Transport(String),

    /// Dispatch is not configured (no endpoint, no API key)
    #[error("notification dispatch is not configured: {0}")]
    Unconfigured(String),
}

/// Anything able to deliver a ticket notification
pub trait Notifier {
    fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

/// Notifier POSTing JSON to a hosted endpoint
pub struct HttpNotifier {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpNotifier {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DISPATCH_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: http_client(timeout),
        }
    }
}

impl Notifier for HttpNotifier {
    fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        debug!(endpoint = %self.endpoint, recipient = %request.email, "dispatching notification");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

/// Notifier running the endpoint handler in-process
///
/// Used when no hosted endpoint is configured: the request goes through the
/// same validation and response shaping as the remote handler, backed by a
/// concrete [`endpoint::MailSender`].
pub struct LocalNotifier<M> {
    sender_address: String,
    mailer: M,
}

impl<M: endpoint::MailSender> LocalNotifier<M> {
    pub fn new(sender_address: impl Into<String>, mailer: M) -> Self {
        Self {
            sender_address: sender_address.into(),
            mailer,
        }
    }
}

impl<M: endpoint::MailSender> Notifier for LocalNotifier<M> {
    fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let body = serde_json::to_string(request)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        let response = endpoint::handle_send(&body, &self.sender_address, &self.mailer);
        if response.status == 200 {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: response.status,
                body: response.body.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TicketBuilder, UserId};

    fn sample_ticket() -> Ticket {
        TicketBuilder::new()
            .title("Printer jam")
            .description("Tray 2 stuck")
            .logged_by(UserId::new(), "jo@example.com")
            .build()
    }

    #[test]
    fn test_request_carries_ticket_fields_and_recipient() {
        let request = NotificationRequest::for_ticket(&sample_ticket(), "jo@example.com");
        assert_eq!(request.title, "Printer jam");
        assert_eq!(request.description, "Tray 2 stuck");
        assert_eq!(request.email, "jo@example.com");
    }

    #[test]
    fn test_local_notifier_maps_endpoint_failure() {
        struct FailingMailer;
        impl endpoint::MailSender for FailingMailer {
            fn send(&self, _message: &endpoint::EmailMessage) -> Result<(), String> {
                Err("provider down".to_string())
            }
        }

        let notifier = LocalNotifier::new("desk@example.com", FailingMailer);
        let request = NotificationRequest::for_ticket(&sample_ticket(), "jo@example.com");

        let err = notifier.send(&request).unwrap_err();
        match err {
            NotifyError::Rejected { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dispatch_gives_up_on_an_unresponsive_endpoint() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = std::thread::spawn(move || {
            // Accept and hold the connection open without ever answering
            let (stream, _) = listener.accept().unwrap();
            std::thread::sleep(Duration::from_secs(1));
            drop(stream);
        });

        let notifier =
            HttpNotifier::with_timeout(format!("http://{addr}/send"), Duration::from_millis(200));
        let request = NotificationRequest::for_ticket(&sample_ticket(), "jo@example.com");

        let err = notifier.send(&request).unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        holder.join().unwrap();
    }

    #[test]
    fn test_local_notifier_success() {
        struct OkMailer;
        impl endpoint::MailSender for OkMailer {
            fn send(&self, _message: &endpoint::EmailMessage) -> Result<(), String> {
                Ok(())
            }
        }

        let notifier = LocalNotifier::new("desk@example.com", OkMailer);
        let request = NotificationRequest::for_ticket(&sample_ticket(), "jo@example.com");
        assert!(notifier.send(&request).is_ok());
    }
}
