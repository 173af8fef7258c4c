//! The email-sending endpoint handler
//!
//! Request/response shaping for the serverless send-email function: parse
//! the JSON body, reject missing fields with 400, hand the message to the
//! provider, and answer 200 `{message}` or 500 `{error}`.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

/// Message handed to the email provider
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
}

/// Seam to the outbound email provider
#[cfg_attr(test, mockall::automock)]
pub trait MailSender {
    /// Deliver the message; the error string becomes the 500 body
    fn send(&self, message: &EmailMessage) -> Result<(), String>;
}

/// Shaped HTTP response of the endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: Value,
}

impl EndpointResponse {
    fn ok(message: &str) -> Self {
        Self {
            status: 200,
            body: json!({ "message": message }),
        }
    }

    fn bad_request(error: &str) -> Self {
        Self {
            status: 400,
            body: json!({ "error": error }),
        }
    }

    fn server_error(error: &str) -> Self {
        Self {
            status: 500,
            body: json!({ "error": error }),
        }
    }
}

#[derive(Deserialize)]
struct SendBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    email: String,
}

/// Handle one send-email request
///
/// `sender_address` must be the provider-verified sender; the subject is
/// derived from the ticket title.
pub fn handle_send(body: &str, sender_address: &str, mailer: &dyn MailSender) -> EndpointResponse {
    let Ok(request) = serde_json::from_str::<SendBody>(body) else {
        return EndpointResponse::bad_request("Missing fields");
    };

    if request.title.is_empty() || request.description.is_empty() || request.email.is_empty() {
        return EndpointResponse::bad_request("Missing fields");
    }

    let message = EmailMessage {
        to: request.email,
        from: sender_address.to_string(),
        subject: format!("New Ticket: {}", request.title),
        text: request.description,
    };

    match mailer.send(&message) {
        Ok(()) => EndpointResponse::ok("Email sent"),
        Err(error) => {
            warn!(recipient = %message.to, "email provider failed: {error}");
            EndpointResponse::server_error(&error)
        },
    }
}

/// Mail sender backed by the hosted email provider's HTTP API
///
/// The API key comes from the environment, never from the store or config
/// file contents.
pub struct ApiMailSender {
    api_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ApiMailSender {
    const DEFAULT_API_URL: &'static str = "https://api.sendgrid.com/v3/mail/send";

    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            client: super::http_client(super::DISPATCH_TIMEOUT),
        }
    }

    /// Read the API key from the named environment variable
    pub fn from_env(var: &str) -> Result<Self, String> {
        let api_key =
            std::env::var(var).map_err(|_| format!("environment variable {var} is not set"))?;
        Ok(Self::new(api_key))
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

impl MailSender for ApiMailSender {
    fn send(&self, message: &EmailMessage) -> Result<(), String> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.text }],
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!(
                "provider returned {status}: {}",
                response.text().unwrap_or_default()
            ))
        }
    }
}
