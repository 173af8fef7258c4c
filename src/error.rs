//! Error types for the helpdesk crate
//!
//! Every user action either succeeds or fails with one of these errors.
//! No action is retried automatically; a failure is terminal for that action
//! and the actor has to re-trigger it.

use crate::storage::StoreError;
use thiserror::Error;

/// Result type alias using [`HelpdeskError`]
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// The error taxonomy surfaced to users of the crate
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// A required field was missing or empty; caught before any store call
    #[error("{field} cannot be empty")]
    Validation { field: String },

    /// The action requires a signed-in actor and none is present
    #[error("you must be signed in to perform this action")]
    Unauthenticated,

    /// Sign-in was attempted with an unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A visibility or role check failed for the attempted action
    #[error("permission denied: cannot {action}")]
    PermissionDenied { action: String },

    /// A ticket reference did not resolve to a stored ticket
    #[error("ticket not found: {id}")]
    TicketNotFound { id: String },

    /// A user reference did not resolve to a directory entry
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    /// An account already exists for the given email
    #[error("an account already exists for {email}")]
    DuplicateAccount { email: String },

    /// The backing store reported a failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Report export was requested over an empty filtered set
    #[error("no tickets match the current filter; nothing to export")]
    EmptyReport,

    /// The helpdesk data directory has not been created yet
    #[error("helpdesk is not initialized in this directory")]
    NotInitialized,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl HelpdeskError {
    /// Create a custom error from any displayable message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// User-facing message for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Suggestions for recovering from this error, if any
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unauthenticated => vec![
                "Sign in with: helpdesk signin <email> --password <password>".to_string(),
            ],
            Self::InvalidCredentials => vec![
                "Check the email address and password and try again".to_string(),
            ],
            Self::NotInitialized => vec!["Run 'helpdesk init' to set up this directory".to_string()],
            Self::TicketNotFound { .. } => {
                vec!["List visible tickets with: helpdesk list".to_string()]
            },
            Self::EmptyReport => {
                vec!["Loosen the search or status filter and try again".to_string()]
            },
            _ => Vec::new(),
        }
    }

    /// Whether re-triggering the same action could plausibly succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Unauthenticated
                | Self::InvalidCredentials
                | Self::EmptyReport
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_names_the_action_without_assuming_a_role() {
        let role_gated = HelpdeskError::PermissionDenied {
            action: "export reports".to_string(),
        };
        assert_eq!(
            role_gated.user_message(),
            "permission denied: cannot export reports"
        );

        // Visibility denials get the same neutral shape; nothing claims the
        // technician role would have helped
        let visibility = HelpdeskError::PermissionDenied {
            action: "view this ticket".to_string(),
        };
        assert_eq!(
            visibility.user_message(),
            "permission denied: cannot view this ticket"
        );
        assert!(!visibility.user_message().contains("technician"));
    }
}
