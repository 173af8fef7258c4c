use thiserror::Error;

/// Failure taxonomy surfaced by the store
///
/// Every variant is a user-visible failure; none is retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the call because no identity was attached
    #[error("store access requires authentication")]
    Unauthenticated,

    /// The store's own rules rejected the call
    #[error("the store denied permission for this operation")]
    PermissionDenied,

    /// No record exists at the addressed path
    #[error("no record at {path}")]
    NotFound { path: String },

    /// A write could not be applied
    #[error("write failed at {path}: {reason}")]
    Write { path: String, reason: String },

    /// The store could not be reached
    #[error("store unreachable: {0}")]
    Network(String),
}

impl StoreError {
    pub fn write(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this failure means the addressed record is missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
