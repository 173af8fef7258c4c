//! Base handler utilities for common operations
//!
//! Shared initialization and lookups used across command handlers.

use crate::auth::{AuthProvider, FileAuth, Session};
use crate::config::Config;
use crate::core::{Ticket, TicketId, User, UserId};
use crate::error::{HelpdeskError, Result};
use crate::storage::{FileStore, TicketStore};
use std::collections::HashMap;
use std::path::PathBuf;

/// Context for handler operations
///
/// Bundles configuration, the store, and the auth provider. The session is
/// not held here; handlers acquire it per action via [`Self::session`].
pub struct HandlerContext {
    pub root: PathBuf,
    pub config: Config,
    pub store: FileStore,
    pub auth: FileAuth,
}

impl HandlerContext {
    /// Open the context for an already-initialized project directory
    pub fn new(project_dir: Option<&str>) -> Result<Self> {
        let root = match project_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        let config = Config::load(&root)?;
        let data_dir = config.data_dir(&root);

        if !FileStore::is_initialized(&data_dir) {
            return Err(HelpdeskError::NotInitialized);
        }

        Ok(Self {
            root,
            config,
            store: FileStore::new(data_dir.clone()),
            auth: FileAuth::new(data_dir),
        })
    }

    /// Create the store layout and open the context
    pub fn init(project_dir: Option<&str>, force: bool) -> Result<Self> {
        let root = match project_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        let config = Config::load(&root)?;
        let data_dir = config.data_dir(&root);

        if FileStore::is_initialized(&data_dir) && !force {
            return Err(HelpdeskError::custom(
                "helpdesk is already initialized here (use --force to re-initialize)",
            ));
        }

        let store = FileStore::init(&data_dir).map_err(HelpdeskError::Store)?;
        Ok(Self {
            root,
            config,
            store,
            auth: FileAuth::new(data_dir),
        })
    }

    /// The signed-in session, acquired for the duration of one action
    pub fn session(&self) -> Result<Session> {
        let Some(user_id) = self.auth.current_identity()? else {
            return Err(HelpdeskError::Unauthenticated);
        };
        let user = self.store.load_user(&user_id).map_err(|e| {
            if e.is_not_found() {
                HelpdeskError::UserNotFound {
                    id: user_id.to_string(),
                }
            } else {
                e.into()
            }
        })?;
        Ok(Session::for_user(&user))
    }

    /// Resolve a ticket reference (full id or unique prefix) to the record
    pub fn load_ticket(&self, reference: &str) -> Result<Ticket> {
        if let Ok(id) = TicketId::parse_str(reference) {
            return self.store.load(&id).map_err(|e| {
                if e.is_not_found() {
                    HelpdeskError::TicketNotFound {
                        id: reference.to_string(),
                    }
                } else {
                    e.into()
                }
            });
        }

        // Fall back to prefix matching over the snapshot
        let tickets = self.store.load_all()?;
        let mut matches = tickets
            .into_iter()
            .filter(|t| t.id.to_string().starts_with(reference));

        match (matches.next(), matches.next()) {
            (Some(ticket), None) => Ok(ticket),
            (Some(_), Some(_)) => Err(HelpdeskError::custom(format!(
                "ticket reference '{reference}' is ambiguous; use more of the id"
            ))),
            _ => Err(HelpdeskError::TicketNotFound {
                id: reference.to_string(),
            }),
        }
    }

    /// Look a user up by email in the directory
    pub fn find_user_by_email(&self, email: &str) -> Result<User> {
        self.store
            .load_all_users()?
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| HelpdeskError::UserNotFound {
                id: email.to_string(),
            })
    }

    /// The full user directory, keyed by identity
    pub fn directory(&self) -> Result<HashMap<UserId, User>> {
        Ok(self
            .store
            .load_all_users()?
            .into_iter()
            .map(|user| (user.id, user))
            .collect())
    }
}

/// Common validation functions
pub mod validation {
    use crate::core::Status;
    use crate::error::{HelpdeskError, Result};

    /// Reject empty required fields before any store call
    pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(HelpdeskError::Validation {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    /// Parse a status filter; "all" (or nothing) means no filter
    pub fn parse_status_filter(status: Option<&str>) -> Result<Option<Status>> {
        match status {
            None => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(HelpdeskError::Custom),
        }
    }
}
