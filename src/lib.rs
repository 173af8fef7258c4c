//! helpdesk - a role-gated support ticketing system
//!
//! This crate provides the core of a helpdesk application:
//! - Ticket lifecycle (open -> resolved) with technician-only transitions
//! - Pure access-control rules deciding visibility and permitted actions
//! - A path-addressed file store with in-process change subscriptions
//! - Best-effort email notification dispatch on ticket creation
//! - Semicolon-delimited report export over the viewer's filtered set
//!
//! # Roles
//!
//! Every user is either a regular user or a technician. Regular users see
//! only tickets they logged or that were logged on their behalf; technicians
//! see everything and are the only role allowed to resolve, delete, or export.
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk::core::TicketBuilder;
//! use helpdesk::storage::{FileStore, TicketStore};
//!
//! let store = FileStore::new(".helpdesk");
//! let ticket = TicketBuilder::new()
//!     .title("Printer jam")
//!     .description("Tray 2 stuck")
//!     .logged_by(user.id, user.display_name())
//!     .build();
//! let id = store.create(ticket)?;
//! ```

pub mod access;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod report;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HelpdeskError, Result};
