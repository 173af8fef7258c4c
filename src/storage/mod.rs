//! Storage layer: the path-addressed ticket/user store
//!
//! The store exclusively owns ticket records and user directory entries.
//! Reads are snapshot-based; mutations push fresh snapshots to any active
//! subscription on the affected path. All failures surface immediately with
//! no automatic retry.

mod error;
mod file;
mod store;
mod watch;

pub use error::StoreError;
pub use file::FileStore;
pub use store::{ListCallback, TicketCallback, TicketStore};
pub use watch::Subscription;

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
