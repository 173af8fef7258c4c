use super::{StoreResult, Subscription};
use crate::core::{Comment, CommentId, Status, Ticket, TicketId, User, UserId};

/// Callback receiving the full ticket-list snapshot at its path
pub type ListCallback = Box<dyn Fn(&[Ticket]) + Send>;

/// Callback receiving a single ticket's snapshot
pub type TicketCallback = Box<dyn Fn(&Ticket) + Send>;

/// Contract the helpdesk core requires from its backing store
///
/// Record ordering across `load_all` is the store's own key order, which is
/// not chronological unless the id encodes time. Concurrent writes to the
/// same path are serialized by the store with last-write-wins semantics;
/// no optimistic-concurrency token is used.
pub trait TicketStore: Send + Sync {
    /// Persist a new ticket, validating its invariants first
    ///
    /// The record keeps the identity and creation timestamp it arrived with;
    /// the builder assigns both when the caller did not.
    fn create(&self, ticket: Ticket) -> StoreResult<TicketId>;

    /// Load a ticket by id
    fn load(&self, id: &TicketId) -> StoreResult<Ticket>;

    /// Load every ticket, in key order
    fn load_all(&self) -> StoreResult<Vec<Ticket>>;

    /// Merge-style partial update of a ticket's status
    fn update_status(&self, id: &TicketId, status: Status) -> StoreResult<()>;

    /// Hard delete; there is no soft-delete or tombstone
    fn remove(&self, id: &TicketId) -> StoreResult<()>;

    /// Ordered append of a comment under a ticket
    fn append_comment(&self, id: &TicketId, comment: Comment) -> StoreResult<CommentId>;

    /// Write a user directory entry
    fn save_user(&self, user: &User) -> StoreResult<()>;

    /// Load a user directory entry
    fn load_user(&self, id: &UserId) -> StoreResult<User>;

    /// Load the whole user directory, in key order
    fn load_all_users(&self) -> StoreResult<Vec<User>>;

    /// Subscribe to the ticket list
    ///
    /// Delivers the current snapshot immediately, then again after every
    /// mutation of the ticket tree, until the returned [`Subscription`] is
    /// dropped.
    fn subscribe_tickets(&self, callback: ListCallback) -> StoreResult<Subscription>;

    /// Subscribe to a single ticket (including its comments)
    fn subscribe_ticket(&self, id: &TicketId, callback: TicketCallback)
    -> StoreResult<Subscription>;
}
