use super::{Comment, LoggedAt, Status, Ticket, TicketId, UserId};

/// Builder for creating Ticket instances
///
/// The `is_logged_by_tech` flag is derived from the presence of a
/// beneficiary, so a record violating that invariant cannot be built.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    title: Option<String>,
    description: Option<String>,
    status: Option<Status>,
    created_at: Option<LoggedAt>,
    logged_by_uid: Option<UserId>,
    logged_by: Option<String>,
    logged_for: Option<UserId>,
    comments: Vec<Comment>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID (the store assigns one when absent)
    #[must_use]
    pub const fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub fn created_at(mut self, created_at: LoggedAt) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the authenticated creator and their display string
    #[must_use]
    pub fn logged_by(mut self, uid: UserId, display: impl Into<String>) -> Self {
        self.logged_by_uid = Some(uid);
        self.logged_by = Some(display.into());
        self
    }

    /// Set the beneficiary the ticket is logged on behalf of
    #[must_use]
    pub const fn logged_for(mut self, beneficiary: UserId) -> Self {
        self.logged_for = Some(beneficiary);
        self
    }

    /// Add a comment
    #[must_use]
    pub fn comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        Ticket {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            logged_by_uid: self.logged_by_uid.unwrap_or_default(),
            logged_by: self.logged_by.unwrap_or_default(),
            is_logged_by_tech: self.logged_for.is_some(),
            logged_for: self.logged_for,
            comments: self.comments,
        }
    }
}
