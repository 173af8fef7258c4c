//! Access-control rules
//!
//! Pure decision logic: given a viewer and a ticket, decide visibility and
//! permitted actions. No side effects; every mutation handler checks here
//! before touching the store.

use crate::auth::Session;
use crate::core::{Role, Status, Ticket, UserId};

/// Whether the viewer may see the ticket at all
///
/// Regular users see a ticket iff they logged it or it was logged on their
/// behalf; there is no partial or redacted view. Technicians see everything.
#[must_use]
pub fn can_view(viewer: &Session, ticket: &Ticket) -> bool {
    match viewer.role {
        Role::Technician => true,
        Role::Regular => {
            ticket.logged_by_uid == viewer.user_id
                || ticket.logged_for == Some(viewer.user_id)
        },
    }
}

/// Whether the viewer may log a ticket for the given beneficiary
///
/// Anyone may log for themselves; only technicians may log on behalf of
/// another identity.
#[must_use]
pub fn can_create_for(viewer: &Session, beneficiary: Option<&UserId>) -> bool {
    match beneficiary {
        None => true,
        Some(id) if *id == viewer.user_id => true,
        Some(_) => viewer.role.is_technician(),
    }
}

/// Any authenticated viewer may comment on a ticket they can view
#[must_use]
pub fn can_comment(viewer: &Session, ticket: &Ticket) -> bool {
    can_view(viewer, ticket)
}

/// Only technicians change ticket status
#[must_use]
pub fn can_change_status(viewer: &Session, _ticket: &Ticket) -> bool {
    viewer.role.is_technician()
}

/// Only technicians delete tickets
#[must_use]
pub fn can_delete(viewer: &Session, _ticket: &Ticket) -> bool {
    viewer.role.is_technician()
}

/// Only technicians export reports
#[must_use]
pub fn can_export_report(viewer: &Session) -> bool {
    viewer.role.is_technician()
}

/// Filters applied on top of visibility
///
/// `logged_for` targets "tickets logged for X", never "tickets logged by X";
/// the asymmetry is deliberate. The search term matches title, description,
/// or the logged-by display string, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub logged_for: Option<UserId>,
}

impl TicketQuery {
    /// Whether the ticket passes both the visibility check and the filters
    #[must_use]
    pub fn matches(&self, viewer: &Session, ticket: &Ticket) -> bool {
        if !can_view(viewer, ticket) {
            return false;
        }
        if let Some(target) = &self.logged_for {
            if ticket.logged_for.as_ref() != Some(target) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            let matches_term = ticket.title.to_lowercase().contains(&term)
                || ticket.description.to_lowercase().contains(&term)
                || ticket.logged_by.to_lowercase().contains(&term);
            if !matches_term {
                return false;
            }
        }
        true
    }
}

/// The viewer's currently-visible, currently-filtered ticket set
#[must_use]
pub fn filter_visible(viewer: &Session, tickets: Vec<Ticket>, query: &TicketQuery) -> Vec<Ticket> {
    tickets
        .into_iter()
        .filter(|ticket| query.matches(viewer, ticket))
        .collect()
}
