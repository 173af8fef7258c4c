//! Ticket lifecycle state machine
//!
//! Two states: `open` (initial) and `resolved` (terminal). Resolving is an
//! idempotent overwrite; marking an already-resolved ticket resolved again
//! is a side-effect-free success. No reopen transition is exposed.

use crate::core::{Status, Ticket};

/// Outcome of a resolve request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The ticket moved from open to resolved and must be written back
    Resolved,
    /// The ticket was already resolved; nothing to write
    AlreadyResolved,
}

impl Transition {
    /// Whether the caller needs to persist the ticket
    #[must_use]
    pub const fn needs_write(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl Status {
    /// Valid transitions: only `open -> resolved`
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Open, Self::Resolved))
    }
}

/// Mark a ticket resolved, idempotently
///
/// The caller is responsible for the role check; this function only applies
/// the transition. If the underlying write later fails, the ticket stays
/// unresolved until a live subscription confirms the true state.
pub fn resolve(ticket: &mut Ticket) -> Transition {
    if !ticket.status.can_transition_to(Status::Resolved) {
        return Transition::AlreadyResolved;
    }
    ticket.status = Status::Resolved;
    Transition::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TicketBuilder, UserId};

    fn open_ticket() -> Ticket {
        TicketBuilder::new()
            .title("Printer jam")
            .description("Tray 2 stuck")
            .logged_by(UserId::new(), "jo@example.com")
            .build()
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut ticket = open_ticket();

        assert_eq!(resolve(&mut ticket), Transition::Resolved);
        assert_eq!(ticket.status, Status::Resolved);

        // Second call succeeds without changing anything
        assert_eq!(resolve(&mut ticket), Transition::AlreadyResolved);
        assert_eq!(ticket.status, Status::Resolved);
    }

    #[test]
    fn test_resolved_is_terminal() {
        assert!(Status::Open.can_transition_to(Status::Resolved));
        assert!(!Status::Resolved.can_transition_to(Status::Open));
        assert!(!Status::Open.can_transition_to(Status::Open));
        assert!(!Status::Resolved.can_transition_to(Status::Resolved));
    }

    #[test]
    fn test_only_changed_transitions_need_a_write() {
        assert!(Transition::Resolved.needs_write());
        assert!(!Transition::AlreadyResolved.needs_write());
    }
}
