//! Test utilities
//!
//! Common fixtures shared by unit tests across the crate.

#![cfg(test)]

use crate::auth::{AuthProvider, FileAuth, Session};
use crate::cli::handlers::base::HandlerContext;
use crate::config::Config;
use crate::core::{Role, Ticket, TicketBuilder, User};
use crate::storage::{FileStore, TicketStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture wrapping a temporary, initialized helpdesk directory
pub struct TestDesk {
    pub temp_dir: TempDir,
    pub data_dir: PathBuf,
    pub store: FileStore,
    pub auth: FileAuth,
}

impl TestDesk {
    /// Create a fresh desk with an empty store and no accounts
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".helpdesk");
        let store = FileStore::init(&data_dir).expect("Failed to init store");
        let auth = FileAuth::new(&data_dir);

        Self {
            temp_dir,
            data_dir,
            store,
            auth,
        }
    }

    /// A handler context rooted at the fixture directory
    pub fn context(&self) -> HandlerContext {
        HandlerContext {
            root: self.temp_dir.path().to_path_buf(),
            config: Config::default(),
            store: FileStore::new(&self.data_dir),
            auth: FileAuth::new(&self.data_dir),
        }
    }

    /// Register a regular user in the directory (no credentials)
    pub fn create_regular_user(&self, email: &str) -> User {
        self.create_user(email, Role::Regular)
    }

    /// Register a technician in the directory (no credentials)
    pub fn create_technician(&self, email: &str) -> User {
        self.create_user(email, Role::Technician)
    }

    fn create_user(&self, email: &str, role: Role) -> User {
        let local = email.split('@').next().unwrap_or(email);
        let user = User::new(capitalize(local), "Test", email, role);
        self.store.save_user(&user).expect("Failed to save user");
        user
    }

    /// Register a user together with sign-in credentials
    pub fn create_account(&self, email: &str, password: &str, role: Role) -> User {
        let user = self.create_user(email, role);
        self.auth
            .sign_up(&user, password)
            .expect("Failed to create account");
        user
    }

    /// A session as if the given user had just signed in
    pub fn session_for(&self, user: &User) -> Session {
        Session::for_user(user)
    }

    /// Create and save a ticket logged by the given user
    pub fn log_ticket(&self, title: &str, creator: &User) -> Ticket {
        let ticket = ticket_logged_by(title, creator);
        self.store
            .create(ticket.clone())
            .expect("Failed to save ticket");
        ticket
    }

    /// Create and save a ticket logged by a technician for a beneficiary
    pub fn log_ticket_for(&self, title: &str, creator: &User, beneficiary: &User) -> Ticket {
        let ticket = TicketBuilder::new()
            .title(title)
            .description(format!("Description for {title}"))
            .logged_by(creator.id, creator.display_name())
            .logged_for(beneficiary.id)
            .build();
        self.store
            .create(ticket.clone())
            .expect("Failed to save ticket");
        ticket
    }
}

/// Build a ticket without saving it
pub fn ticket_logged_by(title: &str, creator: &User) -> Ticket {
    TicketBuilder::new()
        .title(title)
        .description(format!("Description for {title}"))
        .logged_by(creator.id, creator.display_name())
        .build()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_creation() {
        let desk = TestDesk::new();
        assert!(FileStore::is_initialized(&desk.data_dir));
    }

    #[test]
    fn test_users_land_in_the_directory() {
        let desk = TestDesk::new();
        desk.create_regular_user("alice@example.com");
        desk.create_technician("tech@example.com");

        let users = desk.store.load_all_users().unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_logged_tickets_are_persisted() {
        let desk = TestDesk::new();
        let alice = desk.create_regular_user("alice@example.com");
        let ticket = desk.log_ticket("Printer jam", &alice);

        let loaded = desk.store.load(&ticket.id).unwrap();
        assert_eq!(loaded.logged_by_uid, alice.id);
    }
}
