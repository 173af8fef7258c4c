//! File-backed implementation of the store contract
//!
//! One YAML file per record: tickets under `<root>/tickets/`, user directory
//! entries under `<root>/users/`. Key order is the lexicographic order of
//! record ids. A single write lock serializes concurrent writes to the
//! store; whole-record updates are last-write-wins.

use super::store::{ListCallback, TicketCallback, TicketStore};
use super::watch::{Subscription, WatchRegistry};
use super::{StoreError, StoreResult};
use crate::core::{Comment, CommentId, Status, Ticket, TicketId, User, UserId};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, mpsc};
use tracing::debug;

pub struct FileStore {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
    watchers: WatchRegistry,
}

impl FileStore {
    /// Open a store rooted at an existing data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
            watchers: WatchRegistry::default(),
        }
    }

    /// Create the store layout and open it
    pub fn init(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(root);
        fs::create_dir_all(store.tickets_dir())
            .map_err(|e| StoreError::write("tickets", e))?;
        fs::create_dir_all(store.users_dir()).map_err(|e| StoreError::write("users", e))?;
        Ok(store)
    }

    /// Whether a store layout exists at the given root
    #[must_use]
    pub fn is_initialized(root: &Path) -> bool {
        root.join("tickets").is_dir() && root.join("users").is_dir()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tickets_dir(&self) -> PathBuf {
        self.root.join("tickets")
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.yaml"))
    }

    fn user_path(&self, id: &UserId) -> PathBuf {
        self.users_dir().join(format!("{id}.yaml"))
    }

    fn read_record<T: serde::de::DeserializeOwned>(path: &Path, key: &str) -> StoreResult<T> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::not_found(key)
            } else {
                StoreError::write(key, e)
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| StoreError::write(key, e))
    }

    fn write_record<T: serde::Serialize>(path: &Path, key: &str, record: &T) -> StoreResult<()> {
        let content = serde_yaml::to_string(record).map_err(|e| StoreError::write(key, e))?;
        fs::write(path, content).map_err(|e| StoreError::write(key, e))
    }

    fn load_dir<T: serde::de::DeserializeOwned>(dir: &Path, key: &str) -> StoreResult<Vec<T>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::not_found(key)
            } else {
                StoreError::write(key, e)
            }
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        // Key order: lexicographic by record id, not chronological
        paths.sort();

        paths
            .iter()
            .map(|path| Self::read_record(path, key))
            .collect()
    }

    /// Push the current ticket-list snapshot to list subscribers
    fn publish_tickets(&self) {
        match self.load_all() {
            Ok(snapshot) => self.watchers.notify_list(&snapshot),
            Err(e) => debug!("skipping list notification: {e}"),
        }
    }

    /// Push a single ticket's snapshot to its subscribers
    fn publish_ticket(&self, id: &TicketId) {
        match self.load(id) {
            Ok(snapshot) => self.watchers.notify_ticket(id, &snapshot),
            Err(e) => debug!("skipping ticket notification for {id}: {e}"),
        }
    }

    /// Read the current ticket-list snapshot through a one-shot subscription
    ///
    /// Equivalent to subscribing, taking the initial delivery, and releasing
    /// the subscription immediately.
    pub fn snapshot_once(&self) -> StoreResult<Vec<Ticket>> {
        let (tx, rx) = mpsc::channel();
        let subscription = self.subscribe_tickets(Box::new(move |snapshot| {
            let _ = tx.send(snapshot.to_vec());
        }))?;
        drop(subscription);
        rx.try_recv()
            .map_err(|_| StoreError::write("tickets", "initial snapshot was not delivered"))
    }
}

impl TicketStore for FileStore {
    fn create(&self, ticket: Ticket) -> StoreResult<TicketId> {
        let id = ticket.id;
        let key = format!("tickets/{id}");
        ticket
            .validate()
            .map_err(|e| StoreError::write(&key, e))?;

        {
            let _guard = self.write_lock.lock().expect("store write lock poisoned");
            let path = self.ticket_path(&id);
            if path.exists() {
                return Err(StoreError::write(&key, "record already exists"));
            }
            Self::write_record(&path, &key, &ticket)?;
        }
        debug!(ticket = %id, "created ticket");
        self.publish_tickets();
        Ok(id)
    }

    fn load(&self, id: &TicketId) -> StoreResult<Ticket> {
        Self::read_record(&self.ticket_path(id), &format!("tickets/{id}"))
    }

    fn load_all(&self) -> StoreResult<Vec<Ticket>> {
        Self::load_dir(&self.tickets_dir(), "tickets")
    }

    fn update_status(&self, id: &TicketId, status: Status) -> StoreResult<()> {
        {
            let _guard = self.write_lock.lock().expect("store write lock poisoned");
            let key = format!("tickets/{id}");
            let path = self.ticket_path(id);
            let mut ticket: Ticket = Self::read_record(&path, &key)?;
            ticket.status = status;
            Self::write_record(&path, &key, &ticket)?;
        }
        debug!(ticket = %id, %status, "updated ticket status");
        self.publish_ticket(id);
        self.publish_tickets();
        Ok(())
    }

    fn remove(&self, id: &TicketId) -> StoreResult<()> {
        {
            let _guard = self.write_lock.lock().expect("store write lock poisoned");
            let key = format!("tickets/{id}");
            let path = self.ticket_path(id);
            if !path.exists() {
                return Err(StoreError::not_found(&key));
            }
            fs::remove_file(&path).map_err(|e| StoreError::write(&key, e))?;
        }
        debug!(ticket = %id, "removed ticket");
        self.publish_tickets();
        Ok(())
    }

    fn append_comment(&self, id: &TicketId, comment: Comment) -> StoreResult<CommentId> {
        let comment_id = comment.id;
        {
            let _guard = self.write_lock.lock().expect("store write lock poisoned");
            let key = format!("tickets/{id}/comments");
            let path = self.ticket_path(id);
            let mut ticket: Ticket =
                Self::read_record(&path, &format!("tickets/{id}"))?;
            ticket.comments.push(comment);
            Self::write_record(&path, &key, &ticket)?;
        }
        debug!(ticket = %id, comment = %comment_id, "appended comment");
        self.publish_ticket(id);
        self.publish_tickets();
        Ok(comment_id)
    }

    fn save_user(&self, user: &User) -> StoreResult<()> {
        let _guard = self.write_lock.lock().expect("store write lock poisoned");
        let key = format!("users/{}", user.id);
        Self::write_record(&self.user_path(&user.id), &key, user)
    }

    fn load_user(&self, id: &UserId) -> StoreResult<User> {
        Self::read_record(&self.user_path(id), &format!("users/{id}"))
    }

    fn load_all_users(&self) -> StoreResult<Vec<User>> {
        Self::load_dir(&self.users_dir(), "users")
    }

    fn subscribe_tickets(&self, callback: ListCallback) -> StoreResult<Subscription> {
        let snapshot = self.load_all()?;
        callback(&snapshot);
        Ok(self.watchers.watch_list(callback))
    }

    fn subscribe_ticket(
        &self,
        id: &TicketId,
        callback: TicketCallback,
    ) -> StoreResult<Subscription> {
        let snapshot = self.load(id)?;
        callback(&snapshot);
        Ok(self.watchers.watch_ticket(*id, callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketBuilder;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::init(temp_dir.path().join(".helpdesk")).unwrap();
        (temp_dir, store)
    }

    fn sample_ticket(title: &str) -> Ticket {
        TicketBuilder::new()
            .title(title)
            .description(format!("Description for {title}"))
            .logged_by(UserId::new(), "jo@example.com")
            .build()
    }

    #[test]
    fn test_create_and_load_round_trip() {
        let (_dir, store) = open_store();
        let ticket = sample_ticket("Printer jam");
        let id = store.create(ticket.clone()).unwrap();

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded, ticket);
    }

    #[test]
    fn test_create_rejects_invalid_records() {
        let (_dir, store) = open_store();
        let mut ticket = sample_ticket("Broken");
        ticket.is_logged_by_tech = true; // no beneficiary set

        let err = store.create(ticket).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_load_missing_ticket_is_not_found() {
        let (_dir, store) = open_store();
        let err = store.load(&TicketId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_all_returns_key_order() {
        let (_dir, store) = open_store();
        for i in 0..3 {
            store.create(sample_ticket(&format!("Ticket {i}"))).unwrap();
        }

        let tickets = store.load_all().unwrap();
        assert_eq!(tickets.len(), 3);
        let mut ids: Vec<String> = tickets.iter().map(|t| t.id.to_string()).collect();
        let sorted = {
            let mut s = ids.clone();
            s.sort();
            s
        };
        assert_eq!(ids, sorted);
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_update_status_is_partial() {
        let (_dir, store) = open_store();
        let id = store.create(sample_ticket("VPN down")).unwrap();

        store.update_status(&id, Status::Resolved).unwrap();

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded.status, Status::Resolved);
        assert_eq!(loaded.title, "VPN down");
    }

    #[test]
    fn test_remove_is_hard_delete() {
        let (_dir, store) = open_store();
        let id = store.create(sample_ticket("Old")).unwrap();

        store.remove(&id).unwrap();
        assert!(store.load(&id).unwrap_err().is_not_found());
        assert!(store.remove(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_append_comment_keeps_other_fields() {
        let (_dir, store) = open_store();
        let id = store.create(sample_ticket("Printer jam")).unwrap();

        store
            .append_comment(&id, Comment::new("On it", "tech@example.com"))
            .unwrap();
        store
            .append_comment(&id, Comment::new("Fixed", "tech@example.com"))
            .unwrap();

        let loaded = store.load(&id).unwrap();
        assert_eq!(loaded.comments.len(), 2);
        assert_eq!(loaded.comments[0].text, "On it");
        assert_eq!(loaded.comments[1].text, "Fixed");
        assert_eq!(loaded.status, Status::Open);
        assert_eq!(loaded.title, "Printer jam");
    }

    #[test]
    fn test_subscription_delivers_initial_and_updated_snapshots() {
        let (_dir, store) = open_store();
        store.create(sample_ticket("First")).unwrap();

        let (tx, rx) = mpsc::channel();
        let subscription = store
            .subscribe_tickets(Box::new(move |snapshot| {
                let _ = tx.send(snapshot.len());
            }))
            .unwrap();

        // Initial snapshot arrives on subscribe
        assert_eq!(rx.recv().unwrap(), 1);

        store.create(sample_ticket("Second")).unwrap();
        assert_eq!(rx.recv().unwrap(), 2);

        drop(subscription);
        store.create(sample_ticket("Third")).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_single_ticket_subscription_sees_comments() {
        let (_dir, store) = open_store();
        let id = store.create(sample_ticket("Watched")).unwrap();

        let (tx, rx) = mpsc::channel();
        let _subscription = store
            .subscribe_ticket(
                &id,
                Box::new(move |ticket| {
                    let _ = tx.send(ticket.comments.len());
                }),
            )
            .unwrap();

        assert_eq!(rx.recv().unwrap(), 0);
        store
            .append_comment(&id, Comment::new("Looking", "tech@example.com"))
            .unwrap();
        assert_eq!(rx.recv().unwrap(), 1);
    }

    #[test]
    fn test_snapshot_once_reads_current_state() {
        let (_dir, store) = open_store();
        assert!(store.snapshot_once().unwrap().is_empty());

        store.create(sample_ticket("One")).unwrap();
        assert_eq!(store.snapshot_once().unwrap().len(), 1);
    }

    #[test]
    fn test_user_directory_round_trip() {
        let (_dir, store) = open_store();
        let user = User::new("Ada", "Lovelace", "ada@example.com", crate::core::Role::Technician);

        store.save_user(&user).unwrap();
        assert_eq!(store.load_user(&user.id).unwrap(), user);
        assert_eq!(store.load_all_users().unwrap().len(), 1);

        let missing = store.load_user(&UserId::new()).unwrap_err();
        assert!(missing.is_not_found());
    }
}
