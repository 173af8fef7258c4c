//! In-process change subscriptions for store paths
//!
//! Mirrors the push contract of a realtime backend: a subscriber gets the
//! full current snapshot when it attaches and after every subsequent change
//! at its path. A [`Subscription`] releases its listener unconditionally on
//! drop, including on error paths, so a torn-down view can never receive
//! further updates.

use super::store::{ListCallback, TicketCallback};
use crate::core::{Ticket, TicketId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

#[derive(Default)]
struct Listeners {
    next_token: u64,
    list: HashMap<u64, ListCallback>,
    single: HashMap<TicketId, HashMap<u64, TicketCallback>>,
}

enum Target {
    List(u64),
    Single(TicketId, u64),
}

/// Handle keeping a store subscription alive
///
/// Dropping the handle detaches the listener. There is no other way to
/// unsubscribe; acquisition and release are strictly scoped.
pub struct Subscription {
    registry: Weak<Mutex<Listeners>>,
    target: Target,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut listeners) = registry.lock() else {
            return;
        };
        match &self.target {
            Target::List(token) => {
                listeners.list.remove(token);
            },
            Target::Single(id, token) => {
                if let Some(slots) = listeners.single.get_mut(id) {
                    slots.remove(token);
                    if slots.is_empty() {
                        listeners.single.remove(id);
                    }
                }
            },
        }
    }
}

/// Registry of active listeners, shared by all handles to one store
///
/// Callbacks run while the registry lock is held; they must not subscribe
/// or unsubscribe from inside the callback.
#[derive(Clone, Default)]
pub(super) struct WatchRegistry {
    inner: Arc<Mutex<Listeners>>,
}

impl WatchRegistry {
    fn next_token(listeners: &mut Listeners) -> u64 {
        let token = listeners.next_token;
        listeners.next_token += 1;
        token
    }

    pub fn watch_list(&self, callback: ListCallback) -> Subscription {
        let mut listeners = self.inner.lock().expect("watch registry poisoned");
        let token = Self::next_token(&mut listeners);
        listeners.list.insert(token, callback);
        Subscription {
            registry: Arc::downgrade(&self.inner),
            target: Target::List(token),
        }
    }

    pub fn watch_ticket(&self, id: TicketId, callback: TicketCallback) -> Subscription {
        let mut listeners = self.inner.lock().expect("watch registry poisoned");
        let token = Self::next_token(&mut listeners);
        listeners.single.entry(id).or_default().insert(token, callback);
        Subscription {
            registry: Arc::downgrade(&self.inner),
            target: Target::Single(id, token),
        }
    }

    pub fn notify_list(&self, snapshot: &[Ticket]) {
        let listeners = self.inner.lock().expect("watch registry poisoned");
        for callback in listeners.list.values() {
            callback(snapshot);
        }
    }

    pub fn notify_ticket(&self, id: &TicketId, snapshot: &Ticket) {
        let listeners = self.inner.lock().expect("watch registry poisoned");
        if let Some(slots) = listeners.single.get(id) {
            for callback in slots.values() {
                callback(snapshot);
            }
        }
    }

    /// Number of live listeners, used by tests
    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        let listeners = self.inner.lock().expect("watch registry poisoned");
        listeners.list.len() + listeners.single.values().map(HashMap::len).sum::<usize>()
    }
}
