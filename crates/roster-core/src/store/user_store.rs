// ── Working collection store ──
//
// Ordered user records published as immutable snapshots through a
// `watch` channel. Every mutation replaces the whole snapshot, so
// readers never observe a half-applied change.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{User, UserId};
use crate::stream::UserStream;

/// Reactive store for the working collection.
pub struct UserStore {
    snapshot: watch::Sender<Arc<Vec<Arc<User>>>>,
}

impl UserStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the whole collection with a freshly fetched one.
    pub fn replace_all(&self, users: Vec<User>) {
        let values: Vec<Arc<User>> = users.into_iter().map(Arc::new).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Remove the first record with `id`. Absent ids leave the store
    /// untouched and notify nobody.
    pub fn remove(&self, id: UserId) -> Option<Arc<User>> {
        let mut removed = None;
        self.snapshot.send_if_modified(|snap| {
            let Some(pos) = snap.iter().position(|u| u.id == id) else {
                return false;
            };
            let mut values = (**snap).clone();
            removed = Some(values.remove(pos));
            *snap = Arc::new(values);
            true
        });
        removed
    }

    /// Append a record at the end. Returns `true` if another record
    /// already carried the same id; the record is appended either way.
    pub fn append(&self, user: Arc<User>) -> bool {
        let mut collided = false;
        self.snapshot.send_modify(|snap| {
            collided = snap.iter().any(|u| u.id == user.id);
            let mut values = (**snap).clone();
            values.push(user);
            *snap = Arc::new(values);
        });
        collided
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<User>>> {
        self.snapshot.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> UserStream {
        UserStream::new(self.snapshot.subscribe())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
