// ── Directory abstraction ──
//
// The single entry point consumers use: one fetch to populate the
// working collection, local-only deletes, and POST-backed appends.
// Failures are returned, never retried.

use std::sync::Arc;

use tracing::{debug, info, warn};

use roster_api::{NewUserRequest, TransportConfig, UserClient};

use crate::config::DirectoryConfig;
use crate::error::CoreError;
use crate::model::{User, UserDraft, UserId};
use crate::store::UserStore;
use crate::stream::UserStream;
use crate::view::{ViewQuery, derive_view};

/// Handle to a remote user directory and its local working collection.
///
/// Cheaply cloneable via `Arc<DirectoryInner>`. Dropping the last clone
/// drops the working collection.
#[derive(Clone)]
pub struct Directory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    config: DirectoryConfig,
    client: UserClient,
    store: Arc<UserStore>,
}

impl Directory {
    /// Create a directory from configuration. Does NOT fetch: call
    /// [`load()`](Self::load) to populate the working collection.
    pub fn new(config: DirectoryConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = UserClient::new(
            config.list_url.clone(),
            config.create_url.clone(),
            &transport,
        )?;
        Ok(Self::with_client(config, client))
    }

    /// Create a directory around a pre-built client.
    pub fn with_client(config: DirectoryConfig, client: UserClient) -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                config,
                client,
                store: Arc::new(UserStore::new()),
            }),
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<UserStore> {
        &self.inner.store
    }

    // ── Remote operations ────────────────────────────────────────

    /// Fetch the user list and replace the working collection with it.
    ///
    /// On failure the working collection is left exactly as it was.
    /// Returns the number of records loaded.
    pub async fn load(&self) -> Result<usize, CoreError> {
        debug!(url = %self.inner.config.list_url, "loading users");

        let records = self.inner.client.list_users().await?;
        let users: Vec<User> = records.into_iter().map(User::from).collect();
        let count = users.len();

        self.inner.store.replace_all(users);
        info!(count, "loaded users");
        Ok(count)
    }

    /// Submit a draft and append the server's record to the working
    /// collection.
    ///
    /// An incomplete draft fails with [`CoreError::IncompleteDraft`]
    /// before any request is made. On a request failure nothing changes.
    pub async fn add(&self, draft: &UserDraft) -> Result<Arc<User>, CoreError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::IncompleteDraft { missing });
        }

        let request = NewUserRequest::from(draft);
        let record = self.inner.client.create_user(&request).await?;
        let user = Arc::new(User::from(record));
        let id = user.id;

        if self.inner.store.append(Arc::clone(&user)) {
            warn!(%id, "server returned an id already in the collection; appended anyway");
        }
        info!(%id, "added user");
        Ok(user)
    }

    // ── Local operations ─────────────────────────────────────────

    /// Remove the first record with `id` from the working collection.
    ///
    /// Never contacts the server. Absent ids are a no-op.
    pub fn delete(&self, id: UserId) -> Option<Arc<User>> {
        let removed = self.inner.store.remove(id);
        match &removed {
            Some(user) => info!(%id, name = %user.name, "deleted user locally"),
            None => debug!(%id, "delete ignored: no such user"),
        }
        removed
    }

    // ── Views ────────────────────────────────────────────────────

    /// The current working collection.
    pub fn users(&self) -> Arc<Vec<Arc<User>>> {
        self.inner.store.snapshot()
    }

    /// The current working collection, filtered and sorted.
    pub fn view(&self, query: &ViewQuery) -> Vec<Arc<User>> {
        derive_view(&self.users(), query)
    }

    pub fn subscribe(&self) -> UserStream {
        self.inner.store.subscribe()
    }
}
