//! Shared handler state: the fixed allow-list and the set of users who ran `/start`.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Immutable set of user ids allowed to use the bot.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allowed_users: HashSet<i64>,
}

impl AccessPolicy {
    pub fn new(allowed_users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed_users: allowed_users.into_iter().collect(),
        }
    }

    pub fn is_authorized(&self, user_id: i64) -> bool {
        self.allowed_users.contains(&user_id)
    }
}

/// In-memory set of started users. Entries are never removed; state lasts for the process only.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    started: Arc<RwLock<HashSet<i64>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `user_id` as started. Returns false when it already was.
    pub async fn mark_started(&self, user_id: i64) -> bool {
        self.started.write().await.insert(user_id)
    }

    pub async fn is_started(&self, user_id: i64) -> bool {
        self.started.read().await.contains(&user_id)
    }

    pub async fn len(&self) -> usize {
        self.started.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.started.read().await.is_empty()
    }
}

/// Context injected into [`crate::StartHandler`] and [`crate::RelayHandler`].
#[derive(Debug, Clone)]
pub struct RelayContext {
    pub access: Arc<AccessPolicy>,
    pub sessions: SessionStore,
}

impl RelayContext {
    pub fn new(access: AccessPolicy) -> Self {
        Self {
            access: Arc::new(access),
            sessions: SessionStore::new(),
        }
    }
}
