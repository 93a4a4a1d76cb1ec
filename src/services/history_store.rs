//! Per-user watch-history storage behind a trait, so the web layer never
//! holds mutable user state itself. The in-memory implementation lives for
//! the process only; a persistent backend can slot in behind the same trait.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::AppResult;

/// A user's accumulated watched-video ids and when they last uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub video_ids: HashSet<String>,
    pub last_upload: DateTime<Utc>,
}

/// Key-value store of watch history per user id
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    async fn get(&self, user_id: &str) -> AppResult<Option<HistoryRecord>>;

    /// Set-union merges the given ids into the user's record and refreshes
    /// the upload timestamp. Returns the updated record.
    async fn merge(&self, user_id: &str, video_ids: Vec<String>) -> AppResult<HistoryRecord>;
}

/// Process-local store. Contents are lost on restart, which mirrors the
/// documented lack of a persistence tier.
#[derive(Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<RwLock<HashMap<String, HistoryRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn get(&self, user_id: &str) -> AppResult<Option<HistoryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.get(user_id).cloned())
    }

    async fn merge(&self, user_id: &str, video_ids: Vec<String>) -> AppResult<HistoryRecord> {
        let mut inner = self.inner.write().await;
        let record = inner
            .entry(user_id.to_string())
            .or_insert_with(|| HistoryRecord {
                video_ids: HashSet::new(),
                last_upload: Utc::now(),
            });
        record.video_ids.extend(video_ids);
        record.last_upload = Utc::now();
        Ok(record.clone())
    }
}
