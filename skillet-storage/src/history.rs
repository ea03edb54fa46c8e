//! In-memory search history store.
//!
//! An append-only log behind an RwLock. Entries are scoped to a user;
//! the only delete path is the caller-scoped bulk clear.

use crate::traits::SearchHistoryStore;
use async_trait::async_trait;
use skillet_core::{EntityId, SearchHistoryEntry, SkilletError, SkilletResult, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory history log.
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<Vec<SearchHistoryEntry>>>,
}

impl InMemoryHistoryStore {
    /// Create a new empty history store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of entries across all users.
    pub fn len(&self) -> SkilletResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        Ok(entries.len())
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> SkilletResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryHistoryStore {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[async_trait]
impl SearchHistoryStore for InMemoryHistoryStore {
    async fn history_insert(&self, entry: &SearchHistoryEntry) -> SkilletResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn history_list_recent(
        &self,
        user_id: EntityId,
        limit: i32,
    ) -> SkilletResult<Vec<SearchHistoryEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;

        let mut mine: Vec<SearchHistoryEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        // history_id is UUIDv7, so it breaks same-millisecond timestamp ties.
        mine.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.history_id.cmp(&a.history_id))
        });
        mine.truncate(limit.max(0) as usize);
        Ok(mine)
    }

    async fn history_clear(&self, user_id: EntityId) -> SkilletResult<i64> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let before = entries.len();
        entries.retain(|e| e.user_id != user_id);
        Ok((before - entries.len()) as i64)
    }

    async fn history_top_queries(&self, limit: i32) -> SkilletResult<Vec<(String, i64)>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;

        let mut counts: HashMap<&str, i64> = HashMap::new();
        for entry in entries.iter() {
            *counts.entry(entry.query.as_str()).or_insert(0) += 1;
        }

        let mut top: Vec<(String, i64)> = counts
            .into_iter()
            .map(|(query, count)| (query.to_string(), count))
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top.truncate(limit.max(0) as usize);
        Ok(top)
    }

    async fn health_check(&self) -> SkilletResult<bool> {
        self.entries
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        Ok(true)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use skillet_core::new_entity_id;

    fn entry(user_id: EntityId, query: &str, age_minutes: i64) -> SearchHistoryEntry {
        SearchHistoryEntry {
            history_id: new_entity_id(),
            user_id,
            query: query.to_string(),
            result_count: 3,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_limited() {
        let store = InMemoryHistoryStore::new();
        let user = new_entity_id();
        for i in 0..5 {
            store.history_insert(&entry(user, &format!("query {i}"), i)).await.unwrap();
        }

        let recent = store.history_list_recent(user, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].query, "query 0");
        assert_eq!(recent[2].query, "query 2");
    }

    #[tokio::test]
    async fn test_list_recent_scoped_to_user() {
        let store = InMemoryHistoryStore::new();
        let me = new_entity_id();
        let other = new_entity_id();
        store.history_insert(&entry(me, "mine", 1)).await.unwrap();
        store.history_insert(&entry(other, "theirs", 1)).await.unwrap();

        let recent = store.history_list_recent(me, 20).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].query, "mine");
    }

    #[tokio::test]
    async fn test_clear_removes_only_that_user() {
        let store = InMemoryHistoryStore::new();
        let me = new_entity_id();
        let other = new_entity_id();
        store.history_insert(&entry(me, "a", 1)).await.unwrap();
        store.history_insert(&entry(me, "b", 2)).await.unwrap();
        store.history_insert(&entry(other, "c", 1)).await.unwrap();

        let removed = store.history_clear(me).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.history_list_recent(me, 20).await.unwrap().is_empty());
        assert_eq!(store.history_list_recent(other, 20).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_on_empty_returns_zero() {
        let store = InMemoryHistoryStore::new();
        assert_eq!(store.history_clear(new_entity_id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_top_queries_by_frequency_with_text_tiebreak() {
        let store = InMemoryHistoryStore::new();
        let a = new_entity_id();
        let b = new_entity_id();
        for _ in 0..3 {
            store.history_insert(&entry(a, "pasta", 1)).await.unwrap();
        }
        store.history_insert(&entry(b, "pasta", 1)).await.unwrap();
        store.history_insert(&entry(a, "bread", 1)).await.unwrap();
        store.history_insert(&entry(b, "apple", 1)).await.unwrap();

        let top = store.history_top_queries(10).await.unwrap();
        assert_eq!(top[0], ("pasta".to_string(), 4));
        // Frequency tie between "apple" and "bread" falls back to text order.
        assert_eq!(top[1], ("apple".to_string(), 1));
        assert_eq!(top[2], ("bread".to_string(), 1));
    }

    #[tokio::test]
    async fn test_top_queries_respects_limit() {
        let store = InMemoryHistoryStore::new();
        let user = new_entity_id();
        for i in 0..15 {
            store.history_insert(&entry(user, &format!("query {i}"), 1)).await.unwrap();
        }

        let top = store.history_top_queries(10).await.unwrap();
        assert_eq!(top.len(), 10);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = InMemoryHistoryStore::new();
        assert!(store.health_check().await.unwrap());
    }
}
