//! Search history recording and read paths.

use std::sync::Arc;

use skillet_core::{new_entity_id, EntityId, SearchHistoryEntry, SearchSuggestion, SkilletResult};
use skillet_storage::SearchHistoryStore;

use crate::config::SearchConfig;

/// Records executed searches and serves the recent/popular read paths.
///
/// Writes are detached from the response path: a failed insert is
/// logged at warn and dropped, never surfaced to the caller.
#[derive(Clone)]
pub struct HistoryRecorder {
    store: Arc<dyn SearchHistoryStore>,
    page_size: i32,
    popular_size: i32,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn SearchHistoryStore>, config: &SearchConfig) -> Self {
        Self {
            store,
            page_size: config.history_page_size,
            popular_size: config.popular_page_size,
        }
    }

    /// Spawn a detached write for one executed search. Stores the
    /// original query text, not the normalized form.
    pub fn record_detached(&self, user_id: EntityId, query: String, result_count: i32) {
        let store = self.store.clone();
        tokio::spawn(async move {
            let entry = SearchHistoryEntry {
                history_id: new_entity_id(),
                user_id,
                query,
                result_count,
                created_at: chrono::Utc::now(),
            };
            if let Err(e) = store.history_insert(&entry).await {
                tracing::warn!(user_id = %user_id, error = %e, "search history write dropped");
            }
        });
    }

    /// Most recent searches for one user, newest first.
    pub async fn recent(&self, user_id: EntityId) -> SkilletResult<Vec<SearchHistoryEntry>> {
        self.store
            .history_list_recent(user_id, self.page_size)
            .await
    }

    /// Delete the user's entire history. Returns whether anything was
    /// removed.
    pub async fn clear(&self, user_id: EntityId) -> SkilletResult<bool> {
        let removed = self.store.history_clear(user_id).await?;
        Ok(removed > 0)
    }

    /// Most frequent queries across all users, untagged by kind.
    pub async fn popular(&self) -> SkilletResult<Vec<SearchSuggestion>> {
        let top = self.store.history_top_queries(self.popular_size).await?;
        Ok(top
            .into_iter()
            .map(|(text, count)| SearchSuggestion {
                text,
                kind: None,
                count: count as i32,
            })
            .collect())
    }

    /// Whether the history backend is reachable.
    pub async fn ping(&self) -> SkilletResult<bool> {
        self.store.health_check().await
    }
}
