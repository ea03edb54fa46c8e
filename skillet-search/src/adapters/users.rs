//! User profile search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};
use skillet_storage::{UserQuery, UserStore};

use crate::adapter::SearchAdapter;
use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

/// Searches profiles by username, email, and bio. Profiles have no
/// publication flag and ignore the content filters.
pub struct UserSearchAdapter {
    store: Arc<dyn UserStore>,
}

impl UserSearchAdapter {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchAdapter for UserSearchAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::User
    }

    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>> {
        let query = UserQuery {
            text: ctx.text.clone(),
            sort: ctx.sort,
            limit: ctx.limit,
            offset: ctx.offset,
        };
        let users = self.store.user_search(&query).await?;
        Ok(users.into_iter().map(SearchCandidate::User).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skillet_core::{new_entity_id, SearchRequest, UserProfile};
    use skillet_storage::InMemoryCatalog;

    #[tokio::test]
    async fn test_search_matches_bio_text() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert_user(UserProfile {
                user_id: new_entity_id(),
                username: "sourdough_sam".to_string(),
                email: "sam@example.com".to_string(),
                bio: Some("fermentation nerd".to_string()),
                avatar: None,
                follower_count: 4,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .unwrap();
        let adapter = UserSearchAdapter::new(Arc::new(catalog));
        let ctx = QueryContext::from_request(&SearchRequest::new("fermentation"));

        let candidates = adapter.search(&ctx).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind(), ContentKind::User);
        assert_eq!(candidates[0].title(), "sourdough_sam");
    }
}
