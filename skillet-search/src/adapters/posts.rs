//! Post search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};
use skillet_storage::{PostQuery, PostStore};

use crate::adapter::SearchAdapter;
use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

/// Searches published posts by title and body, honoring the category,
/// tag, author, and date-range filters. Contributes title suggestions
/// and category facets.
pub struct PostSearchAdapter {
    store: Arc<dyn PostStore>,
}

impl PostSearchAdapter {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchAdapter for PostSearchAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Post
    }

    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>> {
        let query = PostQuery {
            text: ctx.text.clone(),
            categories: ctx.filters.categories.clone(),
            tags: ctx.filters.tags.clone(),
            authors: ctx.filters.authors.clone(),
            date_from: ctx.filters.date_from,
            date_to: ctx.filters.date_to,
            published_only: true,
            sort: ctx.sort,
            limit: ctx.limit,
            offset: ctx.offset,
        };
        let posts = self.store.post_search(&query).await?;
        Ok(posts.into_iter().map(SearchCandidate::Post).collect())
    }

    async fn suggest(&self, ctx: &QueryContext, limit: i32) -> SkilletResult<Vec<String>> {
        self.store.post_titles(&ctx.text, limit).await
    }

    async fn facets(&self, ctx: &QueryContext) -> SkilletResult<Vec<String>> {
        self.store.post_categories(&ctx.text).await
    }
}
