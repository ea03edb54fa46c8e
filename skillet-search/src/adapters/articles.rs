//! Editorial article search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};
use skillet_storage::{ArticleQuery, ArticleStore};

use crate::adapter::SearchAdapter;
use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

/// Searches published articles by title, body, and summary.
pub struct ArticleSearchAdapter {
    store: Arc<dyn ArticleStore>,
}

impl ArticleSearchAdapter {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchAdapter for ArticleSearchAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Article
    }

    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>> {
        let query = ArticleQuery {
            text: ctx.text.clone(),
            published_only: true,
            sort: ctx.sort,
            limit: ctx.limit,
            offset: ctx.offset,
        };
        let articles = self.store.article_search(&query).await?;
        Ok(articles.into_iter().map(SearchCandidate::Article).collect())
    }
}
