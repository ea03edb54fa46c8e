//! Comment search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};
use skillet_storage::{CommentQuery, CommentStore};

use crate::adapter::SearchAdapter;
use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

/// Searches comments by body text only. Comments have no publication
/// flag and no searchable author field.
pub struct CommentSearchAdapter {
    store: Arc<dyn CommentStore>,
}

impl CommentSearchAdapter {
    pub fn new(store: Arc<dyn CommentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchAdapter for CommentSearchAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Comment
    }

    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>> {
        let query = CommentQuery {
            text: ctx.text.clone(),
            sort: ctx.sort,
            limit: ctx.limit,
            offset: ctx.offset,
        };
        let comments = self.store.comment_search(&query).await?;
        Ok(comments.into_iter().map(SearchCandidate::Comment).collect())
    }
}
