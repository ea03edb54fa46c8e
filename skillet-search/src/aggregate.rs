//! Cross-entity search aggregation.
//!
//! The service validates the request once, fans out to the scope's
//! adapters concurrently, scores and merges their candidates into one
//! deterministic ordering, and attaches suggestions and facet values.
//! A failing kind is logged and contributes nothing; it never aborts
//! the other kinds.

use std::cmp::Ordering;
use std::sync::Arc;

use futures_util::future::join_all;
use skillet_core::{
    EntityId, SearchHistoryEntry, SearchRequest, SearchResponse, SearchScope, SearchSuggestion,
    SkilletResult, SortOrder,
};
use skillet_storage::{
    ArticleStore, CommentStore, InMemoryCatalog, InMemoryHistoryStore, PostStore, RecipeStore,
    SearchHistoryStore, UserStore,
};

use crate::adapter::SearchAdapter;
use crate::adapters::{
    ArticleSearchAdapter, CommentSearchAdapter, PostSearchAdapter, RecipeSearchAdapter,
    UserSearchAdapter,
};
use crate::candidate::SearchCandidate;
use crate::config::SearchConfig;
use crate::context::QueryContext;
use crate::history::HistoryRecorder;
use crate::scorer;
use crate::suggest;

// ============================================================================
// BACKENDS
// ============================================================================

/// Store handles the search service fans out over.
#[derive(Clone)]
pub struct SearchBackends {
    pub posts: Arc<dyn PostStore>,
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub articles: Arc<dyn ArticleStore>,
    pub comments: Arc<dyn CommentStore>,
    pub history: Arc<dyn SearchHistoryStore>,
}

impl SearchBackends {
    /// Serve every content kind from one shared in-memory catalog.
    pub fn in_memory(catalog: InMemoryCatalog, history: InMemoryHistoryStore) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            posts: catalog.clone(),
            recipes: catalog.clone(),
            users: catalog.clone(),
            articles: catalog.clone(),
            comments: catalog,
            history: Arc::new(history),
        }
    }
}

// ============================================================================
// SEARCH SERVICE
// ============================================================================

/// The aggregation entry point the API layer talks to.
pub struct SearchService {
    adapters: Vec<Arc<dyn SearchAdapter>>,
    recorder: HistoryRecorder,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(backends: SearchBackends, config: SearchConfig) -> Self {
        let adapters: Vec<Arc<dyn SearchAdapter>> = vec![
            Arc::new(PostSearchAdapter::new(backends.posts)),
            Arc::new(RecipeSearchAdapter::new(backends.recipes)),
            Arc::new(UserSearchAdapter::new(backends.users)),
            Arc::new(ArticleSearchAdapter::new(backends.articles)),
            Arc::new(CommentSearchAdapter::new(backends.comments)),
        ];
        let recorder = HistoryRecorder::new(backends.history, &config);
        Self {
            adapters,
            recorder,
            config,
        }
    }

    /// Adapters active under the scope, in fan-out order.
    fn active_adapters(&self, scope: SearchScope) -> Vec<Arc<dyn SearchAdapter>> {
        self.adapters
            .iter()
            .filter(|a| scope.includes(a.kind()))
            .cloned()
            .collect()
    }

    /// Anonymous search; nothing is recorded.
    pub async fn search(&self, req: &SearchRequest) -> SkilletResult<SearchResponse> {
        self.advanced_search(None, req).await
    }

    /// Search on behalf of a known caller; the query is recorded.
    pub async fn search_as_user(
        &self,
        caller: EntityId,
        req: &SearchRequest,
    ) -> SkilletResult<SearchResponse> {
        self.advanced_search(Some(caller), req).await
    }

    /// Full search pipeline: validate, fan out, score, merge, paginate,
    /// attach suggestions and facets, and (with a caller) record history.
    pub async fn advanced_search(
        &self,
        caller: Option<EntityId>,
        req: &SearchRequest,
    ) -> SkilletResult<SearchResponse> {
        req.validate()?;
        let ctx = QueryContext::from_request(req);
        let adapters = self.active_adapters(req.scope);

        let searches = adapters.iter().map(|a| a.search(&ctx));
        let outcomes = join_all(searches).await;

        let mut total_count: i32 = 0;
        let mut candidates: Vec<(SearchCandidate, f32)> = Vec::new();
        for (adapter, outcome) in adapters.iter().zip(outcomes) {
            match outcome {
                Ok(found) => {
                    total_count += found.len() as i32;
                    candidates.extend(found.into_iter().map(|c| {
                        let score = scorer::score_terms(&c.title(), &c.search_text(), &ctx.terms);
                        (c, score)
                    }));
                }
                Err(e) => {
                    tracing::warn!(kind = %adapter.kind(), error = %e, "search adapter failed, kind skipped");
                }
            }
        }

        sort_candidates(&mut candidates, ctx.sort);
        candidates.truncate(ctx.limit as usize);

        let results = candidates
            .into_iter()
            .map(|(c, score)| c.into_result(score))
            .collect();

        let suggestions = suggest::title_suggestions(&adapters, &ctx, &self.config).await;
        let filters = suggest::facet_values(&adapters, &ctx).await;

        // Counts are summed over already-limited per-kind pages, so this
        // is a lower bound, not a true global count.
        let has_more = total_count > ctx.offset + ctx.limit;

        if let Some(user_id) = caller {
            self.recorder
                .record_detached(user_id, req.query.clone(), total_count);
        }

        Ok(SearchResponse {
            results,
            total_count,
            has_more,
            suggestions: suggestions.into_iter().map(|s| s.text).collect(),
            filters,
        })
    }

    /// Title suggestions for an autocomplete query. Blank queries yield
    /// an empty list without touching the stores.
    pub async fn suggestions(&self, query: &str, scope: SearchScope) -> Vec<SearchSuggestion> {
        let ctx = QueryContext::for_lookup(query);
        let adapters = self.active_adapters(scope);
        suggest::title_suggestions(&adapters, &ctx, &self.config).await
    }

    /// Facet values matching a query, one flat deduplicated list.
    pub async fn facets(&self, query: &str, scope: SearchScope) -> Vec<String> {
        let ctx = QueryContext::for_lookup(query);
        let adapters = self.active_adapters(scope);
        suggest::facet_values(&adapters, &ctx).await
    }

    /// A caller's recent searches, newest first.
    pub async fn history(&self, caller: EntityId) -> SkilletResult<Vec<SearchHistoryEntry>> {
        self.recorder.recent(caller).await
    }

    /// Drop a caller's history. Returns whether anything was removed.
    pub async fn clear_history(&self, caller: EntityId) -> SkilletResult<bool> {
        self.recorder.clear(caller).await
    }

    /// Most frequent queries across all users.
    pub async fn popular_searches(&self) -> SkilletResult<Vec<SearchSuggestion>> {
        self.recorder.popular().await
    }

    /// Whether the history backend is reachable, for readiness probes.
    pub async fn ping_history(&self) -> SkilletResult<bool> {
        self.recorder.ping().await
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Order the merged candidate list. Every arm falls through to the id
/// so re-runs over the same catalog produce identical orderings.
fn sort_candidates(candidates: &mut [(SearchCandidate, f32)], sort: SortOrder) {
    match sort {
        SortOrder::Relevance => candidates.sort_by(|(a, score_a), (b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.created_at().cmp(&a.created_at()))
                .then_with(|| b.id().cmp(&a.id()))
        }),
        SortOrder::Newest => candidates.sort_by(|(a, _), (b, _)| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        }),
        SortOrder::Oldest => candidates.sort_by(|(a, _), (b, _)| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        }),
        SortOrder::Popular => candidates.sort_by(|(a, _), (b, _)| {
            b.popularity()
                .cmp(&a.popularity())
                .then_with(|| b.created_at().cmp(&a.created_at()))
                .then_with(|| b.id().cmp(&a.id()))
        }),
    }
}
