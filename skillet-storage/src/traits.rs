//! Async store traits for the five content kinds and search history.
//!
//! Every text query is bounded: implementations apply filtering, sorting,
//! and the limit/offset window before returning, so a caller never pulls
//! more than one page per kind. Under `SortOrder::Relevance`, stores sort
//! newest-first; real scoring happens in the search layer.

use async_trait::async_trait;
use skillet_core::{
    Article, Comment, Difficulty, EntityId, Post, Recipe, SearchHistoryEntry, SkilletResult,
    SortOrder, Timestamp, UserProfile,
};

// ============================================================================
// QUERY TYPES
// ============================================================================

/// Bounded post query. Empty filter vectors mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Text matched case-insensitively against title and body.
    /// Empty text matches everything.
    pub text: String,
    /// Category must equal one of these (any-of).
    pub categories: Vec<String>,
    /// At least one tag must overlap.
    pub tags: Vec<String>,
    /// Author handle must equal one of these (any-of).
    pub authors: Vec<String>,
    /// Inclusive lower bound on created_at.
    pub date_from: Option<Timestamp>,
    /// Inclusive upper bound on created_at.
    pub date_to: Option<Timestamp>,
    /// Restrict to published posts.
    pub published_only: bool,
    pub sort: SortOrder,
    pub limit: i32,
    pub offset: i32,
}

/// Bounded recipe query. Text is matched against title, description,
/// ingredients, and instructions.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub text: String,
    /// Exact difficulty match.
    pub difficulty: Option<Difficulty>,
    /// Exact cuisine match, case-insensitive.
    pub cuisine: Option<String>,
    /// Rating must be at least this value.
    pub min_rating: Option<f32>,
    /// Restrict to published recipes.
    pub published_only: bool,
    pub sort: SortOrder,
    pub limit: i32,
    pub offset: i32,
}

/// Bounded user profile query. Text is matched against username, email,
/// and bio. Profiles carry no publication flag.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub text: String,
    pub sort: SortOrder,
    pub limit: i32,
    pub offset: i32,
}

/// Bounded article query. Text is matched against title, body, and summary.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub text: String,
    /// Restrict to published articles.
    pub published_only: bool,
    pub sort: SortOrder,
    pub limit: i32,
    pub offset: i32,
}

/// Bounded comment query. Text is matched against the body only.
#[derive(Debug, Clone, Default)]
pub struct CommentQuery {
    pub text: String,
    pub sort: SortOrder,
    pub limit: i32,
    pub offset: i32,
}

// ============================================================================
// CONTENT STORES
// ============================================================================

/// Store for feed posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Search posts matching the query, one page at most.
    async fn post_search(&self, q: &PostQuery) -> SkilletResult<Vec<Post>>;

    /// Titles of published posts containing the text, newest first,
    /// for autocomplete.
    async fn post_titles(&self, text: &str, limit: i32) -> SkilletResult<Vec<String>>;

    /// Distinct categories among published posts matching the text.
    async fn post_categories(&self, text: &str) -> SkilletResult<Vec<String>>;
}

/// Store for recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Search recipes matching the query, one page at most.
    async fn recipe_search(&self, q: &RecipeQuery) -> SkilletResult<Vec<Recipe>>;

    /// Titles of published recipes containing the text, newest first,
    /// for autocomplete.
    async fn recipe_titles(&self, text: &str, limit: i32) -> SkilletResult<Vec<String>>;

    /// Distinct cuisines among published recipes matching the text.
    async fn recipe_cuisines(&self, text: &str) -> SkilletResult<Vec<String>>;
}

/// Store for user profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Search profiles matching the query, one page at most.
    async fn user_search(&self, q: &UserQuery) -> SkilletResult<Vec<UserProfile>>;
}

/// Store for editorial articles.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Search articles matching the query, one page at most.
    async fn article_search(&self, q: &ArticleQuery) -> SkilletResult<Vec<Article>>;
}

/// Store for post comments.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Search comments matching the query, one page at most.
    async fn comment_search(&self, q: &CommentQuery) -> SkilletResult<Vec<Comment>>;
}

// ============================================================================
// SEARCH HISTORY STORE
// ============================================================================

/// Append-only store for recorded searches.
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    /// Insert a new history entry.
    async fn history_insert(&self, entry: &SearchHistoryEntry) -> SkilletResult<()>;

    /// Most recent entries for one user, newest first.
    async fn history_list_recent(
        &self,
        user_id: EntityId,
        limit: i32,
    ) -> SkilletResult<Vec<SearchHistoryEntry>>;

    /// Delete every entry for one user. Returns the number removed.
    async fn history_clear(&self, user_id: EntityId) -> SkilletResult<i64>;

    /// Queries grouped by exact text across all users, as
    /// (query, frequency) pairs ordered by frequency descending with
    /// ties broken by query text.
    async fn history_top_queries(&self, limit: i32) -> SkilletResult<Vec<(String, i64)>>;

    /// Check the backend is reachable.
    async fn health_check(&self) -> SkilletResult<bool>;
}
