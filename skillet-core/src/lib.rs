//! Skillet Core - Content & Search Types
//!
//! Pure data structures shared by every other crate. This crate contains
//! ONLY data types plus request validation - no search logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

// ============================================================================
// PAGINATION CONSTANTS
// ============================================================================

/// Page size used when a request carries no limit.
pub const DEFAULT_LIMIT: i32 = 20;

/// Smallest accepted page size. Lower values are clamped, not rejected.
pub const MIN_LIMIT: i32 = 1;

/// Largest accepted page size. Higher values are clamped, not rejected.
pub const MAX_LIMIT: i32 = 100;

// ============================================================================
// ENUMS
// ============================================================================

/// Content kind discriminator for cross-entity search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Recipe,
    User,
    Article,
    Comment,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Post => "post",
            ContentKind::Recipe => "recipe",
            ContentKind::User => "user",
            ContentKind::Article => "article",
            ContentKind::Comment => "comment",
        };
        f.write_str(s)
    }
}

/// Which content kinds a search request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    All,
    Posts,
    Recipes,
    Users,
    Articles,
    Comments,
}

impl Default for SearchScope {
    fn default() -> Self {
        SearchScope::All
    }
}

impl SearchScope {
    /// Content kinds active under this scope, in fan-out order.
    pub fn kinds(&self) -> &'static [ContentKind] {
        match self {
            SearchScope::All => &[
                ContentKind::Post,
                ContentKind::Recipe,
                ContentKind::User,
                ContentKind::Article,
                ContentKind::Comment,
            ],
            SearchScope::Posts => &[ContentKind::Post],
            SearchScope::Recipes => &[ContentKind::Recipe],
            SearchScope::Users => &[ContentKind::User],
            SearchScope::Articles => &[ContentKind::Article],
            SearchScope::Comments => &[ContentKind::Comment],
        }
    }

    /// Whether this scope includes the given kind.
    pub fn includes(&self, kind: ContentKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Ordering applied to the merged result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lexical score descending, ties broken by recency.
    Relevance,
    Newest,
    Oldest,
    /// Like count (follower count for users) descending.
    Popular,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Relevance
    }
}

/// Recipe difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}


// ============================================================================
// CONTENT RECORDS
// ============================================================================

/// Feed post - short-form content with optional category and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: EntityId,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Author handle, not a join - the profile service owns user records.
    pub author: String,
    pub like_count: i32,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Recipe - structured cooking content searched across all text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: EntityId,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Average user rating on a 0-5 scale.
    pub rating: f32,
    pub like_count: i32,
    pub author: String,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User profile. Profiles have no publication flag - every profile is
/// searchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: EntityId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub follower_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Long-form editorial article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: EntityId,
    pub title: String,
    pub body: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author: String,
    pub like_count: i32,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Comment on a post. Matched on body text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: EntityId,
    pub post_id: EntityId,
    pub body: String,
    pub author: String,
    pub like_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}


// ============================================================================
// SEARCH REQUEST
// ============================================================================

/// Optional filters applied per kind. Filters a kind does not understand
/// are ignored by that kind's adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchFilters {
    /// Post categories (any-of match).
    #[serde(default)]
    pub categories: Vec<String>,
    /// Post tags (any overlap matches).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author handles (any-of match).
    #[serde(default)]
    pub authors: Vec<String>,
    /// Inclusive lower bound on creation time.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub date_from: Option<Timestamp>,
    /// Inclusive upper bound on creation time.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub date_to: Option<Timestamp>,
    /// Recipe difficulty (exact match).
    pub difficulty: Option<Difficulty>,
    /// Recipe cuisine (exact match).
    pub cuisine: Option<String>,
    /// Minimum recipe rating on the 0-5 scale.
    pub min_rating: Option<f32>,
}

/// A cross-entity search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchRequest {
    /// Free-text query. Must be non-blank.
    pub query: String,
    /// Content kinds to cover. Defaults to all five.
    #[serde(default)]
    pub scope: SearchScope,
    /// Ordering of the merged list. Defaults to relevance.
    #[serde(default)]
    pub sort_by: SortOrder,
    /// Page size, clamped to [1, 100]. Defaults to 20.
    pub limit: Option<i32>,
    /// Page offset, clamped to >= 0. Defaults to 0.
    pub offset: Option<i32>,
    /// Optional per-kind filters.
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Minimal request: query text with every other field defaulted.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            scope: SearchScope::default(),
            sort_by: SortOrder::default(),
            limit: None,
            offset: None,
            filters: SearchFilters::default(),
        }
    }

    /// Validate the request. Runs before any store is touched.
    ///
    /// Rejects:
    /// - blank query text
    /// - min_rating outside [0.0, 5.0]
    /// - date_to earlier than date_from
    ///
    /// Out-of-range limit/offset are clamped, never rejected.
    pub fn validate(&self) -> SkilletResult<()> {
        if self.query.trim().is_empty() {
            return Err(SkilletError::Validation(
                ValidationError::RequiredFieldMissing {
                    field: "query".to_string(),
                },
            ));
        }

        if let Some(min_rating) = self.filters.min_rating {
            if !(0.0..=5.0).contains(&min_rating) {
                return Err(SkilletError::Validation(ValidationError::InvalidValue {
                    field: "filters.min_rating".to_string(),
                    reason: "min_rating must be between 0.0 and 5.0".to_string(),
                }));
            }
        }

        if let (Some(from), Some(to)) = (self.filters.date_from, self.filters.date_to) {
            if to < from {
                return Err(SkilletError::Validation(ValidationError::InvalidValue {
                    field: "filters.date_to".to_string(),
                    reason: "date_to must not precede date_from".to_string(),
                }));
            }
        }

        Ok(())
    }

    /// Page size after defaulting and clamping to [MIN_LIMIT, MAX_LIMIT].
    pub fn effective_limit(&self) -> i32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Page offset after defaulting and clamping to >= 0.
    pub fn effective_offset(&self) -> i32 {
        self.offset.unwrap_or(0).max(0)
    }
}


// ============================================================================
// SEARCH RESULTS
// ============================================================================

/// One entry in the merged result list. Kind-specific attributes that do
/// not fit the common shape travel in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    /// ID of the underlying record.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: EntityId,
    /// Which kind produced this result.
    pub kind: ContentKind,
    /// Display title (username for users, body prefix for comments).
    pub title: String,
    /// Display body: post/comment body, recipe description, article
    /// summary when present, user bio.
    pub body: String,
    /// Relevance score in [0.0, 1.0].
    pub score: f32,
    pub image: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Kind-specific extras (rating, follower_count, post_id, ...).
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metadata: serde_json::Value,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

/// Response for a cross-entity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResponse {
    /// Merged, sorted results, truncated to the page size.
    pub results: Vec<SearchResult>,
    /// Sum of per-kind match counts. Each kind's count is already capped
    /// by the page size, so this is a page-relative total, not a global one.
    pub total_count: i32,
    /// Whether another page exists, derived from total_count.
    pub has_more: bool,
    /// Autocomplete suggestions for the same query.
    pub suggestions: Vec<String>,
    /// Facet values (post categories and recipe cuisines), deduplicated.
    pub filters: Vec<String>,
}

impl SearchResponse {
    /// Well-formed empty response. Used when every kind failed or matched
    /// nothing.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_count: 0,
            has_more: false,
            suggestions: Vec::new(),
            filters: Vec::new(),
        }
    }
}

/// A single autocomplete or popular-search suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchSuggestion {
    /// Suggested query or title text.
    pub text: String,
    /// Kind that produced the suggestion. None for popular searches.
    pub kind: Option<ContentKind>,
    /// Occurrence count. 1 for title suggestions, query frequency for
    /// popular searches.
    pub count: i32,
}


// ============================================================================
// SEARCH HISTORY
// ============================================================================

/// One recorded search. Append-only; removed only by the caller-scoped
/// bulk clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchHistoryEntry {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub history_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub user_id: EntityId,
    /// Query text as the caller typed it, not the normalized form.
    pub query: String,
    /// total_count of the search that produced this entry.
    pub result_count: i32,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}


// ============================================================================
// ERROR TYPES
// ============================================================================

/// Store layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Query failed for {kind:?}: {reason}")]
    QueryFailed { kind: ContentKind, reason: String },

    #[error("Insert failed for {kind:?}: {reason}")]
    InsertFailed { kind: ContentKind, reason: String },

    #[error("History write failed: {reason}")]
    HistoryWriteFailed { reason: String },

    #[error("History read failed: {reason}")]
    HistoryReadFailed { reason: String },

    #[error("Seed load failed from {path}: {reason}")]
    SeedFailed { path: String, reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Validation errors for caller-supplied input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Master error type for all Skillet errors.
#[derive(Debug, Clone, Error)]
pub enum SkilletError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for Skillet operations.
pub type SkilletResult<T> = Result<T, SkilletError>;

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
