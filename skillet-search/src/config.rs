//! Search service configuration.
//!
//! Loaded from environment variables with defaults that match the
//! product contract; env overrides exist for ops tuning.

// ============================================================================
// DEFAULTS
// ============================================================================

/// Title suggestions fetched per contributing kind.
pub const DEFAULT_SUGGESTIONS_PER_KIND: i32 = 5;

/// Total suggestions returned after concatenating across kinds.
pub const DEFAULT_SUGGESTION_CAP: usize = 10;

/// History entries returned per user, newest first.
pub const DEFAULT_HISTORY_PAGE_SIZE: i32 = 20;

/// Popular queries returned, most frequent first.
pub const DEFAULT_POPULAR_PAGE_SIZE: i32 = 10;

// ============================================================================
// SEARCH CONFIGURATION
// ============================================================================

/// Tunable caps for suggestions, history, and popular searches. Result
/// pagination bounds live on the request types in skillet-core.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Title suggestions fetched per contributing kind.
    pub suggestions_per_kind: i32,

    /// Total suggestions returned per lookup.
    pub suggestion_cap: usize,

    /// History entries returned per user.
    pub history_page_size: i32,

    /// Popular queries returned.
    pub popular_page_size: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestions_per_kind: DEFAULT_SUGGESTIONS_PER_KIND,
            suggestion_cap: DEFAULT_SUGGESTION_CAP,
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            popular_page_size: DEFAULT_POPULAR_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    /// Create SearchConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SKILLET_SUGGESTIONS_PER_KIND`: suggestions fetched per kind (default: 5)
    /// - `SKILLET_SUGGESTION_CAP`: total suggestions returned (default: 10)
    /// - `SKILLET_HISTORY_PAGE_SIZE`: history entries per user (default: 20)
    /// - `SKILLET_POPULAR_PAGE_SIZE`: popular queries returned (default: 10)
    pub fn from_env() -> Self {
        let suggestions_per_kind = std::env::var("SKILLET_SUGGESTIONS_PER_KIND")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SUGGESTIONS_PER_KIND);

        let suggestion_cap = std::env::var("SKILLET_SUGGESTION_CAP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SUGGESTION_CAP);

        let history_page_size = std::env::var("SKILLET_HISTORY_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HISTORY_PAGE_SIZE);

        let popular_page_size = std::env::var("SKILLET_POPULAR_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POPULAR_PAGE_SIZE);

        Self {
            suggestions_per_kind,
            suggestion_cap,
            history_page_size,
            popular_page_size,
        }
    }
}
