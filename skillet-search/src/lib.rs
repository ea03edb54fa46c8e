//! Skillet Search - Cross-Entity Search Aggregation
//!
//! Fans a free-text query out across the five content kinds, scores
//! every candidate with the lexical relevance scorer, merges the
//! per-kind pages into one ranked response, derives autocomplete
//! suggestions and facet values, and records search history for
//! known callers.

pub mod adapter;
pub mod adapters;
pub mod aggregate;
pub mod candidate;
pub mod config;
pub mod context;
pub mod history;
pub mod scorer;
mod suggest;

pub use adapter::SearchAdapter;
pub use adapters::{
    ArticleSearchAdapter, CommentSearchAdapter, PostSearchAdapter, RecipeSearchAdapter,
    UserSearchAdapter,
};
pub use aggregate::{SearchBackends, SearchService};
pub use candidate::SearchCandidate;
pub use config::SearchConfig;
pub use context::QueryContext;
pub use history::HistoryRecorder;
