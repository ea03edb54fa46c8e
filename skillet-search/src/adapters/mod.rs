//! Per-kind adapter implementations.
//!
//! One adapter per content kind, each translating the shared query
//! context into its store's query shape. Posts and recipes additionally
//! contribute autocomplete titles and facet values.

pub mod articles;
pub mod comments;
pub mod posts;
pub mod recipes;
pub mod users;

pub use articles::ArticleSearchAdapter;
pub use comments::CommentSearchAdapter;
pub use posts::PostSearchAdapter;
pub use recipes::RecipeSearchAdapter;
pub use users::UserSearchAdapter;
