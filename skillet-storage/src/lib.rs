//! Skillet Storage - Store Traits and In-Memory Catalog
//!
//! Defines the store abstraction over the five content kinds plus search
//! history. The in-memory catalog backs the server binary and tests; a
//! relational backend plugs in behind the same traits.

pub mod history;
pub mod memory;
pub mod seed;
pub mod traits;

pub use history::InMemoryHistoryStore;
pub use memory::InMemoryCatalog;
pub use seed::SeedData;
pub use traits::{
    ArticleQuery, ArticleStore, CommentQuery, CommentStore, PostQuery, PostStore, RecipeQuery,
    RecipeStore, SearchHistoryStore, UserQuery, UserStore,
};
