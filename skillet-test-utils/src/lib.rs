//! Skillet Test Utilities
//!
//! Centralized test infrastructure for the Skillet workspace:
//! - Proptest generators for search and content types
//! - A seeded fixture catalog shared by integration tests
//! - Store doubles for failure-path and call-counting tests
//! - Custom assertions for Skillet error taxonomy

// Re-export the in-memory stores from their source crate
pub use skillet_storage::{InMemoryCatalog, InMemoryHistoryStore};

// Re-export core types for convenience
pub use skillet_core::{
    new_entity_id, Article, Comment, ContentKind, Difficulty, EntityId, Post, Recipe,
    SearchFilters, SearchHistoryEntry, SearchRequest, SearchResponse, SearchResult, SearchScope,
    SearchSuggestion, SkilletError, SkilletResult, SortOrder, StoreError, Timestamp, UserProfile,
    ValidationError,
};

use chrono::Utc;
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Skillet search and content types.

    use super::*;
    use proptest::prelude::*;

    // === Identity and Time ===

    /// Generate a random EntityId.
    pub fn arb_entity_id() -> impl Strategy<Value = EntityId> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within a reasonable range (2020-2030).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    // === Enum Generators ===

    /// Generate a ContentKind variant.
    pub fn arb_content_kind() -> impl Strategy<Value = ContentKind> {
        prop_oneof![
            Just(ContentKind::Post),
            Just(ContentKind::Recipe),
            Just(ContentKind::User),
            Just(ContentKind::Article),
            Just(ContentKind::Comment),
        ]
    }

    /// Generate a SearchScope variant.
    pub fn arb_search_scope() -> impl Strategy<Value = SearchScope> {
        prop_oneof![
            Just(SearchScope::All),
            Just(SearchScope::Posts),
            Just(SearchScope::Recipes),
            Just(SearchScope::Users),
            Just(SearchScope::Articles),
            Just(SearchScope::Comments),
        ]
    }

    /// Generate a SortOrder variant.
    pub fn arb_sort_order() -> impl Strategy<Value = SortOrder> {
        prop_oneof![
            Just(SortOrder::Relevance),
            Just(SortOrder::Newest),
            Just(SortOrder::Oldest),
            Just(SortOrder::Popular),
        ]
    }

    /// Generate a Difficulty variant.
    pub fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard),
        ]
    }

    // === Search Type Generators ===

    /// Generate a query with at least one visible character.
    pub fn arb_query() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9 ]{0,39}"
    }

    /// Generate search filters, mostly sparse the way real requests are.
    pub fn arb_search_filters() -> impl Strategy<Value = SearchFilters> {
        (
            prop::collection::vec("[A-Z][a-z]{2,8}", 0..3),
            prop::collection::vec("[a-z]{2,8}", 0..3),
            prop::collection::vec("[a-z_]{3,10}", 0..2),
            prop::option::of(arb_difficulty()),
            prop::option::of("[A-Z][a-z]{3,10}"),
            prop::option::of(0.0f32..=5.0f32),
        )
            .prop_map(
                |(categories, tags, authors, difficulty, cuisine, min_rating)| SearchFilters {
                    categories,
                    tags,
                    authors,
                    date_from: None,
                    date_to: None,
                    difficulty,
                    cuisine,
                    min_rating,
                },
            )
    }

    /// Generate a valid SearchRequest: non-blank query, arbitrary
    /// pagination (including out-of-range values that must be clamped).
    pub fn arb_search_request() -> impl Strategy<Value = SearchRequest> {
        (
            arb_query(),
            arb_search_scope(),
            arb_sort_order(),
            prop::option::of(-50i32..500),
            prop::option::of(-20i32..500),
            arb_search_filters(),
        )
            .prop_map(|(query, scope, sort_by, limit, offset, filters)| SearchRequest {
                query,
                scope,
                sort_by,
                limit,
                offset,
                filters,
            })
    }

    // === Record Generators ===

    /// Generate a Post, published or not.
    pub fn arb_post() -> impl Strategy<Value = Post> {
        (
            arb_entity_id(),
            "[A-Za-z][A-Za-z0-9 ]{0,30}",
            "[A-Za-z0-9 .,!?]{0,120}",
            prop::option::of("[A-Z][a-z]{2,10}"),
            prop::collection::vec("[a-z]{2,8}", 0..4),
            "[a-z_]{3,12}",
            0i32..5000,
            any::<bool>(),
            arb_timestamp(),
        )
            .prop_map(
                |(post_id, title, body, category, tags, author, like_count, published, created_at)| {
                    Post {
                        post_id,
                        title,
                        body,
                        image: None,
                        category,
                        tags,
                        author,
                        like_count,
                        published,
                        created_at,
                        updated_at: created_at,
                    }
                },
            )
    }

    /// Generate a Recipe, published or not.
    pub fn arb_recipe() -> impl Strategy<Value = Recipe> {
        (
            arb_entity_id(),
            "[A-Za-z][A-Za-z0-9 ]{0,30}",
            "[A-Za-z0-9 .,]{0,80}",
            prop::collection::vec("[a-z ]{3,15}", 0..6),
            prop::collection::vec("[A-Za-z0-9 .]{5,40}", 0..4),
            prop::option::of("[A-Z][a-z]{3,10}"),
            prop::option::of(arb_difficulty()),
            0.0f32..=5.0f32,
            ("[a-z_]{3,12}", 0i32..5000, any::<bool>(), arb_timestamp()),
        )
            .prop_map(
                |(
                    recipe_id,
                    title,
                    description,
                    ingredients,
                    instructions,
                    cuisine,
                    difficulty,
                    rating,
                    (author, like_count, published, created_at),
                )| {
                    Recipe {
                        recipe_id,
                        title,
                        description,
                        ingredients,
                        instructions,
                        image: None,
                        cuisine,
                        difficulty,
                        rating,
                        like_count,
                        author,
                        published,
                        created_at,
                        updated_at: created_at,
                    }
                },
            )
    }

    /// Generate a UserProfile.
    pub fn arb_user_profile() -> impl Strategy<Value = UserProfile> {
        (
            arb_entity_id(),
            "[a-z_]{3,16}",
            "[a-z]{3,8}@example\\.com",
            prop::option::of("[A-Za-z0-9 ]{0,60}"),
            0i32..100000,
            arb_timestamp(),
        )
            .prop_map(|(user_id, username, email, bio, follower_count, created_at)| UserProfile {
                user_id,
                username,
                email,
                bio,
                avatar: None,
                follower_count,
                created_at,
                updated_at: created_at,
            })
    }

    /// Generate an Article, published or not.
    pub fn arb_article() -> impl Strategy<Value = Article> {
        (
            arb_entity_id(),
            "[A-Za-z][A-Za-z0-9 ]{0,30}",
            "[A-Za-z0-9 .,]{0,120}",
            prop::option::of("[A-Za-z0-9 ]{0,60}"),
            "[a-z_]{3,12}",
            0i32..5000,
            any::<bool>(),
            arb_timestamp(),
        )
            .prop_map(
                |(article_id, title, body, summary, author, like_count, published, created_at)| {
                    Article {
                        article_id,
                        title,
                        body,
                        summary,
                        image: None,
                        author,
                        like_count,
                        published,
                        created_at,
                        updated_at: created_at,
                    }
                },
            )
    }

    /// Generate a Comment.
    pub fn arb_comment() -> impl Strategy<Value = Comment> {
        (
            arb_entity_id(),
            arb_entity_id(),
            "[A-Za-z0-9 .,!?]{1,160}",
            "[a-z_]{3,12}",
            0i32..1000,
            arb_timestamp(),
        )
            .prop_map(|(comment_id, post_id, body, author, like_count, created_at)| Comment {
                comment_id,
                post_id,
                body,
                author,
                like_count,
                created_at,
                updated_at: created_at,
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.
    //!
    //! The seeded catalog is the shared corpus for integration tests:
    //! the query "quinoa" matches exactly one published record of every
    //! kind except recipes, which match twice.

    use super::*;
    use chrono::TimeZone;
    use skillet_storage::InMemoryCatalog;

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    /// Build the shared fixture catalog.
    ///
    /// Contents: three posts (one draft), five recipes (one draft), two
    /// users, three articles (one draft), three comments.
    pub fn seeded_catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();

        for post in [
            Post {
                post_id: new_entity_id(),
                title: "Quinoa salad bowl".to_string(),
                body: "My go-to quinoa salad with a lemon dressing".to_string(),
                image: Some("bowls/quinoa.jpg".to_string()),
                category: Some("Lunch".to_string()),
                tags: vec!["healthy".to_string(), "grains".to_string()],
                author: "ana".to_string(),
                like_count: 42,
                published: true,
                created_at: at(10, 9),
                updated_at: at(10, 9),
            },
            Post {
                post_id: new_entity_id(),
                title: "Farmers market haul".to_string(),
                body: "Tomatoes and basil for the week".to_string(),
                image: None,
                category: Some("Shopping".to_string()),
                tags: vec!["produce".to_string()],
                author: "ben".to_string(),
                like_count: 17,
                published: true,
                created_at: at(9, 17),
                updated_at: at(9, 17),
            },
            Post {
                post_id: new_entity_id(),
                title: "Quinoa experiments".to_string(),
                body: "Draft notes, not ready yet".to_string(),
                image: None,
                category: Some("Lunch".to_string()),
                tags: Vec::new(),
                author: "cleo".to_string(),
                like_count: 0,
                published: false,
                created_at: at(8, 7),
                updated_at: at(8, 7),
            },
        ] {
            catalog.insert_post(post).unwrap();
        }

        for recipe in [
            Recipe {
                recipe_id: new_entity_id(),
                title: "Quinoa salad".to_string(),
                description: "Bright lemon quinoa salad".to_string(),
                ingredients: vec![
                    "quinoa".to_string(),
                    "lemon".to_string(),
                    "parsley".to_string(),
                ],
                instructions: vec![
                    "Rinse the quinoa".to_string(),
                    "Whisk the dressing".to_string(),
                ],
                image: None,
                cuisine: Some("Mediterranean".to_string()),
                difficulty: Some(Difficulty::Easy),
                rating: 4.5,
                like_count: 120,
                author: "ana".to_string(),
                published: true,
                created_at: at(7, 12),
                updated_at: at(7, 12),
            },
            Recipe {
                recipe_id: new_entity_id(),
                title: "Quinoa salad jars".to_string(),
                description: "Meal-prep quinoa salad packed in jars".to_string(),
                ingredients: vec![
                    "quinoa".to_string(),
                    "cucumber".to_string(),
                    "feta".to_string(),
                ],
                instructions: vec!["Layer the jars".to_string()],
                image: None,
                cuisine: Some("Mediterranean".to_string()),
                difficulty: Some(Difficulty::Easy),
                rating: 4.0,
                like_count: 75,
                author: "ana".to_string(),
                published: true,
                created_at: at(6, 8),
                updated_at: at(6, 8),
            },
            Recipe {
                recipe_id: new_entity_id(),
                title: "Chicken ramen".to_string(),
                description: "Weeknight shoyu ramen".to_string(),
                ingredients: vec![
                    "chicken stock".to_string(),
                    "noodles".to_string(),
                    "soy sauce".to_string(),
                ],
                instructions: vec!["Simmer the stock".to_string()],
                image: None,
                cuisine: Some("Japanese".to_string()),
                difficulty: Some(Difficulty::Medium),
                rating: 4.8,
                like_count: 300,
                author: "dai".to_string(),
                published: true,
                created_at: at(5, 19),
                updated_at: at(5, 19),
            },
            Recipe {
                recipe_id: new_entity_id(),
                title: "Beef bourguignon".to_string(),
                description: "A slow Sunday braise".to_string(),
                ingredients: vec!["beef".to_string(), "red wine".to_string()],
                instructions: vec!["Brown the beef".to_string()],
                image: None,
                cuisine: Some("French".to_string()),
                difficulty: Some(Difficulty::Hard),
                rating: 4.2,
                like_count: 57,
                author: "elle".to_string(),
                published: true,
                created_at: at(4, 16),
                updated_at: at(4, 16),
            },
            Recipe {
                recipe_id: new_entity_id(),
                title: "Quinoa porridge drafts".to_string(),
                description: "Testing breakfast ideas".to_string(),
                ingredients: Vec::new(),
                instructions: Vec::new(),
                image: None,
                cuisine: Some("Fusion".to_string()),
                difficulty: Some(Difficulty::Easy),
                rating: 0.0,
                like_count: 0,
                author: "ana".to_string(),
                published: false,
                created_at: at(3, 7),
                updated_at: at(3, 7),
            },
        ] {
            catalog.insert_recipe(recipe).unwrap();
        }

        for user in [
            UserProfile {
                user_id: new_entity_id(),
                username: "quinoa_queen".to_string(),
                email: "qq@example.com".to_string(),
                bio: Some("Grain bowls every day".to_string()),
                avatar: Some("avatars/qq.png".to_string()),
                follower_count: 1200,
                created_at: at(1, 8),
                updated_at: at(1, 8),
            },
            UserProfile {
                user_id: new_entity_id(),
                username: "ramen_dai".to_string(),
                email: "dai@example.com".to_string(),
                bio: Some("Noodle explorer".to_string()),
                avatar: None,
                follower_count: 5400,
                created_at: at(2, 9),
                updated_at: at(2, 9),
            },
        ] {
            catalog.insert_user(user).unwrap();
        }

        for article in [
            Article {
                article_id: new_entity_id(),
                title: "The whole grain guide".to_string(),
                body: "Quinoa, farro, and barley compared for weeknight cooking".to_string(),
                summary: Some("Choosing whole grains".to_string()),
                image: None,
                author: "elle".to_string(),
                like_count: 88,
                published: true,
                created_at: at(2, 12),
                updated_at: at(2, 12),
            },
            Article {
                article_id: new_entity_id(),
                title: "Stocking a pantry".to_string(),
                body: "Oils, vinegars, and staples worth buying".to_string(),
                summary: None,
                image: None,
                author: "ana".to_string(),
                like_count: 30,
                published: true,
                created_at: at(1, 12),
                updated_at: at(1, 12),
            },
            Article {
                article_id: new_entity_id(),
                title: "Quinoa field notes".to_string(),
                body: "Unfinished draft".to_string(),
                summary: None,
                image: None,
                author: "elle".to_string(),
                like_count: 0,
                published: false,
                created_at: at(1, 6),
                updated_at: at(1, 6),
            },
        ] {
            catalog.insert_article(article).unwrap();
        }

        let anchor_post = new_entity_id();
        for comment in [
            Comment {
                comment_id: new_entity_id(),
                post_id: anchor_post,
                body: "This quinoa salad saved my meal prep".to_string(),
                author: "fan_one".to_string(),
                like_count: 5,
                created_at: at(11, 10),
                updated_at: at(11, 10),
            },
            Comment {
                comment_id: new_entity_id(),
                post_id: anchor_post,
                body: "Needs more acid in the dressing".to_string(),
                author: "fan_two".to_string(),
                like_count: 1,
                created_at: at(12, 10),
                updated_at: at(12, 10),
            },
            Comment {
                comment_id: new_entity_id(),
                post_id: new_entity_id(),
                body: "That basil looks great".to_string(),
                author: "cleo".to_string(),
                like_count: 0,
                created_at: at(10, 18),
                updated_at: at(10, 18),
            },
        ] {
            catalog.insert_comment(comment).unwrap();
        }

        catalog
    }
}

// ============================================================================
// STORE DOUBLES
// ============================================================================

pub mod doubles {
    //! Store doubles for failure-path and call-counting tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use skillet_storage::{
        ArticleQuery, ArticleStore, CommentQuery, CommentStore, InMemoryCatalog, PostQuery,
        PostStore, RecipeQuery, RecipeStore, SearchHistoryStore, UserQuery, UserStore,
    };

    use super::*;

    fn offline(kind: ContentKind) -> SkilletError {
        StoreError::QueryFailed {
            kind,
            reason: "backend offline".to_string(),
        }
        .into()
    }

    /// UserStore that always fails, for per-kind isolation tests.
    pub struct FailingUserStore;

    #[async_trait]
    impl UserStore for FailingUserStore {
        async fn user_search(&self, _q: &UserQuery) -> SkilletResult<Vec<UserProfile>> {
            Err(offline(ContentKind::User))
        }
    }

    /// Catalog where every content store fails, for total-outage tests.
    pub struct FailingCatalog;

    #[async_trait]
    impl PostStore for FailingCatalog {
        async fn post_search(&self, _q: &PostQuery) -> SkilletResult<Vec<Post>> {
            Err(offline(ContentKind::Post))
        }

        async fn post_titles(&self, _text: &str, _limit: i32) -> SkilletResult<Vec<String>> {
            Err(offline(ContentKind::Post))
        }

        async fn post_categories(&self, _text: &str) -> SkilletResult<Vec<String>> {
            Err(offline(ContentKind::Post))
        }
    }

    #[async_trait]
    impl RecipeStore for FailingCatalog {
        async fn recipe_search(&self, _q: &RecipeQuery) -> SkilletResult<Vec<Recipe>> {
            Err(offline(ContentKind::Recipe))
        }

        async fn recipe_titles(&self, _text: &str, _limit: i32) -> SkilletResult<Vec<String>> {
            Err(offline(ContentKind::Recipe))
        }

        async fn recipe_cuisines(&self, _text: &str) -> SkilletResult<Vec<String>> {
            Err(offline(ContentKind::Recipe))
        }
    }

    #[async_trait]
    impl UserStore for FailingCatalog {
        async fn user_search(&self, _q: &UserQuery) -> SkilletResult<Vec<UserProfile>> {
            Err(offline(ContentKind::User))
        }
    }

    #[async_trait]
    impl ArticleStore for FailingCatalog {
        async fn article_search(&self, _q: &ArticleQuery) -> SkilletResult<Vec<Article>> {
            Err(offline(ContentKind::Article))
        }
    }

    #[async_trait]
    impl CommentStore for FailingCatalog {
        async fn comment_search(&self, _q: &CommentQuery) -> SkilletResult<Vec<Comment>> {
            Err(offline(ContentKind::Comment))
        }
    }

    /// History store that rejects every operation.
    pub struct FailingHistoryStore;

    #[async_trait]
    impl SearchHistoryStore for FailingHistoryStore {
        async fn history_insert(&self, _entry: &SearchHistoryEntry) -> SkilletResult<()> {
            Err(StoreError::HistoryWriteFailed {
                reason: "history backend offline".to_string(),
            }
            .into())
        }

        async fn history_list_recent(
            &self,
            _user_id: EntityId,
            _limit: i32,
        ) -> SkilletResult<Vec<SearchHistoryEntry>> {
            Err(StoreError::HistoryReadFailed {
                reason: "history backend offline".to_string(),
            }
            .into())
        }

        async fn history_clear(&self, _user_id: EntityId) -> SkilletResult<i64> {
            Err(StoreError::HistoryWriteFailed {
                reason: "history backend offline".to_string(),
            }
            .into())
        }

        async fn history_top_queries(&self, _limit: i32) -> SkilletResult<Vec<(String, i64)>> {
            Err(StoreError::HistoryReadFailed {
                reason: "history backend offline".to_string(),
            }
            .into())
        }

        async fn health_check(&self) -> SkilletResult<bool> {
            Ok(false)
        }
    }

    /// PostStore wrapper that counts searches and remembers the last
    /// query it was handed, so tests can assert what reached the store.
    pub struct CountingPostStore {
        inner: InMemoryCatalog,
        search_calls: AtomicUsize,
        last_query: Mutex<Option<PostQuery>>,
    }

    impl CountingPostStore {
        pub fn new(inner: InMemoryCatalog) -> Self {
            Self {
                inner,
                search_calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            }
        }

        /// Number of post_search calls observed.
        pub fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        /// The most recent query handed to post_search.
        pub fn last_query(&self) -> Option<PostQuery> {
            self.last_query.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostStore for CountingPostStore {
        async fn post_search(&self, q: &PostQuery) -> SkilletResult<Vec<Post>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(q.clone());
            self.inner.post_search(q).await
        }

        async fn post_titles(&self, text: &str, limit: i32) -> SkilletResult<Vec<String>> {
            self.inner.post_titles(text, limit).await
        }

        async fn post_categories(&self, text: &str) -> SkilletResult<Vec<String>> {
            self.inner.post_categories(text).await
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertions for the Skillet error taxonomy.

    use super::*;

    /// Assert that a SkilletResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &SkilletResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a SkilletResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &SkilletResult<T>) {
        match result {
            Err(SkilletError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that a SkilletResult is a Store error.
    #[track_caller]
    pub fn assert_store_error<T: std::fmt::Debug>(result: &SkilletResult<T>) {
        match result {
            Err(SkilletError::Store(_)) => {}
            other => panic!("Expected Store error, got: {:?}", other),
        }
    }
}
