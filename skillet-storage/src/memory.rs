//! In-memory content catalog.
//!
//! HashMaps behind RwLocks, one per content kind. Backs the server when no
//! relational catalog is configured, and every test. Filtering, sorting,
//! and the limit/offset window all happen before data leaves a lock.

use crate::traits::{
    ArticleQuery, ArticleStore, CommentQuery, CommentStore, PostQuery, PostStore, RecipeQuery,
    RecipeStore, UserQuery, UserStore,
};
use async_trait::async_trait;
use skillet_core::{
    Article, Comment, ContentKind, Post, Recipe, SkilletError, SkilletResult, SortOrder,
    StoreError, UserProfile,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Case-insensitive containment. The needle must already be lowercase.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Apply the offset/limit window to an already-sorted list.
fn window<T>(items: Vec<T>, offset: i32, limit: i32) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

/// In-memory catalog over all five content kinds.
pub struct InMemoryCatalog {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
    recipes: Arc<RwLock<HashMap<Uuid, Recipe>>>,
    users: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
            recipes: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            articles: Arc::new(RwLock::new(HashMap::new())),
            comments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a post. Rejects duplicate IDs.
    pub fn insert_post(&self, post: Post) -> SkilletResult<()> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        if posts.contains_key(&post.post_id) {
            return Err(SkilletError::Store(StoreError::InsertFailed {
                kind: ContentKind::Post,
                reason: "already exists".to_string(),
            }));
        }
        posts.insert(post.post_id, post);
        Ok(())
    }

    /// Insert a recipe. Rejects duplicate IDs.
    pub fn insert_recipe(&self, recipe: Recipe) -> SkilletResult<()> {
        let mut recipes = self
            .recipes
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        if recipes.contains_key(&recipe.recipe_id) {
            return Err(SkilletError::Store(StoreError::InsertFailed {
                kind: ContentKind::Recipe,
                reason: "already exists".to_string(),
            }));
        }
        recipes.insert(recipe.recipe_id, recipe);
        Ok(())
    }

    /// Insert a user profile. Rejects duplicate IDs.
    pub fn insert_user(&self, user: UserProfile) -> SkilletResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        if users.contains_key(&user.user_id) {
            return Err(SkilletError::Store(StoreError::InsertFailed {
                kind: ContentKind::User,
                reason: "already exists".to_string(),
            }));
        }
        users.insert(user.user_id, user);
        Ok(())
    }

    /// Insert an article. Rejects duplicate IDs.
    pub fn insert_article(&self, article: Article) -> SkilletResult<()> {
        let mut articles = self
            .articles
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        if articles.contains_key(&article.article_id) {
            return Err(SkilletError::Store(StoreError::InsertFailed {
                kind: ContentKind::Article,
                reason: "already exists".to_string(),
            }));
        }
        articles.insert(article.article_id, article);
        Ok(())
    }

    /// Insert a comment. Rejects duplicate IDs.
    pub fn insert_comment(&self, comment: Comment) -> SkilletResult<()> {
        let mut comments = self
            .comments
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        if comments.contains_key(&comment.comment_id) {
            return Err(SkilletError::Store(StoreError::InsertFailed {
                kind: ContentKind::Comment,
                reason: "already exists".to_string(),
            }));
        }
        comments.insert(comment.comment_id, comment);
        Ok(())
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> SkilletResult<usize> {
        let mut total = 0;
        for guard in [
            self.posts.read().map(|g| g.len()).map_err(|_| ()),
            self.recipes.read().map(|g| g.len()).map_err(|_| ()),
            self.users.read().map(|g| g.len()).map_err(|_| ()),
            self.articles.read().map(|g| g.len()).map_err(|_| ()),
            self.comments.read().map(|g| g.len()).map_err(|_| ()),
        ] {
            total += guard.map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        }
        Ok(total)
    }

    /// Whether the catalog holds no records at all.
    pub fn is_empty(&self) -> SkilletResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove all records.
    pub fn clear(&self) -> SkilletResult<()> {
        self.posts
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?
            .clear();
        self.recipes
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?
            .clear();
        self.users
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?
            .clear();
        self.articles
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?
            .clear();
        self.comments
            .write()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?
            .clear();
        Ok(())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryCatalog {
    fn clone(&self) -> Self {
        Self {
            posts: Arc::clone(&self.posts),
            recipes: Arc::clone(&self.recipes),
            users: Arc::clone(&self.users),
            articles: Arc::clone(&self.articles),
            comments: Arc::clone(&self.comments),
        }
    }
}

// ============================================================================
// POST STORE
// ============================================================================

#[async_trait]
impl PostStore for InMemoryCatalog {
    async fn post_search(&self, q: &PostQuery) -> SkilletResult<Vec<Post>> {
        let posts = self
            .posts
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = q.text.to_lowercase();

        let mut out: Vec<Post> = posts
            .values()
            .filter(|p| {
                (!q.published_only || p.published)
                    && (contains_ci(&p.title, &text) || contains_ci(&p.body, &text))
                    && (q.categories.is_empty()
                        || p.category.as_ref().is_some_and(|c| {
                            q.categories.iter().any(|want| want.eq_ignore_ascii_case(c))
                        }))
                    && (q.tags.is_empty()
                        || p.tags
                            .iter()
                            .any(|t| q.tags.iter().any(|want| want.eq_ignore_ascii_case(t))))
                    && (q.authors.is_empty()
                        || q.authors.iter().any(|a| a.eq_ignore_ascii_case(&p.author)))
                    && q.date_from.map_or(true, |from| p.created_at >= from)
                    && q.date_to.map_or(true, |to| p.created_at <= to)
            })
            .cloned()
            .collect();

        match q.sort {
            SortOrder::Relevance | SortOrder::Newest => out.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.post_id.cmp(&a.post_id))
            }),
            SortOrder::Oldest => out.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then(a.post_id.cmp(&b.post_id))
            }),
            SortOrder::Popular => out.sort_by(|a, b| {
                b.like_count
                    .cmp(&a.like_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        Ok(window(out, q.offset, q.limit))
    }

    async fn post_titles(&self, text: &str, limit: i32) -> SkilletResult<Vec<String>> {
        let posts = self
            .posts
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = text.to_lowercase();

        let mut matched: Vec<&Post> = posts
            .values()
            .filter(|p| p.published && contains_ci(&p.title, &text))
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.post_id.cmp(&a.post_id))
        });

        Ok(matched
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|p| p.title.clone())
            .collect())
    }

    async fn post_categories(&self, text: &str) -> SkilletResult<Vec<String>> {
        let posts = self
            .posts
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = text.to_lowercase();

        let distinct: BTreeSet<String> = posts
            .values()
            .filter(|p| {
                p.published && (contains_ci(&p.title, &text) || contains_ci(&p.body, &text))
            })
            .filter_map(|p| p.category.clone())
            .collect();
        Ok(distinct.into_iter().collect())
    }
}

// ============================================================================
// RECIPE STORE
// ============================================================================

#[async_trait]
impl RecipeStore for InMemoryCatalog {
    async fn recipe_search(&self, q: &RecipeQuery) -> SkilletResult<Vec<Recipe>> {
        let recipes = self
            .recipes
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = q.text.to_lowercase();

        let mut out: Vec<Recipe> = recipes
            .values()
            .filter(|r| {
                (!q.published_only || r.published)
                    && (contains_ci(&r.title, &text)
                        || contains_ci(&r.description, &text)
                        || r.ingredients.iter().any(|i| contains_ci(i, &text))
                        || r.instructions.iter().any(|s| contains_ci(s, &text)))
                    && q.difficulty.map_or(true, |want| r.difficulty == Some(want))
                    && q.cuisine.as_ref().map_or(true, |want| {
                        r.cuisine
                            .as_ref()
                            .is_some_and(|c| c.eq_ignore_ascii_case(want))
                    })
                    && q.min_rating.map_or(true, |min| r.rating >= min)
            })
            .cloned()
            .collect();

        match q.sort {
            SortOrder::Relevance | SortOrder::Newest => out.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.recipe_id.cmp(&a.recipe_id))
            }),
            SortOrder::Oldest => out.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then(a.recipe_id.cmp(&b.recipe_id))
            }),
            SortOrder::Popular => out.sort_by(|a, b| {
                b.like_count
                    .cmp(&a.like_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        Ok(window(out, q.offset, q.limit))
    }

    async fn recipe_titles(&self, text: &str, limit: i32) -> SkilletResult<Vec<String>> {
        let recipes = self
            .recipes
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = text.to_lowercase();

        let mut matched: Vec<&Recipe> = recipes
            .values()
            .filter(|r| r.published && contains_ci(&r.title, &text))
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.recipe_id.cmp(&a.recipe_id))
        });

        Ok(matched
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|r| r.title.clone())
            .collect())
    }

    async fn recipe_cuisines(&self, text: &str) -> SkilletResult<Vec<String>> {
        let recipes = self
            .recipes
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = text.to_lowercase();

        let distinct: BTreeSet<String> = recipes
            .values()
            .filter(|r| {
                r.published
                    && (contains_ci(&r.title, &text)
                        || contains_ci(&r.description, &text)
                        || r.ingredients.iter().any(|i| contains_ci(i, &text))
                        || r.instructions.iter().any(|s| contains_ci(s, &text)))
            })
            .filter_map(|r| r.cuisine.clone())
            .collect();
        Ok(distinct.into_iter().collect())
    }
}

// ============================================================================
// USER STORE
// ============================================================================

#[async_trait]
impl UserStore for InMemoryCatalog {
    async fn user_search(&self, q: &UserQuery) -> SkilletResult<Vec<UserProfile>> {
        let users = self
            .users
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = q.text.to_lowercase();

        let mut out: Vec<UserProfile> = users
            .values()
            .filter(|u| {
                contains_ci(&u.username, &text)
                    || contains_ci(&u.email, &text)
                    || u.bio.as_ref().is_some_and(|b| contains_ci(b, &text))
            })
            .cloned()
            .collect();

        match q.sort {
            SortOrder::Relevance | SortOrder::Newest => out.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.user_id.cmp(&a.user_id))
            }),
            SortOrder::Oldest => out.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then(a.user_id.cmp(&b.user_id))
            }),
            SortOrder::Popular => out.sort_by(|a, b| {
                b.follower_count
                    .cmp(&a.follower_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        Ok(window(out, q.offset, q.limit))
    }
}

// ============================================================================
// ARTICLE STORE
// ============================================================================

#[async_trait]
impl ArticleStore for InMemoryCatalog {
    async fn article_search(&self, q: &ArticleQuery) -> SkilletResult<Vec<Article>> {
        let articles = self
            .articles
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = q.text.to_lowercase();

        let mut out: Vec<Article> = articles
            .values()
            .filter(|a| {
                (!q.published_only || a.published)
                    && (contains_ci(&a.title, &text)
                        || contains_ci(&a.body, &text)
                        || a.summary.as_ref().is_some_and(|s| contains_ci(s, &text)))
            })
            .cloned()
            .collect();

        match q.sort {
            SortOrder::Relevance | SortOrder::Newest => out.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.article_id.cmp(&a.article_id))
            }),
            SortOrder::Oldest => out.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then(a.article_id.cmp(&b.article_id))
            }),
            SortOrder::Popular => out.sort_by(|a, b| {
                b.like_count
                    .cmp(&a.like_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        Ok(window(out, q.offset, q.limit))
    }
}

// ============================================================================
// COMMENT STORE
// ============================================================================

#[async_trait]
impl CommentStore for InMemoryCatalog {
    async fn comment_search(&self, q: &CommentQuery) -> SkilletResult<Vec<Comment>> {
        let comments = self
            .comments
            .read()
            .map_err(|_| SkilletError::Store(StoreError::LockPoisoned))?;
        let text = q.text.to_lowercase();

        let mut out: Vec<Comment> = comments
            .values()
            .filter(|c| contains_ci(&c.body, &text))
            .cloned()
            .collect();

        match q.sort {
            SortOrder::Relevance | SortOrder::Newest => out.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.comment_id.cmp(&a.comment_id))
            }),
            SortOrder::Oldest => out.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then(a.comment_id.cmp(&b.comment_id))
            }),
            SortOrder::Popular => out.sort_by(|a, b| {
                b.like_count
                    .cmp(&a.like_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }

        Ok(window(out, q.offset, q.limit))
    }
}

// ============================================================================
// TESTS
// ============================================================================
