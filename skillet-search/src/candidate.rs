//! Tagged candidate variant over the five content kinds.
//!
//! Internally the aggregator keeps the typed record; the flat
//! `SearchResult` projection happens once, at the response boundary.
//! Attributes without a common shape travel in the result's metadata.

use serde_json::json;
use skillet_core::{
    Article, Comment, ContentKind, EntityId, Post, Recipe, SearchResult, Timestamp, UserProfile,
};

/// Longest comment body prefix used as a display title.
const COMMENT_TITLE_CHARS: usize = 80;

fn comment_title(body: &str) -> String {
    if body.chars().count() <= COMMENT_TITLE_CHARS {
        body.to_string()
    } else {
        let prefix: String = body.chars().take(COMMENT_TITLE_CHARS).collect();
        format!("{prefix}...")
    }
}

/// One matching record, still in its kind-specific shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCandidate {
    Post(Post),
    Recipe(Recipe),
    User(UserProfile),
    Article(Article),
    Comment(Comment),
}

impl SearchCandidate {
    pub fn kind(&self) -> ContentKind {
        match self {
            SearchCandidate::Post(_) => ContentKind::Post,
            SearchCandidate::Recipe(_) => ContentKind::Recipe,
            SearchCandidate::User(_) => ContentKind::User,
            SearchCandidate::Article(_) => ContentKind::Article,
            SearchCandidate::Comment(_) => ContentKind::Comment,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            SearchCandidate::Post(p) => p.post_id,
            SearchCandidate::Recipe(r) => r.recipe_id,
            SearchCandidate::User(u) => u.user_id,
            SearchCandidate::Article(a) => a.article_id,
            SearchCandidate::Comment(c) => c.comment_id,
        }
    }

    /// Display title. Users surface their username; comments surface a
    /// body prefix.
    pub fn title(&self) -> String {
        match self {
            SearchCandidate::Post(p) => p.title.clone(),
            SearchCandidate::Recipe(r) => r.title.clone(),
            SearchCandidate::User(u) => u.username.clone(),
            SearchCandidate::Article(a) => a.title.clone(),
            SearchCandidate::Comment(c) => comment_title(&c.body),
        }
    }

    /// Body-side text the scorer runs against. Covers every field the
    /// kind's store matches on, so a matched record never scores zero.
    pub fn search_text(&self) -> String {
        match self {
            SearchCandidate::Post(p) => p.body.clone(),
            SearchCandidate::Recipe(r) => {
                let mut text = r.description.clone();
                for part in r.ingredients.iter().chain(r.instructions.iter()) {
                    text.push('\n');
                    text.push_str(part);
                }
                text
            }
            SearchCandidate::User(u) => match &u.bio {
                Some(bio) => format!("{bio}\n{}", u.email),
                None => u.email.clone(),
            },
            SearchCandidate::Article(a) => match &a.summary {
                Some(summary) => format!("{}\n{summary}", a.body),
                None => a.body.clone(),
            },
            SearchCandidate::Comment(c) => c.body.clone(),
        }
    }

    pub fn created_at(&self) -> Timestamp {
        match self {
            SearchCandidate::Post(p) => p.created_at,
            SearchCandidate::Recipe(r) => r.created_at,
            SearchCandidate::User(u) => u.created_at,
            SearchCandidate::Article(a) => a.created_at,
            SearchCandidate::Comment(c) => c.created_at,
        }
    }

    /// Like count, or follower count for users.
    pub fn popularity(&self) -> i32 {
        match self {
            SearchCandidate::Post(p) => p.like_count,
            SearchCandidate::Recipe(r) => r.like_count,
            SearchCandidate::User(u) => u.follower_count,
            SearchCandidate::Article(a) => a.like_count,
            SearchCandidate::Comment(c) => c.like_count,
        }
    }

    /// Project into the flat result shape, attaching the computed score.
    pub fn into_result(self, score: f32) -> SearchResult {
        match self {
            SearchCandidate::Post(p) => SearchResult {
                id: p.post_id,
                kind: ContentKind::Post,
                title: p.title,
                body: p.body,
                score,
                image: p.image,
                author: Some(p.author),
                category: p.category,
                tags: p.tags,
                metadata: json!({ "like_count": p.like_count }),
                created_at: p.created_at,
                updated_at: p.updated_at,
            },
            SearchCandidate::Recipe(r) => SearchResult {
                id: r.recipe_id,
                kind: ContentKind::Recipe,
                title: r.title,
                body: r.description,
                score,
                image: r.image,
                author: Some(r.author),
                category: None,
                tags: Vec::new(),
                metadata: json!({
                    "cuisine": r.cuisine,
                    "difficulty": r.difficulty,
                    "rating": r.rating,
                    "like_count": r.like_count,
                }),
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            SearchCandidate::User(u) => SearchResult {
                id: u.user_id,
                kind: ContentKind::User,
                title: u.username,
                body: u.bio.unwrap_or_default(),
                score,
                image: u.avatar,
                author: None,
                category: None,
                tags: Vec::new(),
                metadata: json!({ "follower_count": u.follower_count }),
                created_at: u.created_at,
                updated_at: u.updated_at,
            },
            SearchCandidate::Article(a) => {
                let Article {
                    article_id,
                    title,
                    body,
                    summary,
                    image,
                    author,
                    like_count,
                    published: _,
                    created_at,
                    updated_at,
                } = a;
                SearchResult {
                    id: article_id,
                    kind: ContentKind::Article,
                    title,
                    body: summary.unwrap_or(body),
                    score,
                    image,
                    author: Some(author),
                    category: None,
                    tags: Vec::new(),
                    metadata: json!({ "like_count": like_count }),
                    created_at,
                    updated_at,
                }
            }
            SearchCandidate::Comment(c) => SearchResult {
                id: c.comment_id,
                kind: ContentKind::Comment,
                title: comment_title(&c.body),
                body: c.body,
                score,
                image: None,
                author: Some(c.author),
                category: None,
                tags: Vec::new(),
                metadata: json!({ "post_id": c.post_id, "like_count": c.like_count }),
                created_at: c.created_at,
                updated_at: c.updated_at,
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
