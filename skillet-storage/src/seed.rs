//! JSON seed loading for the in-memory catalog.
//!
//! A seed file is a single JSON object with one array per content kind.
//! Absent kinds default to empty, so partial seeds are fine.

use crate::memory::InMemoryCatalog;
use serde::{Deserialize, Serialize};
use skillet_core::{
    Article, Comment, Post, Recipe, SkilletError, SkilletResult, StoreError, UserProfile,
};
use std::path::Path;

/// Deserialized seed content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl SeedData {
    /// Read and parse a seed file.
    pub fn from_path(path: &Path) -> SkilletResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SkilletError::Store(StoreError::SeedFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            SkilletError::Store(StoreError::SeedFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Insert every record into the catalog. Returns the number inserted.
    pub fn apply(&self, catalog: &InMemoryCatalog) -> SkilletResult<usize> {
        for post in &self.posts {
            catalog.insert_post(post.clone())?;
        }
        for recipe in &self.recipes {
            catalog.insert_recipe(recipe.clone())?;
        }
        for user in &self.users {
            catalog.insert_user(user.clone())?;
        }
        for article in &self.articles {
            catalog.insert_article(article.clone())?;
        }
        for comment in &self.comments {
            catalog.insert_comment(comment.clone())?;
        }
        Ok(self.len())
    }

    /// Total number of records in the seed.
    pub fn len(&self) -> usize {
        self.posts.len()
            + self.recipes.len()
            + self.users.len()
            + self.articles.len()
            + self.comments.len()
    }

    /// Whether the seed holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{PostQuery, PostStore};
    use chrono::Utc;
    use skillet_core::new_entity_id;
    use std::io::Write;

    fn sample_seed() -> SeedData {
        let now = Utc::now();
        SeedData {
            posts: vec![Post {
                post_id: new_entity_id(),
                title: "Farmers market haul".to_string(),
                body: "tomatoes and basil".to_string(),
                image: None,
                category: Some("Garden".to_string()),
                tags: vec!["summer".to_string()],
                author: "ana".to_string(),
                like_count: 4,
                published: true,
                created_at: now,
                updated_at: now,
            }],
            recipes: vec![Recipe {
                recipe_id: new_entity_id(),
                title: "Caprese salad".to_string(),
                description: "five minutes, no cooking".to_string(),
                ingredients: vec!["tomatoes".to_string(), "mozzarella".to_string()],
                instructions: vec!["slice".to_string(), "layer".to_string()],
                image: None,
                cuisine: Some("Italian".to_string()),
                difficulty: None,
                rating: 4.2,
                like_count: 9,
                author: "ana".to_string(),
                published: true,
                created_at: now,
                updated_at: now,
            }],
            users: Vec::new(),
            articles: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_seed_round_trips_through_file_and_apply() {
        let seed = sample_seed();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&seed).unwrap().as_bytes())
            .unwrap();

        let loaded = SeedData::from_path(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);

        let catalog = InMemoryCatalog::new();
        let inserted = loaded.apply(&catalog).unwrap();
        assert_eq!(inserted, 2);

        let q = PostQuery {
            text: "tomatoes".to_string(),
            published_only: true,
            limit: 20,
            ..PostQuery::default()
        };
        assert_eq!(catalog.post_search(&q).await.unwrap().len(), 1);
    }

    #[test]
    fn test_partial_seed_defaults_missing_kinds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"users": []}"#).unwrap();

        let loaded = SeedData::from_path(file.path()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let result = SeedData::from_path(file.path());
        assert!(matches!(
            result,
            Err(SkilletError::Store(StoreError::SeedFailed { .. }))
        ));
    }

    #[test]
    fn test_missing_seed_file_is_rejected() {
        let result = SeedData::from_path(Path::new("/nonexistent/seed.json"));
        assert!(matches!(
            result,
            Err(SkilletError::Store(StoreError::SeedFailed { .. }))
        ));
    }

    #[test]
    fn test_duplicate_ids_in_seed_are_rejected() {
        let mut seed = sample_seed();
        seed.posts.push(seed.posts[0].clone());

        let catalog = InMemoryCatalog::new();
        assert!(seed.apply(&catalog).is_err());
    }
}
