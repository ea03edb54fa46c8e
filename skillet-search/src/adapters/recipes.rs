//! Recipe search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};
use skillet_storage::{RecipeQuery, RecipeStore};

use crate::adapter::SearchAdapter;
use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

/// Searches published recipes by title, description, ingredients, and
/// instructions, honoring the difficulty, cuisine, and minimum-rating
/// filters. Contributes title suggestions and cuisine facets.
pub struct RecipeSearchAdapter {
    store: Arc<dyn RecipeStore>,
}

impl RecipeSearchAdapter {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchAdapter for RecipeSearchAdapter {
    fn kind(&self) -> ContentKind {
        ContentKind::Recipe
    }

    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>> {
        let query = RecipeQuery {
            text: ctx.text.clone(),
            difficulty: ctx.filters.difficulty,
            cuisine: ctx.filters.cuisine.clone(),
            min_rating: ctx.filters.min_rating,
            published_only: true,
            sort: ctx.sort,
            limit: ctx.limit,
            offset: ctx.offset,
        };
        let recipes = self.store.recipe_search(&query).await?;
        Ok(recipes.into_iter().map(SearchCandidate::Recipe).collect())
    }

    async fn suggest(&self, ctx: &QueryContext, limit: i32) -> SkilletResult<Vec<String>> {
        self.store.recipe_titles(&ctx.text, limit).await
    }

    async fn facets(&self, ctx: &QueryContext) -> SkilletResult<Vec<String>> {
        self.store.recipe_cuisines(&ctx.text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skillet_core::{new_entity_id, Recipe, SearchRequest};
    use skillet_storage::InMemoryCatalog;

    fn recipe(title: &str, cuisine: &str, rating: f32) -> Recipe {
        Recipe {
            recipe_id: new_entity_id(),
            title: title.to_string(),
            description: "a pantry standby".to_string(),
            ingredients: vec!["rice".to_string()],
            instructions: vec!["simmer".to_string()],
            image: None,
            cuisine: Some(cuisine.to_string()),
            difficulty: None,
            rating,
            like_count: 0,
            author: "ben".to_string(),
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn adapter_over(recipes: Vec<Recipe>) -> RecipeSearchAdapter {
        let catalog = InMemoryCatalog::new();
        for r in recipes {
            catalog.insert_recipe(r).unwrap();
        }
        RecipeSearchAdapter::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_min_rating_filter_carries_through() {
        let adapter = adapter_over(vec![
            recipe("Fried rice", "Chinese", 4.6),
            recipe("Rice pudding", "British", 3.1),
        ]);
        let mut req = SearchRequest::new("rice");
        req.filters.min_rating = Some(4.0);
        let ctx = QueryContext::from_request(&req);

        let candidates = adapter.search(&ctx).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title(), "Fried rice");
        assert_eq!(candidates[0].kind(), ContentKind::Recipe);
    }

    #[tokio::test]
    async fn test_facets_are_distinct_cuisines() {
        let adapter = adapter_over(vec![
            recipe("Fried rice", "Chinese", 4.6),
            recipe("Sticky rice", "Chinese", 4.2),
            recipe("Rice pudding", "British", 3.1),
        ]);
        let ctx = QueryContext::for_lookup("rice");

        let facets = adapter.facets(&ctx).await.unwrap();
        assert_eq!(facets, vec!["British".to_string(), "Chinese".to_string()]);
    }
}
