use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait RecipeRepo: Send + Sync {
    /// Recipes matching `query`, in insertion order, at most `limit` of them.
    async fn find_recipes(&self, query: &RecipeQuery, limit: usize) -> DbResult<Vec<Recipe>>;
    async fn list_recipes(&self) -> DbResult<Vec<Recipe>>;
    async fn get_recipe(&self, id: &str) -> DbResult<Recipe>;
    async fn count_recipes(&self) -> DbResult<i64>;
    /// Clear the collection and insert `recipes` in one step. Returns the
    /// number of records inserted.
    async fn replace_all(&self, recipes: &[Recipe]) -> DbResult<usize>;
}
