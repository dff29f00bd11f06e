use serde::{Deserialize, Serialize};

use crate::db::{DbError, Recipe};

/// A recipe together with how well it fits the requested ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Number of requested ingredients the recipe uses.
    pub match_score: usize,
    /// The overlapping ingredients, in the recipe's own order.
    pub matching_ingredients: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Recipe retrieval failed: {0}")]
    Retrieval(#[from] DbError),
}
