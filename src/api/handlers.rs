use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use super::error::ApiError;
use super::types::*;
use crate::catalog::{MoodInfo, INGREDIENTS, MOODS};
use crate::db::{Recipe, RecipeRepo};
use crate::recommend::ScoredRecipe;
use crate::seed;
use crate::server::AppState;

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let recipes = state.db.count_recipes().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        recipes,
    }))
}

pub async fn list_moods() -> Json<&'static [MoodInfo]> {
    Json(MOODS)
}

pub async fn list_ingredients() -> Json<&'static [&'static str]> {
    Json(INGREDIENTS)
}

pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.db.list_recipes().await?;
    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.db.get_recipe(&recipe_id).await?;
    Ok(Json(recipe))
}

pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Vec<ScoredRecipe>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mood = request
        .mood
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("mood is required".to_string()))?;
    let ingredients = request
        .ingredients
        .filter(|list| list.iter().any(|i| !i.trim().is_empty()))
        .ok_or_else(|| ApiError::BadRequest("at least one ingredient is required".to_string()))?;

    let limit = state.config.recommend.effective_limit(request.limit);
    let results = state.engine.recommend(&mood, &ingredients, limit).await?;

    if results.is_empty() {
        info!(mood = %mood, "No recipes found for request");
    }

    Ok(Json(results))
}

pub async fn reseed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let inserted = seed::reseed(state.db.as_ref()).await?;
    Ok(Json(SeedResponse { inserted }))
}
