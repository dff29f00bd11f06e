use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::types::{RecommendError, ScoredRecipe};
use crate::db::{Recipe, RecipeQuery, RecipeRepo};
use crate::util::{normalize_label, normalize_labels};

/// Number of recipes returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 3;

/// Number of candidates fetched from the store per query.
pub const CANDIDATE_LIMIT: usize = 10;

pub struct RecommendationEngine<R: RecipeRepo + ?Sized> {
    repo: Arc<R>,
}

impl<R: RecipeRepo + ?Sized> Clone for RecommendationEngine<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: RecipeRepo + ?Sized> RecommendationEngine<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Recommend at most `limit` recipes for `mood` given the ingredients on
    /// hand, best ingredient overlap first.
    ///
    /// Mood and ingredients are compared case-insensitively. If no recipe
    /// carries the mood, recipes sharing any ingredient are used instead.
    /// Finding nothing at all is not an error.
    pub async fn recommend(
        &self,
        mood: &str,
        ingredients: &[String],
        limit: usize,
    ) -> Result<Vec<ScoredRecipe>, RecommendError> {
        let mood = normalize_label(mood)
            .ok_or_else(|| RecommendError::InvalidRequest("mood is required".to_string()))?;

        let wanted = normalize_labels(ingredients);
        if wanted.is_empty() {
            return Err(RecommendError::InvalidRequest(
                "at least one ingredient is required".to_string(),
            ));
        }

        let query = RecipeQuery::by_ingredients(wanted.clone()).with_mood(mood.as_str());
        let mut candidates = self.repo.find_recipes(&query, CANDIDATE_LIMIT).await?;

        if candidates.is_empty() {
            debug!(mood = %mood, "No recipe for mood, matching on ingredients only");
            let fallback = RecipeQuery::by_ingredients(wanted.clone());
            candidates = self.repo.find_recipes(&fallback, CANDIDATE_LIMIT).await?;
        }

        let ranked = rank(candidates, &wanted, limit);
        debug!(
            mood = %mood,
            ingredients = wanted.len(),
            results = ranked.len(),
            "Recommendation complete"
        );

        Ok(ranked)
    }
}

/// Score `candidates` against `wanted` and keep the best `limit`.
///
/// The sort is stable, so recipes with equal scores keep the order the store
/// returned them in.
pub fn rank(candidates: Vec<Recipe>, wanted: &[String], limit: usize) -> Vec<ScoredRecipe> {
    let wanted: HashSet<&str> = wanted.iter().map(String::as_str).collect();

    let mut scored: Vec<ScoredRecipe> = candidates
        .into_iter()
        .map(|recipe| score(recipe, &wanted))
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(limit);
    scored
}

fn score(recipe: Recipe, wanted: &HashSet<&str>) -> ScoredRecipe {
    let matching_ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|i| wanted.contains(i.as_str()))
        .cloned()
        .collect();

    ScoredRecipe {
        match_score: matching_ingredients.len(),
        matching_ingredients,
        recipe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, DbResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store that answers membership queries over a fixed list and
    /// remembers every query it was asked.
    struct FakeRepo {
        recipes: Vec<Recipe>,
        queries: Mutex<Vec<RecipeQuery>>,
        fail: bool,
    }

    impl FakeRepo {
        fn new(recipes: Vec<Recipe>) -> Arc<Self> {
            Arc::new(Self {
                recipes,
                queries: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                recipes: Vec::new(),
                queries: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn queries(&self) -> Vec<RecipeQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecipeRepo for FakeRepo {
        async fn find_recipes(&self, query: &RecipeQuery, limit: usize) -> DbResult<Vec<Recipe>> {
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
            }
            Ok(self
                .recipes
                .iter()
                .filter(|r| r.ingredients.iter().any(|i| query.ingredients.contains(i)))
                .filter(|r| query.mood.as_ref().map_or(true, |m| r.mood_tags.contains(m)))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn list_recipes(&self) -> DbResult<Vec<Recipe>> {
            Ok(self.recipes.clone())
        }

        async fn get_recipe(&self, id: &str) -> DbResult<Recipe> {
            self.recipes
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| DbError::NotFound(id.to_string()))
        }

        async fn count_recipes(&self) -> DbResult<i64> {
            Ok(self.recipes.len() as i64)
        }

        async fn replace_all(&self, _recipes: &[Recipe]) -> DbResult<usize> {
            unimplemented!("read-only fake")
        }
    }

    fn recipe(name: &str, moods: &[&str], ingredients: &[&str]) -> Recipe {
        Recipe {
            id: crate::util::recipe_id(name),
            name: name.to_string(),
            mood_tags: moods.iter().map(|s| s.to_string()).collect(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            cooking_time: "30 minutes".to_string(),
            instructions: String::new(),
            mood_description: String::new(),
            created: None,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn kitchen() -> Vec<Recipe> {
        vec![
            recipe("Cheese Toast", &["tired", "stressed"], &["bread", "cheese", "butter"]),
            recipe(
                "Comfort Mac and Cheese",
                &["stressed", "sad"],
                &["pasta", "cheese", "milk", "butter", "flour"],
            ),
            recipe("Mushroom Risotto", &["romantic"], &["rice", "mushroom", "onion", "parmesan"]),
            recipe("Fried Rice", &["lazy"], &["rice", "egg", "soy sauce"]),
            recipe("Pancakes", &["happy"], &["flour", "milk", "egg", "butter"]),
        ]
    }

    #[tokio::test]
    async fn test_mood_match_ranks_by_overlap() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let results = engine
            .recommend(
                "Stressed",
                &strings(&["pasta", "cheese", "milk", "butter", "flour"]),
                DEFAULT_LIMIT,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe.name, "Comfort Mac and Cheese");
        assert_eq!(results[0].match_score, 5);
        assert_eq!(results[1].recipe.name, "Cheese Toast");
        assert_eq!(results[1].match_score, 2);
        assert_eq!(results[1].matching_ingredients, strings(&["cheese", "butter"]));

        let queries = repo.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].mood.as_deref(), Some("stressed"));
    }

    #[tokio::test]
    async fn test_falls_back_to_ingredients_when_mood_unknown() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let results = engine
            .recommend("excited", &strings(&["rice", "mushroom"]), DEFAULT_LIMIT)
            .await
            .unwrap();

        assert_eq!(results[0].recipe.name, "Mushroom Risotto");
        assert_eq!(results[0].match_score, 2);
        assert_eq!(results[1].recipe.name, "Fried Rice");
        assert_eq!(results[1].match_score, 1);

        let queries = repo.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].mood.as_deref(), Some("excited"));
        assert_eq!(queries[1].mood, None);
        assert_eq!(queries[1].ingredients, strings(&["rice", "mushroom"]));
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let results = engine
            .recommend("happy", &strings(&["nonexistent-item"]), DEFAULT_LIMIT)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(repo.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_limit_and_ordering() {
        let engine = RecommendationEngine::new(FakeRepo::new(kitchen()));
        let wanted = strings(&["flour", "milk", "egg", "butter", "cheese", "rice", "bread"]);

        let results = engine.recommend("nobody", &wanted, DEFAULT_LIMIT).await.unwrap();
        assert_eq!(results.len(), DEFAULT_LIMIT);
        for pair in results.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }

        let all = engine.recommend("nobody", &wanted, 100).await.unwrap();
        assert_eq!(all.len(), 5);

        let none = engine.recommend("nobody", &wanted, 0).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_ties_keep_store_order() {
        let engine = RecommendationEngine::new(FakeRepo::new(kitchen()));

        let results = engine
            .recommend("nobody", &strings(&["butter"]), 10)
            .await
            .unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Cheese Toast", "Comfort Mac and Cheese", "Pancakes"]);
    }

    #[tokio::test]
    async fn test_is_idempotent() {
        let engine = RecommendationEngine::new(FakeRepo::new(kitchen()));
        let wanted = strings(&["egg", "flour", "rice"]);

        let first = engine.recommend("happy", &wanted, 3).await.unwrap();
        let second = engine.recommend("happy", &wanted, 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_input_is_normalized() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let results = engine
            .recommend("  ROMANTIC ", &strings(&[" Rice", "rice", "", "MUSHROOM"]), 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 2);
        assert_eq!(repo.queries()[0].ingredients, strings(&["rice", "mushroom"]));
    }

    #[tokio::test]
    async fn test_rejects_invalid_requests() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let err = engine.recommend("happy", &[], 3).await.unwrap_err();
        assert!(matches!(err, RecommendError::InvalidRequest(_)));

        let err = engine.recommend("happy", &strings(&["  "]), 3).await.unwrap_err();
        assert!(matches!(err, RecommendError::InvalidRequest(_)));

        let err = engine.recommend(" ", &strings(&["rice"]), 3).await.unwrap_err();
        assert!(matches!(err, RecommendError::InvalidRequest(_)));

        assert!(repo.queries().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let repo = FakeRepo::failing();
        let engine = RecommendationEngine::new(repo.clone());

        let err = engine.recommend("happy", &strings(&["rice"]), 3).await.unwrap_err();
        assert!(matches!(err, RecommendError::Retrieval(_)));
        assert_eq!(repo.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_whitespace_runs_in_request_match_stored_labels() {
        let mut recipes = kitchen();
        recipes.push(recipe("Pepper Stew", &["very tired"], &["bell pepper", "onion"]));
        let engine = RecommendationEngine::new(FakeRepo::new(recipes));

        let results = engine
            .recommend("Very  Tired", &strings(&["bell  pepper", " Onion\t"]), 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.name, "Pepper Stew");
        assert_eq!(results[0].match_score, 2);
        assert_eq!(results[0].matching_ingredients, strings(&["bell pepper", "onion"]));
    }

    #[tokio::test]
    async fn test_large_ingredient_set_is_intersected_in_full() {
        let repo = FakeRepo::new(kitchen());
        let engine = RecommendationEngine::new(repo.clone());

        let mut wanted: Vec<String> = (0..10_000).map(|i| format!("x{}", i)).collect();
        wanted.push("mushroom".to_string());
        wanted.push("rice".to_string());

        let results = engine.recommend("romantic", &wanted, 3).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.name, "Mushroom Risotto");
        assert_eq!(results[0].match_score, 2);
        assert_eq!(results[0].matching_ingredients, strings(&["rice", "mushroom"]));
        assert_eq!(repo.queries()[0].ingredients.len(), 10_002);
    }

    #[test]
    fn test_rank_scores_intersection_in_recipe_order() {
        let candidates = vec![recipe(
            "Pancakes",
            &["happy"],
            &["flour", "milk", "egg", "butter"],
        )];
        let ranked = rank(candidates, &strings(&["butter", "flour", "salt"]), 3);

        assert_eq!(ranked[0].match_score, 2);
        assert_eq!(ranked[0].matching_ingredients, strings(&["flour", "butter"]));
    }
}
