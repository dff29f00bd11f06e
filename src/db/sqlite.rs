use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

const RECIPE_COLUMNS: &str =
    "r.id, r.name, r.description, r.cookingtime, r.instructions, r.mooddescription, r.created";

pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    description: String,
    cookingtime: String,
    instructions: String,
    mooddescription: String,
    created: Option<String>,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        // Every connection to an in-memory database gets its own empty
        // database, so keep exactly one and never let it expire.
        let in_memory = db_path.contains(":memory:") || db_path.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Attach mood tags and ingredients to bare recipe rows, keeping the row
    /// order and each set's stored order.
    async fn hydrate(&self, rows: Vec<RecipeRow>) -> DbResult<Vec<Recipe>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let ids_json = serde_json::to_string(&ids)?;

        let moods = sqlx::query_as::<_, (String, String)>(
            "SELECT recipeid, mood FROM recipe_moods
             WHERE recipeid IN (SELECT value FROM json_each(?))
             ORDER BY recipeid, position",
        )
        .bind(&ids_json)
        .fetch_all(&self.pool)
        .await?;

        let ingredients = sqlx::query_as::<_, (String, String)>(
            "SELECT recipeid, ingredient FROM recipe_ingredients
             WHERE recipeid IN (SELECT value FROM json_each(?))
             ORDER BY recipeid, position",
        )
        .bind(&ids_json)
        .fetch_all(&self.pool)
        .await?;

        let mut mood_map: HashMap<String, Vec<String>> = HashMap::new();
        for (recipe_id, mood) in moods {
            mood_map.entry(recipe_id).or_default().push(mood);
        }

        let mut ingredient_map: HashMap<String, Vec<String>> = HashMap::new();
        for (recipe_id, ingredient) in ingredients {
            ingredient_map.entry(recipe_id).or_default().push(ingredient);
        }

        let recipes = rows
            .into_iter()
            .map(|row| Recipe {
                mood_tags: mood_map.remove(&row.id).unwrap_or_default(),
                ingredients: ingredient_map.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                description: row.description,
                cooking_time: row.cookingtime,
                instructions: row.instructions,
                mood_description: row.mooddescription,
                created: row.created.and_then(|s| {
                    DateTime::parse_from_rfc3339(&s)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                }),
            })
            .collect();

        Ok(recipes)
    }
}

#[async_trait]
impl RecipeRepo for SqliteRepository {
    async fn find_recipes(&self, query: &RecipeQuery, limit: usize) -> DbResult<Vec<Recipe>> {
        if query.ingredients.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let ingredients_json = serde_json::to_string(&query.ingredients)?;
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r
             WHERE EXISTS (
                 SELECT 1 FROM recipe_ingredients i
                 WHERE i.recipeid = r.id
                 AND i.ingredient IN (SELECT value FROM json_each(?))
             )
             AND (? IS NULL OR EXISTS (
                 SELECT 1 FROM recipe_moods m
                 WHERE m.recipeid = r.id AND m.mood = ?
             ))
             ORDER BY r.seq
             LIMIT ?"
        );

        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(&ingredients_json)
            .bind(query.mood.as_deref())
            .bind(query.mood.as_deref())
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        debug!(
            mood = ?query.mood,
            ingredients = query.ingredients.len(),
            found = rows.len(),
            "find_recipes"
        );

        self.hydrate(rows).await
    }

    async fn list_recipes(&self) -> DbResult<Vec<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r ORDER BY r.seq");
        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        self.hydrate(rows).await
    }

    async fn get_recipe(&self, id: &str) -> DbResult<Recipe> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = ?");
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => DbError::NotFound(format!("Recipe not found: {}", id)),
                _ => DbError::Sqlx(e),
            })?;

        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DbError::NotFound(format!("Recipe not found: {}", id)))
    }

    async fn count_recipes(&self) -> DbResult<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn replace_all(&self, recipes: &[Recipe]) -> DbResult<usize> {
        for recipe in recipes {
            recipe.validate()?;
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM recipe_moods")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipes").execute(&mut *tx).await?;

        for recipe in recipes {
            let created = recipe.created.unwrap_or(now);

            sqlx::query(
                "INSERT INTO recipes
                (id, name, description, cookingtime, instructions, mooddescription, created)
                VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&recipe.id)
            .bind(&recipe.name)
            .bind(&recipe.description)
            .bind(&recipe.cooking_time)
            .bind(&recipe.instructions)
            .bind(&recipe.mood_description)
            .bind(created.to_rfc3339())
            .execute(&mut *tx)
            .await?;

            for (position, mood) in recipe.mood_tags.iter().enumerate() {
                sqlx::query("INSERT INTO recipe_moods (recipeid, mood, position) VALUES (?, ?, ?)")
                    .bind(&recipe.id)
                    .bind(mood)
                    .bind(position as i64)
                    .execute(&mut *tx)
                    .await?;
            }

            for (position, ingredient) in recipe.ingredients.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO recipe_ingredients (recipeid, ingredient, position) VALUES (?, ?, ?)",
                )
                .bind(&recipe.id)
                .bind(ingredient)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        info!("Replaced recipe collection with {} recipes", recipes.len());
        Ok(recipes.len())
    }
}
