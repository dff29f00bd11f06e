use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::normalize_label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub mood_tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub description: String,
    pub cooking_time: String,
    pub instructions: String,
    pub mood_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Check the stored-record invariants: a name, and non-empty sets of
    /// unique mood tags and ingredients, each already in the form
    /// `normalize_label` gives request input.
    pub fn validate(&self) -> DbResult<()> {
        if self.id.trim().is_empty() {
            return Err(DbError::InvalidRecord(format!("Recipe {:?} has no id", self.name)));
        }
        if self.name.trim().is_empty() {
            return Err(DbError::InvalidRecord(format!("Recipe {} has no name", self.id)));
        }
        check_label_set(&self.name, "mood tag", &self.mood_tags)?;
        check_label_set(&self.name, "ingredient", &self.ingredients)?;
        Ok(())
    }
}

fn check_label_set(recipe: &str, kind: &str, labels: &[String]) -> DbResult<()> {
    if labels.is_empty() {
        return Err(DbError::InvalidRecord(format!("Recipe {:?} has no {}s", recipe, kind)));
    }
    for (idx, label) in labels.iter().enumerate() {
        if normalize_label(label).as_deref() != Some(label.as_str()) {
            return Err(DbError::InvalidRecord(format!(
                "Recipe {:?} has a blank or unnormalized {}: {:?}",
                recipe, kind, label
            )));
        }
        if labels[..idx].contains(label) {
            return Err(DbError::InvalidRecord(format!(
                "Recipe {:?} lists {} {:?} twice",
                recipe, kind, label
            )));
        }
    }
    Ok(())
}

/// Membership filter for `RecipeRepo::find_recipes`.
///
/// A recipe matches when at least one of `ingredients` is in its ingredient
/// set and, if `mood` is set, its mood tags contain `mood` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeQuery {
    pub mood: Option<String>,
    pub ingredients: Vec<String>,
}

impl RecipeQuery {
    pub fn by_ingredients(ingredients: Vec<String>) -> Self {
        Self {
            mood: None,
            ingredients,
        }
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;
