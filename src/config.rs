use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::recommend::{CANDIDATE_LIMIT, DEFAULT_LIMIT};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendConfig {
    /// Results returned when a request does not ask for a number.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Upper bound on what a request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl RecommendConfig {
    /// The limit to use for a request that asked for `requested`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecipesConfig {
    /// Load the built-in recipe catalog at startup when the store is empty.
    #[serde(default = "default_true")]
    pub seed_if_empty: bool,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            seed_if_empty: true,
        }
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_max_limit() -> usize {
    CANDIDATE_LIMIT
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::ParseError(_, err) => ConfigError::ParseError(path.to_string(), err),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError("<inline>".to_string(), e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let recommend = &self.recommend;
        if recommend.default_limit == 0 {
            return Err(ConfigError::Invalid(
                "recommend.default_limit must be at least 1".to_string(),
            ));
        }
        if recommend.default_limit > recommend.max_limit {
            return Err(ConfigError::Invalid(format!(
                "recommend.default_limit ({}) exceeds recommend.max_limit ({})",
                recommend.default_limit, recommend.max_limit
            )));
        }
        Ok(())
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("moodmeal.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
