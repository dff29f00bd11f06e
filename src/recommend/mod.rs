//! Mood and ingredient based recipe ranking.
//!
//! [`RecommendationEngine::recommend`] asks the store for recipes tagged with
//! the requested mood that share at least one ingredient with the request.
//! When that yields nothing it asks again without the mood. Candidates are
//! scored by ingredient overlap and the best `limit` are returned.

pub mod engine;
pub mod types;

pub use engine::{rank, RecommendationEngine, CANDIDATE_LIMIT, DEFAULT_LIMIT};
pub use types::{RecommendError, ScoredRecipe};
