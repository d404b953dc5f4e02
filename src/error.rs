//! Error types
//!
//! Losing a round is not an error; it is a phase transition. These cover the
//! cases where a game cannot be set up at all.

use thiserror::Error;

/// Rejection sampling ran out of attempts before placing every enemy.
#[derive(Debug, Clone, Error, PartialEq)]
#[error(
    "field too dense: placed {placed} of {requested} enemies, \
     enemy {placed} rejected {attempts} candidates"
)]
pub struct FieldTooDenseError {
    /// Enemies asked for
    pub requested: usize,
    /// Enemies accepted before giving up
    pub placed: usize,
    /// Candidates tried for the enemy that could not be placed
    pub attempts: u32,
}

/// Invalid gameplay settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("enemy radius range [{min}, {max}) is empty or negative")]
    EmptyRadiusRange { min: f32, max: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("enemy_count {count} exceeds the maximum of {max}")]
    TooManyEnemies { count: usize, max: usize },
    #[error("max_placement_attempts must be at least 1")]
    ZeroAttempts,
    #[error("invalid value {value:?} for setting {key}")]
    InvalidValue { key: String, value: String },
    #[error("malformed settings JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

/// Anything that can stop a game from (re)starting.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error(transparent)]
    FieldTooDense(#[from] FieldTooDenseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
