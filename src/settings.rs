//! Gameplay settings
//!
//! Defaults match the classic game. Overrides come from JSON or a browser
//! URL query string; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Enemies per generated field
    pub enemy_count: usize,
    /// Inclusive lower bound of enemy radius
    pub enemy_radius_min: f32,
    /// Exclusive upper bound of enemy radius
    pub enemy_radius_max: f32,
    /// Spawn clearance in multiples of the player radius
    pub clearance_factor: f32,
    /// Candidates tried per enemy before giving up
    pub max_placement_attempts: u32,

    // === Motion (pixels per tick) ===
    pub enemy_speed: f32,
    pub player_speed: f32,
    pub player_radius: f32,

    // === Debug ===
    /// Draw player-to-enemy distance lines
    pub show_collision_distances: bool,

    /// Fixed run seed (time-based when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enemy_count: ENEMY_COUNT,
            enemy_radius_min: ENEMY_RADIUS_MIN,
            enemy_radius_max: ENEMY_RADIUS_MAX,
            clearance_factor: CLEARANCE_FACTOR,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            enemy_speed: ENEMY_SPEED,
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,

            show_collision_distances: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `key=value` pairs from a URL query (`?enemies=20&debug=1`).
    ///
    /// Unknown keys are logged and skipped. The result is validated.
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "enemies" | "enemy_count" => self.enemy_count = parse_value(key, value)?,
                "enemy_speed" => self.enemy_speed = parse_value(key, value)?,
                "player_speed" => self.player_speed = parse_value(key, value)?,
                "player_radius" => self.player_radius = parse_value(key, value)?,
                "radius_min" => self.enemy_radius_min = parse_value(key, value)?,
                "radius_max" => self.enemy_radius_max = parse_value(key, value)?,
                "clearance" => self.clearance_factor = parse_value(key, value)?,
                "attempts" => self.max_placement_attempts = parse_value(key, value)?,
                "seed" => self.seed = Some(parse_value(key, value)?),
                "debug" => self.show_collision_distances = parse_flag(key, value)?,
                _ => log::warn!("Ignoring unknown setting: {}", key),
            }
        }
        self.validate()
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("enemy_radius_min", self.enemy_radius_min),
            ("enemy_radius_max", self.enemy_radius_max),
            ("clearance_factor", self.clearance_factor),
            ("enemy_speed", self.enemy_speed),
            ("player_speed", self.player_speed),
            ("player_radius", self.player_radius),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.enemy_count > MAX_ENEMY_COUNT {
            return Err(ConfigError::TooManyEnemies {
                count: self.enemy_count,
                max: MAX_ENEMY_COUNT,
            });
        }
        if !(self.enemy_radius_min >= 0.0 && self.enemy_radius_min < self.enemy_radius_max) {
            return Err(ConfigError::EmptyRadiusRange {
                min: self.enemy_radius_min,
                max: self.enemy_radius_max,
            });
        }
        for (field, value) in [
            ("enemy_speed", self.enemy_speed),
            ("player_speed", self.player_speed),
            ("player_radius", self.player_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.clearance_factor >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "clearance_factor",
                value: self.clearance_factor,
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Minimum edge-to-edge gap between enemies at spawn
    pub fn clearance(&self) -> f32 {
        self.clearance_factor * self.player_radius
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
