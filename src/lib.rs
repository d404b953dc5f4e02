//! Circle Dodge - A side-scrolling avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (field generation, collisions, scoring)
//! - `renderer`: 2D drawing surface abstraction and frame painter
//! - `settings`: Tunable gameplay constants and overrides
//! - `error`: Typed errors for generation and configuration

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, FieldTooDenseError, GameError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player circle radius
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Player vertical speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 6.0;

    /// Enemy radius range, half-open
    pub const ENEMY_RADIUS_MIN: f32 = 20.0;
    pub const ENEMY_RADIUS_MAX: f32 = 40.0;
    /// Enemy leftward speed (pixels per tick)
    pub const ENEMY_SPEED: f32 = 5.0;
    /// Enemies per field
    pub const ENEMY_COUNT: usize = 50;
    /// Largest accepted enemy count
    pub const MAX_ENEMY_COUNT: usize = 1_000;

    /// Spawn clearance between enemy edges, in multiples of the player radius
    pub const CLEARANCE_FACTOR: f32 = 4.0;
    /// Candidates tried per enemy before generation gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Overlay probes closer than `width / NEAR_PROBE_DIVISOR` are drawn as danger
    pub const NEAR_PROBE_DIVISOR: f32 = 10.0;
}
