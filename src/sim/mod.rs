//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by enemy index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{CollisionCheck, Probe, check_player, circles_collide, edge_gap};
pub use field::{FieldParams, generate_field};
pub use input::{Direction, Intents, set_intent};
pub use state::{Circle, Enemy, GameEvent, GamePhase, GameState, Player, RngState, WorldBounds};
pub use tick::{TickOutcome, tick};
