//! Enemy field generation
//!
//! Rejection sampling: draw a random circle in the right-hand spawn band,
//! keep it if it clears every enemy placed so far, otherwise draw again.

use rand::Rng;

use super::collision::edge_gap;
use super::state::{Enemy, WorldBounds};
use crate::consts::{
    CLEARANCE_FACTOR, ENEMY_RADIUS_MAX, ENEMY_RADIUS_MIN, MAX_ENEMY_COUNT, MAX_PLACEMENT_ATTEMPTS,
};
use crate::error::FieldTooDenseError;
use crate::settings::Settings;

/// Inputs for one field generation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    pub world: WorldBounds,
    /// Enemy radius range, half-open
    pub radius_min: f32,
    pub radius_max: f32,
    /// Minimum edge gap between enemies
    pub clearance: f32,
    /// Candidates tried per enemy
    pub max_attempts: u32,
}

impl FieldParams {
    /// Classic radius range, clearance and attempt cap for `count` enemies
    pub fn new(count: usize, world: WorldBounds, player_radius: f32) -> Self {
        Self {
            count,
            world,
            radius_min: ENEMY_RADIUS_MIN,
            radius_max: ENEMY_RADIUS_MAX,
            clearance: CLEARANCE_FACTOR * player_radius,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn from_settings(settings: &Settings, world: WorldBounds) -> Self {
        Self {
            count: settings.enemy_count,
            world,
            radius_min: settings.enemy_radius_min,
            radius_max: settings.enemy_radius_max,
            clearance: settings.clearance(),
            max_attempts: settings.max_placement_attempts,
        }
    }
}

/// Generate `params.count` enemies with at least `params.clearance` between
/// any two edges.
///
/// Enemies spawn with `x` in `[width/2 + r, width*1.5 - r)` and `y` in
/// `[r, height - r)`, so most start off-screen to the right.
///
/// # Panics
///
/// Panics if the radius range is empty or not finite. `FieldParams` built
/// from validated `Settings` always has a finite, non-empty range.
pub fn generate_field<R: Rng + ?Sized>(
    rng: &mut R,
    params: &FieldParams,
) -> Result<Vec<Enemy>, FieldTooDenseError> {
    let mut enemies: Vec<Enemy> = Vec::with_capacity(params.count.min(MAX_ENEMY_COUNT));
    let mut total_attempts = 0u64;

    for _ in 0..params.count {
        let mut attempts = 0u32;
        let enemy = loop {
            if attempts == params.max_attempts {
                log::warn!(
                    "Gave up placing enemy {} of {} after {} attempts",
                    enemies.len() + 1,
                    params.count,
                    attempts
                );
                return Err(FieldTooDenseError {
                    requested: params.count,
                    placed: enemies.len(),
                    attempts,
                });
            }
            attempts += 1;

            let Some(candidate) = sample_candidate(rng, params) else {
                continue;
            };
            if is_clear(&candidate, &enemies, params.clearance) {
                break candidate;
            }
        };
        total_attempts += attempts as u64;
        enemies.push(enemy);
    }

    log::debug!(
        "Generated {} enemies in {} attempts ({}x{})",
        enemies.len(),
        total_attempts,
        params.world.width,
        params.world.height
    );
    Ok(enemies)
}

/// Draw one candidate; `None` when the world is too small for the radius
fn sample_candidate<R: Rng + ?Sized>(rng: &mut R, params: &FieldParams) -> Option<Enemy> {
    let radius = rng.random_range(params.radius_min..params.radius_max);

    let min_x = params.world.width / 2.0 + radius;
    let max_x = params.world.width * 1.5 - radius;
    let min_y = radius;
    let max_y = params.world.height - radius;
    if !(min_x < max_x && min_y < max_y) {
        return None;
    }

    let x = rng.random_range(min_x..max_x);
    let y = rng.random_range(min_y..max_y);
    Some(Enemy::new(x, y, radius))
}

/// Candidate keeps `clearance` from every accepted enemy
fn is_clear(candidate: &Enemy, placed: &[Enemy], clearance: f32) -> bool {
    placed
        .iter()
        .all(|other| edge_gap(&candidate.circle, &other.circle) >= clearance)
}
