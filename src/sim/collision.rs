//! Circle-circle geometry
//!
//! Everything is measured edge to edge: centre distance minus both radii.

use glam::Vec2;

use super::state::{Circle, Enemy, Player};

/// One player-to-enemy measurement taken during a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub from: Vec2,
    pub to: Vec2,
    /// Centre-to-centre distance
    pub distance: f32,
}

/// Gap between two circle edges (negative when they overlap)
#[inline]
pub fn edge_gap(a: &Circle, b: &Circle) -> f32 {
    a.pos.distance(b.pos) - a.radius - b.radius
}

/// Strict overlap test; touching circles do not collide
#[inline]
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    edge_gap(a, b) < 0.0
}

/// Result of checking the player against the whole field
#[derive(Debug, Clone, Default)]
pub struct CollisionCheck {
    pub hit: bool,
    /// One probe per enemy, in enemy order
    pub probes: Vec<Probe>,
}

/// Check the player against every enemy, recording each distance
pub fn check_player(player: &Player, enemies: &[Enemy]) -> CollisionCheck {
    let mut check = CollisionCheck {
        hit: false,
        probes: Vec::with_capacity(enemies.len()),
    };

    for enemy in enemies {
        let distance = player.circle.pos.distance(enemy.circle.pos);
        check.probes.push(Probe {
            from: player.circle.pos,
            to: enemy.circle.pos,
            distance,
        });
        if distance - player.circle.radius - enemy.circle.radius < 0.0 {
            check.hit = true;
        }
    }

    check
}
