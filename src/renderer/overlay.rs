//! Collision distance overlay (debug)
//!
//! A line from the player to each nearby enemy, labelled with the centre
//! distance. Close enemies are drawn red and thicker.

use glam::Vec2;

use super::{Color, Surface};
use crate::consts::NEAR_PROBE_DIVISOR;
use crate::sim::Probe;

/// Line color and width for a probe distance
pub fn probe_style(distance: f32, world_width: f32) -> (Color, f32) {
    if distance < world_width / NEAR_PROBE_DIVISOR {
        (Color::Red, 1.0)
    } else {
        (Color::Green, 0.3)
    }
}

/// Draw every probe shorter than the world width
pub fn draw_collision_distances<S: Surface + ?Sized>(
    surface: &mut S,
    probes: &[Probe],
    world_width: f32,
) {
    for probe in probes.iter().filter(|p| p.distance < world_width) {
        let (color, width) = probe_style(probe.distance, world_width);
        surface.draw_line(probe.from, probe.to, color, width);

        let label = format!("{:.2}", probe.distance);
        surface.draw_text(&label, midpoint(probe.from, probe.to), color);
    }
}

#[inline]
fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}
