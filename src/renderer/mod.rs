//! Rendering module
//!
//! The simulation never draws. A frame is painted onto any `Surface`; the
//! browser build provides one backed by a canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod overlay;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use overlay::{draw_collision_distances, probe_style};

use glam::Vec2;

use crate::sim::GameState;

/// Fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
}

impl Color {
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

pub const BACKGROUND: Color = Color::Black;
pub const ENEMY_COLOR: Color = Color::White;
pub const PLAYER_COLOR: Color = Color::Red;

/// Minimal set of 2D drawing primitives
pub trait Surface {
    /// Fill the whole surface with the background
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
}

/// Paint one frame: background, optional overlay, enemies, player
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear();

    if state.settings.show_collision_distances {
        draw_collision_distances(surface, &state.probes, state.world.width);
    }

    for enemy in &state.enemies {
        surface.draw_circle(enemy.circle.pos, enemy.circle.radius, ENEMY_COLOR);
    }
    let player = &state.player.circle;
    surface.draw_circle(player.pos, player.radius, PLAYER_COLOR);
}

/// Text for the two score displays
pub fn score_text(state: &GameState) -> (String, String) {
    (
        format!("Current score: {}", state.score),
        format!("Highscore: {}", state.high_score),
    )
}

/// Surface that records calls, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Text { text: String, pos: Vec2, color: Color },
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}
