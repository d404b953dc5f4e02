//! Game state and core simulation types
//!
//! Everything the tick touches lives in `GameState`; nothing is global.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Probe;
use super::field::{FieldParams, generate_field};
use super::input::Intents;
use crate::error::GameError;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player was hit; frozen until a restart is accepted
    GameOverPrompt,
}

/// Something the shell may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy passed the player
    PointScored { score: u64 },
    /// The player was hit (emitted once per game over)
    Collision { score: u64 },
    /// A new round started after an accepted restart
    Restarted { high_score: u64 },
    /// The world was resized and the round reinitialized
    Resized { width: u32, height: u32 },
}

/// A circle in world space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius,
        }
    }
}

/// A drifting enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub circle: Circle,
    /// Already scored during the current pass
    pub counted_as_point: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            circle: Circle::new(x, y, radius),
            counted_as_point: false,
        }
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub circle: Circle,
}

impl Player {
    /// Spawn at a quarter of the width, vertically centred
    pub fn spawn(world: WorldBounds, radius: f32) -> Self {
        Self {
            circle: Circle::new(world.width / 4.0, world.height / 2.0 - radius, radius),
        }
    }
}

/// Playable area (the canvas size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// RNG state wrapper for serialization
///
/// Every field generation draws from a fresh PCG stream so a run seed
/// reproduces the whole sequence of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next generation; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Gameplay constants this state was built with
    pub settings: Settings,
    /// RNG state
    pub rng_state: RngState,
    /// Current world size
    pub world: WorldBounds,
    /// Current phase
    pub phase: GamePhase,
    /// Points this round
    pub score: u64,
    /// Best accepted score this session
    pub high_score: u64,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    pub player: Player,
    /// Enemies, identified by index
    pub enemies: Vec<Enemy>,
    /// Held movement keys
    pub intents: Intents,
    /// Player-to-enemy distances from the last collision check (overlay only)
    #[serde(skip)]
    pub probes: Vec<Probe>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a running game with a freshly generated field
    pub fn new(
        settings: Settings,
        seed: u64,
        width: f32,
        height: f32,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let world = WorldBounds::new(width, height);
        let mut rng_state = RngState::new(seed);
        let enemies = Self::generate(&settings, &mut rng_state, world)?;

        Ok(Self {
            player: Player::spawn(world, settings.player_radius),
            settings,
            rng_state,
            world,
            phase: GamePhase::Running,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            enemies,
            intents: Intents::default(),
            probes: Vec::new(),
            events: Vec::new(),
        })
    }

    fn generate(
        settings: &Settings,
        rng_state: &mut RngState,
        world: WorldBounds,
    ) -> Result<Vec<Enemy>, GameError> {
        let params = FieldParams::from_settings(settings, world);
        let mut rng = rng_state.next_rng();
        let enemies = generate_field(&mut rng, &params)?;
        Ok(enemies)
    }

    /// Regenerate the field and reset the round, keeping the high score.
    ///
    /// On failure the current state is left untouched.
    pub fn reinit(&mut self, world: WorldBounds) -> Result<(), GameError> {
        let mut rng_state = self.rng_state.clone();
        let enemies = Self::generate(&self.settings, &mut rng_state, world)?;

        self.rng_state = rng_state;
        self.world = world;
        self.enemies = enemies;
        self.player = Player::spawn(world, self.settings.player_radius);
        self.intents = Intents::default();
        self.score = 0;
        self.time_ticks = 0;
        self.probes.clear();
        self.phase = GamePhase::Running;
        Ok(())
    }

    /// Answer to the "play again?" question.
    ///
    /// Returns `Ok(true)` if a new round started. Declining (or answering
    /// while not game over) changes nothing.
    pub fn resolve_prompt(&mut self, accepted: bool) -> Result<bool, GameError> {
        if self.phase != GamePhase::GameOverPrompt || !accepted {
            return Ok(false);
        }
        let high_score = self.high_score.max(self.score);
        self.reinit(self.world)?;
        self.high_score = high_score;
        self.events.push(GameEvent::Restarted { high_score });
        log::info!("Restarted (high score {})", high_score);
        Ok(true)
    }

    /// New canvas size; always starts a fresh round
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        self.reinit(WorldBounds::new(width, height))?;
        self.events.push(GameEvent::Resized {
            width: width as u32,
            height: height as u32,
        });
        log::info!("Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOverPrompt
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings(enemy_count: usize) -> Settings {
        Settings {
            enemy_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(small_settings(5), 7, 800.0, 600.0).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.circle.pos, Vec2::new(200.0, 290.0));
        assert_eq!(state.player.circle.radius, 10.0);
        assert_eq!(state.rng_state.stream, 1);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(small_settings(10), 99, 1024.0, 768.0).unwrap();
        let b = GameState::new(small_settings(10), 99, 1024.0, 768.0).unwrap();
        assert_eq!(a.enemies, b.enemies);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            player_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings, 1, 800.0, 600.0),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_prompt_commits_higher_score() {
        let mut state = GameState::new(small_settings(3), 1, 800.0, 600.0).unwrap();
        state.phase = GamePhase::GameOverPrompt;
        state.score = 12;
        state.high_score = 5;

        assert!(state.resolve_prompt(true).unwrap());
        assert_eq!(state.high_score, 12);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Restarted { high_score: 12 }]
        );
    }

    #[test]
    fn test_resolve_prompt_keeps_higher_existing_score() {
        let mut state = GameState::new(small_settings(3), 1, 800.0, 600.0).unwrap();
        state.phase = GamePhase::GameOverPrompt;
        state.score = 4;
        state.high_score = 20;

        assert!(state.resolve_prompt(true).unwrap());
        assert_eq!(state.high_score, 20);
    }

    #[test]
    fn test_declined_prompt_changes_nothing() {
        let mut state = GameState::new(small_settings(3), 1, 800.0, 600.0).unwrap();
        state.phase = GamePhase::GameOverPrompt;
        state.score = 30;
        let enemies = state.enemies.clone();

        assert!(!state.resolve_prompt(false).unwrap());
        assert_eq!(state.phase, GamePhase::GameOverPrompt);
        assert_eq!(state.high_score, 0);
        assert_eq!(state.score, 30);
        assert_eq!(state.enemies, enemies);
    }

    #[test]
    fn test_prompt_ignored_while_running() {
        let mut state = GameState::new(small_settings(3), 1, 800.0, 600.0).unwrap();
        state.score = 30;
        assert!(!state.resolve_prompt(true).unwrap());
        assert_eq!(state.high_score, 0);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_resize_reinitializes_but_keeps_high_score() {
        let mut state = GameState::new(small_settings(4), 3, 800.0, 600.0).unwrap();
        state.score = 9;
        state.high_score = 15;
        state.intents.move_up = true;
        state.phase = GamePhase::GameOverPrompt;

        state.resize(1200.0, 900.0).unwrap();
        assert_eq!(state.world, WorldBounds::new(1200.0, 900.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 15);
        assert!(!state.intents.move_up);
        assert_eq!(state.player.circle.pos, Vec2::new(300.0, 440.0));
        for enemy in &state.enemies {
            assert!(enemy.circle.pos.x >= 600.0 + enemy.circle.radius);
        }
    }

    #[test]
    fn test_failed_resize_leaves_state_untouched() {
        let mut state = GameState::new(small_settings(4), 3, 800.0, 600.0).unwrap();
        let before = state.enemies.clone();
        // Too small for any 20px enemy to fit vertically
        let err = state.resize(800.0, 30.0).unwrap_err();
        assert!(matches!(err, GameError::FieldTooDense(_)));
        assert_eq!(state.enemies, before);
        assert_eq!(state.world, WorldBounds::new(800.0, 600.0));
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(small_settings(2), 5, 800.0, 600.0).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.enemies, state.enemies);
        assert_eq!(restored.rng_state.seed, 5);
    }
}
