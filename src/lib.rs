//! Space Invaders - a deterministic arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick)
//! - `phase`: Game phase state machine (menu, playing, paused, game over, victory, options)
//! - `config`: Validated gameplay tunables
//! - `settings`: Player-facing options (audio toggles, CRT, difficulty)
//! - `audio` / `render`: Narrow interfaces to the presentation collaborators
//! - `effects`: Visual-only particles and starfield

pub mod audio;
pub mod config;
pub mod effects;
pub mod error;
pub mod highscores;
pub mod phase;
pub mod render;
pub mod settings;
pub mod sim;

pub use config::{GameConfig, MovementPolicy};
pub use error::{ConfigError, Error, StorageError};
pub use highscores::HighScores;
pub use phase::{Game, GamePhase, PhaseTransition};
pub use settings::{Difficulty, Options};

/// Game configuration constants
///
/// Speeds are pixels per second, written as pixels-per-frame times 60.
pub mod consts {
    /// Nominal frame rate of the external driver
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep used by the native driver
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_LIVES: u32 = 3;
    pub const PLAYER_SPEED: f32 = 15.0 * 60.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Distance from the bottom of the screen to the player's centre
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;
    pub const PLAYER_FIRE_COOLDOWN_MS: u64 = 600;

    /// Player laser (moves up)
    pub const PLAYER_BULLET_SPEED: f32 = 8.0 * 60.0;
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_DESCENT_SPEED: f32 = 2.8125 * 60.0;
    pub const ENEMY_FIRE_COOLDOWN_MIN_MS: u64 = 750;
    pub const ENEMY_FIRE_COOLDOWN_MAX_MS: u64 = 5000;

    /// Enemy laser (moves down)
    pub const ENEMY_BULLET_SPEED: f32 = 8.0 * 60.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 8.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 25.0;

    /// Timed enemy waves
    pub const ENEMY_SPAWN_DELAY_MS: u64 = 2000;
    pub const ENEMY_SPAWN_MIN: u32 = 1;
    pub const ENEMY_SPAWN_MAX: u32 = 2;
    /// Horizontal margin kept free when picking a spawn x
    pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;
    /// Spawn y range (centre), above the visible area
    pub const ENEMY_SPAWN_Y_MIN: f32 = -100.0;
    pub const ENEMY_SPAWN_Y_MAX: f32 = 0.0;

    /// Classic formation grid
    pub const FORMATION_ROWS: u32 = 6;
    pub const FORMATION_COLS: u32 = 8;
    pub const FORMATION_X_SPACING: f32 = 60.0;
    pub const FORMATION_Y_SPACING: f32 = 48.0;
    pub const FORMATION_X_OFFSET: f32 = 70.0;
    pub const FORMATION_Y_OFFSET: f32 = 100.0;
    pub const FORMATION_SPEED: f32 = 60.0;
    pub const FORMATION_STEP_DOWN: f32 = 2.0;

    /// Bonus target ("extra" saucer)
    pub const BONUS_WIDTH: f32 = 64.0;
    pub const BONUS_HEIGHT: f32 = 28.0;
    pub const BONUS_SPEED: f32 = 3.0 * 60.0;
    pub const BONUS_Y: f32 = 80.0;
    pub const BONUS_POINTS: u32 = 500;
    pub const BONUS_INTERVAL_MIN_MS: u64 = 400;
    pub const BONUS_INTERVAL_MAX_MS: u64 = 800;
    /// How far outside the screen the bonus enters
    pub const BONUS_ENTRY_OFFSET: f32 = 50.0;
    /// How far outside the screen the bonus may travel before it is removed
    pub const BONUS_EXIT_MARGIN: f32 = 100.0;

    /// Obstacles
    pub const OBSTACLE_AMOUNT: u32 = 4;
    pub const OBSTACLE_BLOCK_SIZE: f32 = 6.0;
    pub const OBSTACLE_Y: f32 = SCREEN_HEIGHT - 200.0;

    /// Enemy tier score values
    pub const RED_POINTS: u32 = 100;
    pub const GREEN_POINTS: u32 = 200;
    pub const YELLOW_POINTS: u32 = 300;
}
