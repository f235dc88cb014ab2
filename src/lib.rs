//! Ping Pong - best-of-N Pong against a computer opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, match state machine)
//! - `config`: Immutable game configuration passed into the simulation
//! - `audio`: Procedurally generated sound effects driven by simulation events
//! - `renderer`: Character-cell rendering of simulation snapshots
//! - `platform`: Terminal input mapping
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between the screen edge and the player paddle
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// AI paddle max speed (pixels/tick)
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Player paddle step per move command (pixels)
    pub const PLAYER_STEP: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 7.0;
    /// Serve speeds, sign picked at random on every reset
    pub const SERVE_SPEED_X: f32 = 5.0;
    pub const SERVE_SPEED_Y: f32 = 3.0;
    /// Horizontal speed cap (pixels/tick)
    pub const BALL_MAX_SPEED_X: f32 = 12.0;
    /// Vertical velocity is clamped to [-BALL_MAX_SPEED_Y, BALL_MAX_SPEED_Y]
    pub const BALL_MAX_SPEED_Y: f32 = 8.0;
    /// Added to |vx| on every paddle hit
    pub const PADDLE_SPEEDUP: f32 = 0.3;
    /// vy gained per unit of off-centre hit
    pub const SPIN_FACTOR: f32 = 2.0;

    /// AI tuning
    pub const AI_DIFFICULTY: f32 = 0.8;
    pub const AI_DEAD_ZONE: f32 = 20.0;
    pub const AI_ERROR_SCALE: f32 = 50.0;
    /// Fraction of paddle speed used when drifting back to centre
    pub const AI_IDLE_SPEED: f32 = 0.3;

    /// Points needed to win one game
    pub const WINNING_SCORE: u32 = 5;
    /// Series lengths offered by the menu
    pub const SERIES_LENGTHS: [u32; 3] = [3, 5, 7];
}

/// Games a side must win to take a best-of-`best_of` series
#[inline]
pub fn series_target(best_of: u32) -> u32 {
    best_of / 2 + 1
}
