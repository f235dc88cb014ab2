//! Immutable game configuration
//!
//! Built once and handed to the simulation constructors. Nothing in the
//! simulation reads global mutable state.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen must have a positive size, got {width}x{height}")]
    EmptyScreen { width: f32, height: f32 },
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("paddle {width}x{height} does not fit a {screen_height}px tall screen")]
    PaddleTooLarge {
        width: f32,
        height: f32,
        screen_height: f32,
    },
    #[error("ball size {size} does not fit the screen")]
    BallTooLarge { size: f32 },
    #[error("paddles overlap on a {screen_width}px wide screen")]
    PaddlesOverlap { screen_width: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("AI difficulty must be within [0, 1], got {0}")]
    Difficulty(f32),
    #[error("winning score must be at least 1")]
    ZeroWinningScore,
}

/// Game configuration (screen, actors, rules)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// AI paddle max speed (pixels/tick)
    pub paddle_speed: f32,
    /// Distance of the left paddle from the left edge (mirrored on the right)
    pub paddle_margin: f32,
    /// Player paddle step per move command
    pub player_step: f32,

    pub ball_size: f32,

    /// Points needed to win one game
    pub winning_score: u32,
    /// AI tracking accuracy, 0.0 to 1.0
    pub ai_difficulty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,
            player_step: PLAYER_STEP,
            ball_size: BALL_SIZE,
            winning_score: WINNING_SCORE,
            ai_difficulty: AI_DIFFICULTY,
        }
    }
}

impl GameConfig {
    /// Default configuration with a custom screen size
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Check every construction-time precondition
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::EmptyScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        for (name, value) in [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("player_step", self.player_step),
            ("ball_size", self.ball_size),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.paddle_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "paddle_margin",
                value: self.paddle_margin,
            });
        }
        if self.paddle_height > self.screen_height {
            return Err(ConfigError::PaddleTooLarge {
                width: self.paddle_width,
                height: self.paddle_height,
                screen_height: self.screen_height,
            });
        }
        if self.ball_size >= self.screen_height || self.ball_size >= self.screen_width {
            return Err(ConfigError::BallTooLarge {
                size: self.ball_size,
            });
        }
        if self.right_paddle_x() <= self.left_paddle_x() + self.paddle_width {
            return Err(ConfigError::PaddlesOverlap {
                screen_width: self.screen_width,
            });
        }
        if !(0.0..=1.0).contains(&self.ai_difficulty) {
            return Err(ConfigError::Difficulty(self.ai_difficulty));
        }
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        Ok(())
    }

    /// X of the player (left) paddle
    #[inline]
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// X of the AI (right) paddle
    #[inline]
    pub fn right_paddle_x(&self) -> f32 {
        self.screen_width - self.paddle_margin - self.paddle_width
    }

    /// Y both paddles start at (vertically centred, whole pixels)
    #[inline]
    pub fn paddle_start_y(&self) -> f32 {
        (self.screen_height / 2.0).floor() - self.paddle_height / 2.0
    }

    /// Ball spawn position (screen centre, whole pixels)
    #[inline]
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.screen_width / 2.0).floor(),
            (self.screen_height / 2.0).floor(),
        )
    }

    /// Duration of one tick in seconds
    #[inline]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.left_paddle_x(), 10.0);
        assert_eq!(config.right_paddle_x(), 780.0);
        assert_eq!(config.paddle_start_y(), 250.0);
        assert_eq!(config.ball_spawn(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_zero_screen_rejected() {
        let config = GameConfig::with_screen(0.0, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyScreen { .. })
        ));
    }

    #[test]
    fn test_tall_paddle_rejected() {
        let config = GameConfig::with_screen(800.0, 80.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooLarge { .. })
        ));
    }

    #[test]
    fn test_narrow_screen_rejected() {
        let config = GameConfig::with_screen(35.0, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddlesOverlap { .. })
        ));
    }

    #[test]
    fn test_bad_difficulty_rejected() {
        let config = GameConfig {
            ai_difficulty: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Difficulty(1.5)));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }
}
