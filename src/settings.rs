//! Game settings and preferences
//!
//! Persisted as JSON next to the game, separate from any match state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::{AudioBackend, AudioManager};
use crate::config::GameConfig;
use crate::consts::{AI_DIFFICULTY, SERIES_LENGTHS};

/// Failure writing settings to disk
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on at startup (M toggles in game)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Gameplay ===
    /// Computer opponent accuracy (0.0 - 1.0)
    pub ai_difficulty: f32,
    /// Series length used by the headless demo
    pub default_best_of: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            ai_difficulty: AI_DIFFICULTY,
            default_best_of: 3,
        }
    }
}

impl Settings {
    /// Clamp every field into its legal range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.ai_difficulty = if self.ai_difficulty.is_finite() {
            self.ai_difficulty.clamp(0.0, 1.0)
        } else {
            AI_DIFFICULTY
        };
        if !SERIES_LENGTHS.contains(&self.default_best_of) {
            self.default_best_of = 3;
        }
        self
    }

    /// Game configuration with these preferences applied
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            ai_difficulty: self.ai_difficulty,
            ..GameConfig::default()
        }
    }

    /// Push audio preferences into the audio manager
    pub fn apply_audio<B: AudioBackend>(&self, audio: &mut AudioManager<B>) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_enabled(self.sound_enabled);
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
