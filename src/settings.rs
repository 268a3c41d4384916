//! Player options and preferences
//!
//! A small record owned by the game driver and passed by reference to the
//! phases and the audio manager. Persisted as JSON next to the high scores.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Next tier in the options menu cycle
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Multiplier applied to enemy spawn delay and fire cooldowns
    pub fn pace_scale(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.75,
        }
    }
}

/// Game options, mutated only through the toggle methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Scanline overlay drawn by the presentation layer
    pub crt_effect: bool,
    pub music_enabled: bool,
    pub sound_effects_enabled: bool,
    pub fullscreen: bool,
    pub difficulty: Difficulty,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            crt_effect: false,
            music_enabled: true,
            sound_effects_enabled: true,
            fullscreen: false,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Options {
    pub fn toggle_crt(&mut self) {
        self.crt_effect = !self.crt_effect;
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
    }

    pub fn toggle_sound_effects(&mut self) {
        self.sound_effects_enabled = !self.sound_effects_enabled;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
    }

    /// Default file name in the working directory
    pub const FILE_NAME: &'static str = "space_invaders_options.json";

    /// Load options from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            log::info!("No options file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = serde_json::from_str(&json).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Options saved");
        Ok(())
    }
}

/// Label for a toggle in the menus
pub fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_flip_once() {
        let mut options = Options::default();
        options.toggle_crt();
        options.toggle_music();
        options.toggle_sound_effects();
        options.toggle_fullscreen();
        assert!(options.crt_effect);
        assert!(!options.music_enabled);
        assert!(!options.sound_effects_enabled);
        assert!(options.fullscreen);

        options.toggle_music();
        assert!(options.music_enabled);
    }

    #[test]
    fn test_difficulty_cycle_wraps() {
        let mut options = Options::default();
        options.cycle_difficulty();
        assert_eq!(options.difficulty, Difficulty::Hard);
        options.cycle_difficulty();
        assert_eq!(options.difficulty, Difficulty::Easy);
        options.cycle_difficulty();
        assert_eq!(options.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_difficulty_labels_and_pace() {
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
        assert!(Difficulty::Easy.pace_scale() > Difficulty::Normal.pace_scale());
        assert!(Difficulty::Hard.pace_scale() < Difficulty::Normal.pace_scale());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "space_invaders_options_test_{}.json",
            std::process::id()
        ));
        let mut options = Options::default();
        options.toggle_crt();
        options.cycle_difficulty();
        options.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, options);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("space_invaders_options_does_not_exist.json");
        assert_eq!(Options::load(&path).unwrap(), Options::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "space_invaders_options_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Options::load(&path), Err(StorageError::Json { .. })));
        let _ = fs::remove_file(&path);
    }
}
