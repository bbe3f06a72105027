//! Game settings
//!
//! Persisted as pretty JSON. Missing fields take their defaults, so older
//! files keep loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::level::DifficultyParameters;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window size in pixels
    pub screen_width: u32,
    pub screen_height: u32,
    pub frames_per_second: u32,

    // === Session ===
    pub start_lives: u32,
    /// Difficulty of the first round
    pub difficulty: DifficultyParameters,

    // === Files ===
    pub level_dir: PathBuf,
    pub level_extension: String,
    pub highscore_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 800,
            frames_per_second: FRAMES_PER_SECOND,

            start_lives: START_LIVES,
            difficulty: DifficultyParameters::default(),

            level_dir: PathBuf::from(LEVEL_DIR),
            level_extension: LEVEL_EXTENSION.to_string(),
            highscore_path: PathBuf::from(HIGHSCORE_FILE),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Frame budget in milliseconds
    pub fn frame_ms(&self) -> f64 {
        1000.0 / f64::from(self.frames_per_second.max(1))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Replace values a game cannot start with by their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.frames_per_second == 0 {
            log::warn!("frames_per_second must be positive, using {}", defaults.frames_per_second);
            self.frames_per_second = defaults.frames_per_second;
        }
        if self.start_lives == 0 {
            log::warn!("start_lives must be positive, using {}", defaults.start_lives);
            self.start_lives = defaults.start_lives;
        }

        let (d, fallback) = (&mut self.difficulty, defaults.difficulty);
        replace_unless(
            "platform_velocity",
            &mut d.platform_velocity,
            fallback.platform_velocity,
            positive,
        );
        replace_unless("platform_width", &mut d.platform_width, fallback.platform_width, positive);
        replace_unless("ball_velocity", &mut d.ball_velocity, fallback.ball_velocity, positive);
        replace_unless("ball_gravity", &mut d.ball_gravity, fallback.ball_gravity, |v| v >= 0.0);
        self
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value > 0.0
}

/// Reset a difficulty value that is not finite or fails `valid`
fn replace_unless(name: &str, value: &mut f64, default: f64, valid: impl Fn(f64) -> bool) {
    if !(value.is_finite() && valid(*value)) {
        log::warn!("difficulty.{name} out of range ({value}), using {default}");
        *value = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.start_lives, 3);
        assert_eq!(settings.difficulty.platform_velocity, 20.0);
        assert_eq!(settings.level_extension, "lvl");
        assert!((settings.frame_ms() - 1000.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.start_lives = 5;
        settings.difficulty.ball_gravity = 1.5;
        settings.muted = true;
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let json = r#"{ "start_lives": 7, "difficulty": { "ball_velocity": 21.0 } }"#;
        fs::write(&path, json).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.start_lives, 7);
        assert_eq!(settings.difficulty.ball_velocity, 21.0);
        assert_eq!(settings.difficulty.platform_width, 4.0);
        assert_eq!(settings.screen_width, 600);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let json = r#"{
            "start_lives": 0,
            "frames_per_second": 0,
            "difficulty": { "platform_width": 0.0, "ball_velocity": -3.0, "ball_gravity": 2.0 }
        }"#;
        fs::write(&path, json).unwrap();

        let settings = Settings::load(&path);
        let defaults = Settings::default();
        assert_eq!(settings.start_lives, defaults.start_lives);
        assert_eq!(settings.frames_per_second, defaults.frames_per_second);
        assert_eq!(settings.difficulty.platform_width, defaults.difficulty.platform_width);
        assert_eq!(settings.difficulty.ball_velocity, defaults.difficulty.ball_velocity);
        // Values in range are kept
        assert_eq!(settings.difficulty.ball_gravity, 2.0);
        assert!(settings.difficulty.is_playable());
    }

    #[test]
    fn test_validated_keeps_good_settings() {
        let mut settings = Settings::default();
        settings.start_lives = 1;
        settings.difficulty.ball_gravity = 0.0;
        assert_eq!(settings.clone().validated(), settings);
    }

    #[test]
    fn test_missing_or_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load(&path), Settings::default());
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
