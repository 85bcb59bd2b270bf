//! Game tunables
//!
//! Loaded from JSON by the engine shell; every field falls back to the
//! defaults in [`crate::consts`].

use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading settings
#[derive(Debug)]
pub enum SettingsError {
    /// The settings document is not valid JSON for [`Settings`]
    Parse(serde_json::Error),
    /// The settings file could not be read
    Io(std::io::Error),
    /// A value is out of its allowed range
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Invalid(what) => write!(f, "invalid setting: {}", what),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Io(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

/// Rules tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for spawn rolls. `None` lets the shell pick one.
    pub seed: Option<u64>,

    // === Player ===
    /// Horizontal run speed (pixels/s)
    pub run_speed: f32,
    /// Jump impulse (pixels/s, applied upward)
    pub jump_impulse: f32,

    // === Scoring ===
    /// Points awarded per star
    pub points_per_star: u64,

    // === Hazards ===
    /// Vertical speed range is [-max, max]
    pub hazard_max_vertical_speed: i32,

    // === HUD ===
    /// Hide the instruction text on the same frame as the first move
    /// instead of the frame after.
    pub hide_instructions_immediately: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            run_speed: PLAYER_RUN_SPEED,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            points_per_star: POINTS_PER_STAR,
            hazard_max_vertical_speed: HAZARD_MAX_VERTICAL_SPEED,
            hide_instructions_immediately: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.run_speed > 0.0) {
            return Err(SettingsError::Invalid("run_speed must be positive"));
        }
        if !(self.jump_impulse > 0.0) {
            return Err(SettingsError::Invalid("jump_impulse must be positive"));
        }
        if self.points_per_star == 0 || self.points_per_star > MAX_POINTS_PER_STAR {
            return Err(SettingsError::Invalid("points_per_star must be in 1..=1000000"));
        }
        if !(0..=HAZARD_VERTICAL_SPEED_LIMIT).contains(&self.hazard_max_vertical_speed) {
            return Err(SettingsError::Invalid("hazard_max_vertical_speed must be in 0..=10000"));
        }
        Ok(())
    }

    /// Seed to use for a new game
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.run_speed, 160.0);
        assert_eq!(settings.jump_impulse, 330.0);
        assert_eq!(settings.points_per_star, 10);
        assert!(!settings.hide_instructions_immediately);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "run_speed": 200.0 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.run_speed, 200.0);
        assert_eq!(settings.jump_impulse, PLAYER_JUMP_IMPULSE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "points_per_star": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "run_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for json in [
            r#"{ "points_per_star": 1000001 }"#,
            r#"{ "hazard_max_vertical_speed": -5 }"#,
            r#"{ "hazard_max_vertical_speed": -2147483648 }"#,
            r#"{ "hazard_max_vertical_speed": 10001 }"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)), "{}", json);
        }
        assert!(Settings::from_json(r#"{ "hazard_max_vertical_speed": 0 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse settings"));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
