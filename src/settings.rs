//! Game settings and preferences
//!
//! The host persists these as JSON; the simulation only sees the derived
//! `GameplayModifiers`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Theme;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Item spawn density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRate {
    Low,
    #[default]
    Normal,
    High,
    Extreme,
}

impl SpawnRate {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnRate::Low => "low",
            SpawnRate::Normal => "normal",
            SpawnRate::High => "high",
            SpawnRate::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(SpawnRate::Low),
            "normal" => Some(SpawnRate::Normal),
            "high" => Some(SpawnRate::High),
            "extreme" => Some(SpawnRate::Extreme),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpawnRate::Low => "Sparse",
            SpawnRate::Normal => "Standard",
            SpawnRate::High => "Dense",
            SpawnRate::Extreme => "Frantic",
        }
    }

    /// Multiplier on the spawn interval (<1 spawns more often)
    pub fn interval_scale(&self) -> f32 {
        match self {
            SpawnRate::Low => 1.25,
            SpawnRate::Normal => 1.0,
            SpawnRate::High => 0.7,
            SpawnRate::Extreme => 0.5,
        }
    }
}

/// Item fall speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Extreme,
}

impl FallSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallSpeed::Slow => "slow",
            FallSpeed::Normal => "normal",
            FallSpeed::Fast => "fast",
            FallSpeed::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(FallSpeed::Slow),
            "normal" => Some(FallSpeed::Normal),
            "fast" => Some(FallSpeed::Fast),
            "extreme" => Some(FallSpeed::Extreme),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FallSpeed::Slow => "Slow",
            FallSpeed::Normal => "Standard",
            FallSpeed::Fast => "Fast",
            FallSpeed::Extreme => "Blazing",
        }
    }

    pub fn speed_scale(&self) -> f32 {
        match self {
            FallSpeed::Slow => 0.85,
            FallSpeed::Normal => 1.0,
            FallSpeed::Fast => 1.2,
            FallSpeed::Extreme => 1.4,
        }
    }
}

/// Scales applied by the spawner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameplayModifiers {
    pub spawn_interval_scale: f32,
    pub fall_speed_scale: f32,
}

impl Default for GameplayModifiers {
    fn default() -> Self {
        Self {
            spawn_interval_scale: 1.0,
            fall_speed_scale: 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub spawn_rate: SpawnRate,
    pub fall_speed: FallSpeed,
    pub theme: Theme,
}

/// Loosely-typed mirror used to salvage partially valid stored settings
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSettings {
    spawn_rate: Option<String>,
    fall_speed: Option<String>,
    theme: Option<String>,
}

impl Settings {
    pub fn modifiers(&self) -> GameplayModifiers {
        GameplayModifiers {
            spawn_interval_scale: self.spawn_rate.interval_scale(),
            fall_speed_scale: self.fall_speed.speed_scale(),
        }
    }

    /// Parse stored settings; unknown values fall back to their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = serde_json::from_str(json)?;
        let defaults = Self::default();

        let spawn_rate = match raw.spawn_rate.as_deref() {
            None => defaults.spawn_rate,
            Some(s) => SpawnRate::from_str(s).unwrap_or_else(|| {
                log::warn!("Unknown spawn rate {:?}, using {}", s, defaults.spawn_rate.as_str());
                defaults.spawn_rate
            }),
        };
        let fall_speed = match raw.fall_speed.as_deref() {
            None => defaults.fall_speed,
            Some(s) => FallSpeed::from_str(s).unwrap_or_else(|| {
                log::warn!("Unknown fall speed {:?}, using {}", s, defaults.fall_speed.as_str());
                defaults.fall_speed
            }),
        };
        let theme = match raw.theme.as_deref() {
            None => defaults.theme,
            Some(s) => Theme::from_str(s).unwrap_or_else(|| {
                log::warn!("Unknown theme {:?}, using {}", s, defaults.theme.as_str());
                defaults.theme
            }),
        };

        Ok(Self {
            spawn_rate,
            fall_speed,
            theme,
        })
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modifiers_are_neutral() {
        assert_eq!(Settings::default().modifiers(), GameplayModifiers::default());
    }

    #[test]
    fn test_extreme_presets() {
        let settings = Settings {
            spawn_rate: SpawnRate::Extreme,
            fall_speed: FallSpeed::Extreme,
            theme: Theme::Default,
        };
        let mods = settings.modifiers();
        assert_eq!(mods.spawn_interval_scale, 0.5);
        assert_eq!(mods.fall_speed_scale, 1.4);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            spawn_rate: SpawnRate::High,
            fall_speed: FallSpeed::Slow,
            theme: Theme::SpringFestivalHorse,
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let settings =
            Settings::from_json(r#"{ "spawnRate": "ludicrous", "fallSpeed": "fast" }"#).expect("parses");
        assert_eq!(settings.spawn_rate, SpawnRate::Normal);
        assert_eq!(settings.fall_speed, FallSpeed::Fast);
        assert_eq!(settings.theme, Theme::Default);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("not json").is_err());
    }
}
