//! Game settings and difficulty tuning
//!
//! Persisted as JSON next to the binary, separate from run snapshots.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty modes scale enemy pacing, not player stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Gentle,
    #[default]
    Normal,
    Cruel,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Gentle => "Gentle",
            Difficulty::Normal => "Normal",
            Difficulty::Cruel => "Cruel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" | "easy" => Some(Difficulty::Gentle),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "cruel" | "hard" => Some(Difficulty::Cruel),
            _ => None,
        }
    }

    /// Seconds between stationary-shooter shots
    pub fn shooter_cooldown(&self) -> f32 {
        match self {
            Difficulty::Gentle => 2.6,
            Difficulty::Normal => 2.0,
            Difficulty::Cruel => 1.3,
        }
    }

    /// Rest interval range rolled by hoppers between hop cycles
    pub fn hopper_rest_range(&self) -> (f32, f32) {
        match self {
            Difficulty::Gentle => (1.2, 2.2),
            Difficulty::Normal => (0.9, 1.7),
            Difficulty::Cruel => (0.5, 1.1),
        }
    }
}

/// Gameplay settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Difficulty mode fed into new worlds
    pub difficulty: Difficulty,
    /// Fixed seed override for reproducible runs (None = caller picks)
    pub seed_override: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed_override: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip_names() {
        for d in [Difficulty::Gentle, Difficulty::Normal, Difficulty::Cruel] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nope"), None);
    }

    #[test]
    fn test_cruel_is_faster_than_gentle() {
        assert!(Difficulty::Cruel.shooter_cooldown() < Difficulty::Gentle.shooter_cooldown());
        let (cruel_lo, cruel_hi) = Difficulty::Cruel.hopper_rest_range();
        let (gentle_lo, gentle_hi) = Difficulty::Gentle.hopper_rest_range();
        assert!(cruel_lo < gentle_lo && cruel_hi < gentle_hi);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = Settings {
            difficulty: Difficulty::Cruel,
            seed_override: Some(7),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.difficulty, Difficulty::Cruel);
        assert_eq!(back.seed_override, Some(7));
    }
}
