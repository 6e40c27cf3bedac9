//! Game settings and preferences
//!
//! Presentation only; gameplay tuning lives in `consts`. Persisted as JSON
//! next to the best score.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SETTINGS_KEY;
use crate::persistence::KeyValueStore;

/// How simulation ticks are paced against display frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FramePacing {
    /// One tick per display frame (constants assume ~60 Hz)
    #[default]
    PerFrame,
    /// Fixed 60 Hz ticks from an accumulator, independent of refresh rate
    Fixed60,
}

impl FramePacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            FramePacing::PerFrame => "PerFrame",
            FramePacing::Fixed60 => "Fixed60",
        }
    }
}

/// Unrecognized pacing name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown frame pacing `{0}` (expected `perframe` or `fixed60`)")]
pub struct ParsePacingError(String);

impl FromStr for FramePacing {
    type Err = ParsePacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "perframe" | "frame" => Ok(FramePacing::PerFrame),
            "fixed60" | "fixed" => Ok(FramePacing::Fixed60),
            _ => Err(ParsePacingError(s.to_string())),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no idle bob, no wing flutter)
    pub reduced_motion: bool,
    /// Tick pacing
    pub pacing: FramePacing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            reduced_motion: false,
            pacing: FramePacing::PerFrame,
        }
    }
}

impl Settings {
    /// Whether decorative animation should run
    pub fn animate(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.read(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings (best-effort)
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.write(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            },
            Err(e) => log::warn!("Settings not serialized: {}", e),
        }
    }
}
