//! Widget configuration types and loading
//!
//! Tuning lives in a RON file (see `assets/widget.ron`). Every field carries a
//! serde default so a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{DiceType, SoundCue};

/// Errors raised while loading a widget configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Angular tumble rates in radians per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TumbleRates {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for TumbleRates {
    fn default() -> Self {
        Self {
            x: 5.0,
            y: 7.0,
            z: 3.0,
        }
    }
}

impl TumbleRates {
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Playback settings for one audio cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSettings {
    /// Asset path, relative to the assets folder
    pub path: String,
    #[serde(default = "default_cue_volume")]
    pub volume: f32,
    /// Where in the clip playback starts
    #[serde(default)]
    pub offset_secs: f32,
}

fn default_cue_volume() -> f32 {
    0.7
}

/// Smallest settle tolerance that the f32 easing can actually reach
pub const MIN_SETTLE_TOLERANCE: f32 = 1e-4;

/// Longest accepted cue start offset
pub const MAX_CUE_OFFSET_SECS: f32 = 3600.0;

impl CueSettings {
    /// Playback start position; `None` if the offset is not a usable duration.
    pub fn start_position(&self) -> Option<Duration> {
        Duration::try_from_secs_f32(self.offset_secs).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "default_roll_start_cue")]
    pub roll_start: CueSettings,
    #[serde(default = "default_settle_cue")]
    pub settle: CueSettings,
}

fn default_roll_start_cue() -> CueSettings {
    CueSettings {
        path: "sounds/dice_roll.mp3".to_string(),
        volume: 0.6,
        offset_secs: 0.0,
    }
}

fn default_settle_cue() -> CueSettings {
    CueSettings {
        path: "sounds/dice_settle.mp3".to_string(),
        volume: 0.8,
        offset_secs: 0.0,
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            roll_start: default_roll_start_cue(),
            settle: default_settle_cue(),
        }
    }
}

impl CueConfig {
    pub fn settings(&self, cue: SoundCue) -> &CueSettings {
        match cue {
            SoundCue::RollStart => &self.roll_start,
            SoundCue::Settle => &self.settle,
        }
    }
}

/// Top-level widget configuration
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_die")]
    pub default_die: DiceType,

    /// Delay between the click and the outcome being drawn
    #[serde(default = "default_roll_duration_ms")]
    pub roll_duration_ms: u64,

    #[serde(default)]
    pub tumble_rates: TumbleRates,

    /// Exponential easing constant used while settling
    #[serde(default = "default_settle_rate")]
    pub settle_rate: f32,

    /// Per-axis distance (radians) below which settling snaps to the target
    #[serde(default = "default_settle_tolerance")]
    pub settle_tolerance: f32,

    /// Fixed RNG seed; `None` seeds from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub cues: CueConfig,
}

fn default_die() -> DiceType {
    DiceType::D20
}
fn default_roll_duration_ms() -> u64 {
    1500
}
fn default_settle_rate() -> f32 {
    25.0
}
fn default_settle_tolerance() -> f32 {
    0.1
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_die: default_die(),
            roll_duration_ms: default_roll_duration_ms(),
            tumble_rates: TumbleRates::default(),
            settle_rate: default_settle_rate(),
            settle_tolerance: default_settle_tolerance(),
            seed: None,
            cues: CueConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Parse a configuration from RON text and validate it.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// The configuration shipped in `assets/widget.ron`.
    pub fn bundled() -> Self {
        let text = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/widget.ron"));
        match Self::from_ron(text) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse bundled widget config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roll_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "roll_duration_ms must be positive".to_string(),
            ));
        }
        if self.settle_rate.is_nan() || self.settle_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "settle_rate must be positive, got {}",
                self.settle_rate
            )));
        }
        if !self.settle_tolerance.is_finite() || self.settle_tolerance < MIN_SETTLE_TOLERANCE {
            return Err(ConfigError::Invalid(format!(
                "settle_tolerance must be at least {}, got {}",
                MIN_SETTLE_TOLERANCE, self.settle_tolerance
            )));
        }
        let rates = self.tumble_rates.as_vec3();
        if !rates.is_finite() || rates.min_element() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tumble_rates must be positive, got {:?}",
                rates
            )));
        }
        for cue in [SoundCue::RollStart, SoundCue::Settle] {
            let settings = self.cues.settings(cue);
            if !(0.0..=1.0).contains(&settings.volume) {
                return Err(ConfigError::Invalid(format!(
                    "volume for cue '{}' must be within 0..=1, got {}",
                    cue, settings.volume
                )));
            }
            if !(0.0..=MAX_CUE_OFFSET_SECS).contains(&settings.offset_secs) {
                return Err(ConfigError::Invalid(format!(
                    "offset_secs for cue '{}' must be within 0..={}, got {}",
                    cue, MAX_CUE_OFFSET_SECS, settings.offset_secs
                )));
            }
        }
        Ok(())
    }

    pub fn roll_duration(&self) -> Duration {
        Duration::from_millis(self.roll_duration_ms)
    }
}
