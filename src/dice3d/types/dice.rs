//! Dice-related types
//!
//! This module contains the types shared by the roll engine, the selector and
//! the renderer: DiceType, RollPhase, DieInstanceId and SoundCue.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Die types the widget can mount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceType {
    #[serde(rename = "d6")]
    D6,
    #[serde(rename = "d20")]
    D20,
}

impl DiceType {
    pub const ALL: [DiceType; 2] = [DiceType::D6, DiceType::D20];

    pub fn max_value(&self) -> u32 {
        match self {
            DiceType::D6 => 6,
            DiceType::D20 => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiceType::D6 => "D6",
            DiceType::D20 => "D20",
        }
    }

    pub fn parse(s: &str) -> Option<DiceType> {
        match s.trim().to_lowercase().as_str() {
            "d6" => Some(DiceType::D6),
            "d20" => Some(DiceType::D20),
            _ => None,
        }
    }

    /// Whether the die eases onto its result face after the tumble.
    ///
    /// The six-sided die goes through `Settling`; the twenty-sided die snaps
    /// straight from `Rolling` to `Resolved`.
    pub fn settles(&self) -> bool {
        matches!(self, DiceType::D6)
    }

    /// Cue played when a roll starts, if this die has one.
    pub fn roll_cue(&self) -> Option<SoundCue> {
        match self {
            DiceType::D6 => Some(SoundCue::RollStart),
            DiceType::D20 => None,
        }
    }

    /// Cue played once the die has settled on its face, if this die has one.
    pub fn settle_cue(&self) -> Option<SoundCue> {
        match self {
            DiceType::D6 => Some(SoundCue::Settle),
            DiceType::D20 => None,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DiceType::D6 => Color::srgb(0.92, 0.92, 0.9), // Ivory
            DiceType::D20 => Color::srgb(0.3, 0.4, 0.9), // Blue crystal
        }
    }

    /// Color of the die once it shows `outcome`.
    pub fn result_color(&self, outcome: u32) -> Color {
        match (self, outcome) {
            (DiceType::D20, 20) => Color::srgb(0.95, 0.78, 0.2), // Gold
            (DiceType::D20, 1) => Color::srgb(0.85, 0.15, 0.15), // Blood red
            _ => self.color(),
        }
    }
}

impl std::fmt::Display for DiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stage of a single roll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling,
    Settling,
    Resolved,
}

impl RollPhase {
    /// A roll is in flight while the die is tumbling or easing onto its face.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RollPhase::Rolling | RollPhase::Settling)
    }
}

/// Identity of one mounted die.
///
/// Every mount gets a fresh id, so a timer scheduled by a die that has since
/// been unmounted can be told apart from the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DieInstanceId(pub u64);

/// Named audio cues the core can request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    RollStart,
    Settle,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::RollStart => "roll-start",
            SoundCue::Settle => "settle",
        }
    }
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
