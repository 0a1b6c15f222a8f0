//! Multiplier overlay
//!
//! Derived display state next to the die: the last outcome, optionally scaled
//! by integer multipliers. It only changes through a roll-completion
//! notification or the multiplier controls, never by reading the engine.

use bevy::prelude::*;

use crate::dice3d::types::DiceType;

/// Factors offered by the multiplier panel
pub const MULTIPLIER_FACTORS: [u32; 5] = [2, 3, 4, 5, 6];

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiplierOverlay {
    display_value: Option<u64>,
    multiplier: u64,
}

impl Default for MultiplierOverlay {
    fn default() -> Self {
        Self {
            display_value: None,
            multiplier: 1,
        }
    }
}

impl MultiplierOverlay {
    pub fn display_value(&self) -> Option<u64> {
        self.display_value
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// A fresh roll replaces whatever was shown and drops any scaling.
    pub fn on_roll_complete(&mut self, outcome: u32) {
        self.display_value = Some(outcome as u64);
        self.multiplier = 1;
    }

    pub fn can_multiply(&self) -> bool {
        self.display_value.is_some()
    }

    pub fn can_reset(&self) -> bool {
        self.multiplier > 1
    }

    /// Scale the shown value by `factor`. No-op without a value, for a
    /// factor below 1, or if the result would not fit.
    pub fn multiply(&mut self, factor: u32) -> bool {
        let Some(value) = self.display_value else {
            return false;
        };
        if factor < 1 {
            return false;
        }

        let factor = factor as u64;
        match (value.checked_mul(factor), self.multiplier.checked_mul(factor)) {
            (Some(value), Some(multiplier)) => {
                self.display_value = Some(value);
                self.multiplier = multiplier;
                true
            }
            _ => {
                debug!("Ignoring x{} multiplier: display value would overflow", factor);
                false
            }
        }
    }

    /// Undo every multiplier applied since the last roll.
    pub fn reset_multiplier(&mut self) -> bool {
        if !self.can_reset() {
            return false;
        }
        self.display_value = self.display_value.map(|value| value / self.multiplier);
        self.multiplier = 1;
        true
    }

    /// Panel text, e.g. `36 (x6)`.
    pub fn summary(&self) -> Option<String> {
        let value = self.display_value?;
        if self.multiplier > 1 {
            Some(format!("{} (x{})", value, self.multiplier))
        } else {
            Some(value.to_string())
        }
    }
}

/// Caption shown over a resolved die.
pub fn result_caption(die_type: DiceType, outcome: u32) -> String {
    match (die_type, outcome) {
        (DiceType::D20, 20) => "CRITICAL HIT!".to_string(),
        (DiceType::D20, 1) => "CRITICAL FAIL!".to_string(),
        _ => format!("Rolled: {}", outcome),
    }
}
