//! Die selector
//!
//! Tracks which die type is active and owns the mounted roll engine. Switching
//! type discards the old engine (and its roll) and mounts a fresh idle one
//! under a new instance id.

use bevy::prelude::*;

use crate::dice3d::engine::{RollEngine, RollTuning};
use crate::dice3d::types::{DiceType, DieInstanceId};

#[derive(Clone, Debug)]
pub struct DieSelector {
    engine: RollEngine,
    tuning: RollTuning,
    next_instance: u64,
}

impl DieSelector {
    pub fn new(die_type: DiceType, tuning: RollTuning) -> Self {
        Self {
            engine: RollEngine::new(die_type, DieInstanceId(1), tuning),
            tuning,
            next_instance: 2,
        }
    }

    pub fn active(&self) -> DiceType {
        self.engine.die_type()
    }

    pub fn engine(&self) -> &RollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RollEngine {
        &mut self.engine
    }

    /// Mount a fresh engine for `die_type`. Selecting the active type is a
    /// no-op and returns `false`.
    pub fn select(&mut self, die_type: DiceType) -> bool {
        if die_type == self.active() {
            return false;
        }

        let previous = self.engine.instance();
        let instance = DieInstanceId(self.next_instance);
        self.next_instance += 1;
        self.engine = RollEngine::new(die_type, instance, self.tuning);
        info!(
            "Mounted {} die (instance {} replaces {})",
            die_type, instance.0, previous.0
        );
        true
    }
}
