use bevy::prelude::*;

use super::{DiceType, DieInstanceId, SoundCue};

/// Fired exactly once per resolved roll, carrying the raw outcome.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollCompleted {
    pub instance: DieInstanceId,
    pub die_type: DiceType,
    pub outcome: u32,
}

/// Fired when the die comes to rest on its result face.
///
/// The widget's own systems read the engine state directly; this is for apps
/// embedding the plugin that need to react once the result is visible.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollSettled {
    pub instance: DieInstanceId,
    pub die_type: DiceType,
    pub outcome: u32,
}

/// Request to play an audio cue. Playback is best-effort.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollCueRequested {
    pub cue: SoundCue,
}
