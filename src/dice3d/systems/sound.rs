//! Roll audio cues
//!
//! Plays the "roll-start" and "settle" clips when the engine asks for them.
//! Audio is best effort: a clip that is missing or failed to load is logged
//! and skipped, and never holds up the roll.

use bevy::asset::LoadState;
use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings, Volume};
use bevy::prelude::*;
use thiserror::Error;

use crate::dice3d::types::*;

#[derive(Resource, Clone)]
pub struct RollCueSounds {
    pub roll_start: Handle<AudioSource>,
    pub settle: Handle<AudioSource>,
}

impl RollCueSounds {
    pub fn handle(&self, cue: SoundCue) -> &Handle<AudioSource> {
        match cue {
            SoundCue::RollStart => &self.roll_start,
            SoundCue::Settle => &self.settle,
        }
    }
}

/// Marks the audio entity currently playing a cue
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CuePlayback(pub SoundCue);

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("audio cues are not loaded")]
    NotRegistered,
    #[error("cue '{cue}' is unavailable: {reason}")]
    ClipFailed { cue: SoundCue, reason: String },
}

pub fn init_roll_cue_sounds(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<WidgetConfig>,
) {
    let roll_start = asset_server.load(config.cues.roll_start.path.clone());
    let settle = asset_server.load(config.cues.settle.path.clone());
    commands.insert_resource(RollCueSounds { roll_start, settle });
}

/// Restart each requested cue from its configured offset
pub fn play_roll_cues(
    mut commands: Commands,
    mut requests: MessageReader<RollCueRequested>,
    sounds: Option<Res<RollCueSounds>>,
    asset_server: Res<AssetServer>,
    config: Res<WidgetConfig>,
    playing: Query<(Entity, &CuePlayback)>,
) {
    for request in requests.read() {
        let result = play_cue(
            &mut commands,
            sounds.as_deref(),
            &asset_server,
            &config,
            &playing,
            request.cue,
        );
        if let Err(err) = result {
            debug!("Skipping audio cue: {}", err);
        }
    }
}

fn play_cue(
    commands: &mut Commands,
    sounds: Option<&RollCueSounds>,
    asset_server: &AssetServer,
    config: &WidgetConfig,
    playing: &Query<(Entity, &CuePlayback)>,
    cue: SoundCue,
) -> Result<(), SoundError> {
    let sounds = sounds.ok_or(SoundError::NotRegistered)?;
    let handle = sounds.handle(cue);

    if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        return Err(SoundError::ClipFailed {
            cue,
            reason: err.to_string(),
        });
    }

    let settings = config.cues.settings(cue);
    let start_position = settings.start_position().ok_or_else(|| SoundError::ClipFailed {
        cue,
        reason: format!("invalid start offset {}s", settings.offset_secs),
    })?;

    // One playback per cue: stop the previous one before restarting
    for (entity, playback) in playing.iter() {
        if playback.0 == cue {
            commands.entity(entity).despawn();
        }
    }

    commands.spawn((
        AudioPlayer(handle.clone()),
        PlaybackSettings::DESPAWN
            .with_volume(Volume::Linear(settings.volume))
            .with_start_position(start_position),
        CuePlayback(cue),
    ));
    Ok(())
}
