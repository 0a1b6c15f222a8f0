//! Roll systems
//!
//! Drives the dice widget once per frame and turns what the engine reports
//! into messages for the rest of the app.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dice3d::engine::RollEvent;
use crate::dice3d::overlay::MultiplierOverlay;
use crate::dice3d::types::*;
use crate::dice3d::widget::DiceWidget;

/// Random source for outcomes
#[derive(Resource)]
pub struct WidgetRng(pub StdRng);

impl WidgetRng {
    pub fn from_config(config: &WidgetConfig) -> Self {
        match config.seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Advance timers and animation by the frame delta and publish the results
pub fn advance_dice_widget(
    time: Res<Time>,
    mut widget: ResMut<DiceWidget>,
    mut rng: ResMut<WidgetRng>,
    mut completed: MessageWriter<RollCompleted>,
    mut settled: MessageWriter<RollSettled>,
    mut cues: MessageWriter<RollCueRequested>,
) {
    let events = widget.advance(time.delta(), &mut rng.0);

    for event in events {
        match event {
            RollEvent::Started { .. } => {}
            RollEvent::Completed {
                instance,
                die_type,
                outcome,
            } => {
                completed.write(RollCompleted {
                    instance,
                    die_type,
                    outcome,
                });
            }
            RollEvent::Settled {
                instance,
                die_type,
                outcome,
            } => {
                settled.write(RollSettled {
                    instance,
                    die_type,
                    outcome,
                });
            }
            RollEvent::Cue(cue) => {
                cues.write(RollCueRequested { cue });
            }
        }
    }
}

/// Feed completed rolls into the multiplier overlay
pub fn apply_roll_completions(
    mut completed: MessageReader<RollCompleted>,
    mut overlay: ResMut<MultiplierOverlay>,
) {
    for roll in completed.read() {
        overlay.on_roll_complete(roll.outcome);
    }
}
