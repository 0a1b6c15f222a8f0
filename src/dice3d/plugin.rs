//! Bevy plugins for the dice widget
//!
//! `DiceRollCorePlugin` holds the roll state and advances it each frame; it
//! needs nothing beyond `Time` and runs headless. `DiceWidgetPlugin` adds the
//! scene, input, UI and audio on top of it.

use bevy::prelude::*;

use crate::dice3d::overlay::MultiplierOverlay;
use crate::dice3d::systems::*;
use crate::dice3d::types::*;
use crate::dice3d::widget::DiceWidget;

/// Frame phases of the widget, run in this order within `Update`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceWidgetSet {
    /// Clicks, key presses and button presses
    Input,
    /// Timers, outcome draw and animation
    Advance,
    /// Everything that reads the advanced state
    Present,
}

#[derive(Default)]
pub struct DiceRollCorePlugin {
    pub config: WidgetConfig,
}

impl DiceRollCorePlugin {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }
}

impl Plugin for DiceRollCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(DiceWidget::from_config(&self.config))
            .insert_resource(WidgetRng::from_config(&self.config))
            .init_resource::<MultiplierOverlay>()
            .add_message::<RollCompleted>()
            .add_message::<RollSettled>()
            .add_message::<RollCueRequested>()
            .configure_sets(
                Update,
                (
                    DiceWidgetSet::Input,
                    DiceWidgetSet::Advance,
                    DiceWidgetSet::Present,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (advance_dice_widget, apply_roll_completions)
                    .chain()
                    .in_set(DiceWidgetSet::Advance),
            );
    }
}

#[derive(Default)]
pub struct DiceWidgetPlugin {
    pub config: WidgetConfig,
}

impl DiceWidgetPlugin {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }
}

impl Plugin for DiceWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DiceRollCorePlugin::new(self.config.clone()))
            .init_resource::<CameraOrbit>()
            .add_systems(Startup, (setup, init_roll_cue_sounds))
            .add_systems(
                Update,
                (handle_die_click, handle_widget_buttons, rotate_camera)
                    .in_set(DiceWidgetSet::Input),
            )
            .add_systems(
                Update,
                (
                    (sync_die_mesh, sync_die_orientation, update_die_color).chain(),
                    update_results_display,
                    update_multiplier_display,
                    update_button_states,
                    play_roll_cues,
                )
                    .in_set(DiceWidgetSet::Present),
            );
    }
}
