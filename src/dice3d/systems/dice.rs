//! Result display systems
//!
//! This module contains systems for the roll caption, the multiplier panel
//! text and the enabled/active look of the widget buttons.

use bevy::prelude::*;

use crate::dice3d::overlay::{result_caption, MultiplierOverlay};
use crate::dice3d::types::*;
use crate::dice3d::widget::DiceWidget;

/// Caption for the mounted die: only shown once the roll has resolved
pub fn caption_for(widget: &DiceWidget) -> String {
    let engine = widget.engine();
    match (engine.shows_result(), engine.outcome()) {
        (true, Some(outcome)) => result_caption(engine.die_type(), outcome),
        _ => String::new(),
    }
}

/// System to update the roll caption text
pub fn update_results_display(
    widget: Res<DiceWidget>,
    mut text_query: Query<&mut Text, With<ResultText>>,
) {
    let caption = caption_for(&widget);
    for mut text in text_query.iter_mut() {
        if text.0 != caption {
            text.0 = caption.clone();
        }
    }
}

/// System to update the multiplier panel text
pub fn update_multiplier_display(
    overlay: Res<MultiplierOverlay>,
    mut text_query: Query<&mut Text, With<MultiplierText>>,
) {
    if !overlay.is_changed() {
        return;
    }

    let value = match overlay.summary() {
        Some(summary) => format!("Value: {}", summary),
        None => "Roll to enable multipliers".to_string(),
    };
    for mut text in text_query.iter_mut() {
        text.0 = value.clone();
    }
}

/// Color buttons by state: active die, disabled controls, hover
pub fn update_button_states(
    widget: Res<DiceWidget>,
    overlay: Res<MultiplierOverlay>,
    mut buttons: Query<(&Interaction, &WidgetButton, &mut BackgroundColor)>,
) {
    for (interaction, button, mut background) in buttons.iter_mut() {
        let enabled = match button {
            WidgetButton::SelectDie(_) => true,
            WidgetButton::Multiply(_) => overlay.can_multiply(),
            WidgetButton::ResetMultiplier => overlay.can_reset(),
        };

        let color = match (button, enabled, interaction) {
            (WidgetButton::SelectDie(die_type), _, _) if *die_type == widget.active_die() => {
                BUTTON_ACTIVE
            }
            (_, false, _) => BUTTON_DISABLED,
            (_, true, Interaction::Hovered | Interaction::Pressed) => BUTTON_HOVER,
            (_, true, Interaction::None) => BUTTON_IDLE,
        };

        if background.0 != color {
            background.0 = color;
        }
    }
}
