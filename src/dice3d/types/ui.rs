//! UI and scene marker components

use bevy::prelude::*;

use super::{DiceType, DieInstanceId};

/// Marker for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// The rendered die; tied to the engine instance it was spawned for
#[derive(Component, Clone, Copy, Debug)]
pub struct DieMesh {
    pub instance: DieInstanceId,
    pub die_type: DiceType,
}

/// Text node showing the roll caption ("Rolled: 7", "CRITICAL HIT!")
#[derive(Component)]
pub struct ResultText;

/// Text node of the multiplier panel
#[derive(Component)]
pub struct MultiplierText;

/// Clickable controls of the widget
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetButton {
    SelectDie(DiceType),
    Multiply(u32),
    ResetMultiplier,
}

impl WidgetButton {
    pub fn label(&self) -> String {
        match self {
            WidgetButton::SelectDie(die_type) => die_type.name().to_string(),
            WidgetButton::Multiply(factor) => format!("x{}", factor),
            WidgetButton::ResetMultiplier => "Reset".to_string(),
        }
    }
}

/// Button colors
pub const BUTTON_IDLE: Color = Color::srgb(0.2, 0.2, 0.26);
pub const BUTTON_HOVER: Color = Color::srgb(0.3, 0.3, 0.38);
pub const BUTTON_ACTIVE: Color = Color::srgb(0.35, 0.45, 0.85);
pub const BUTTON_DISABLED: Color = Color::srgba(0.2, 0.2, 0.22, 0.45);
