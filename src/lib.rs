//! DnD Game Rolls widget: a click-to-roll 3D d6/d20 with a result
//! multiplier panel.
//!
//! The roll logic in [`dice3d::widget`] is plain Rust and can be driven
//! without a window; [`dice3d::DiceWidgetPlugin`] wires it into a Bevy app.

pub mod dice3d;
