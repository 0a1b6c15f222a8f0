//! Type definitions for the dice widget
//!
//! This module is organized into submodules:
//! - `dice` - Dice types, roll phases, instance ids and sound cues
//! - `config` - Widget configuration and loading
//! - `messages` - Messages the roll core sends to the rest of the app
//! - `ui` - Scene and UI marker components

pub mod config;
pub mod dice;
pub mod messages;
pub mod ui;

// Re-export all public types for convenient access
pub use config::*;
pub use dice::*;
pub use messages::*;
pub use ui::*;
