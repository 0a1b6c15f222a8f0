//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice widget,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, UI)
//! - `camera`: Camera orbit and zoom controls
//! - `roll`: Per-frame widget advance and overlay updates
//! - `input`: Die clicks and button presses
//! - `die_view`: Die mesh, orientation and color
//! - `dice`: Caption, multiplier panel and button states
//! - `sound`: Roll audio cues

pub mod camera;
mod dice;
mod die_view;
mod input;
mod roll;
mod setup;
pub mod sound;

// Re-export all public systems
pub use camera::{rotate_camera, CameraOrbit};
pub use dice::{caption_for, update_button_states, update_multiplier_display, update_results_display};
pub use die_view::{spawn_die, sync_die_mesh, sync_die_orientation, update_die_color, DIE_POSITION};
pub use input::{handle_die_click, handle_widget_buttons, ray_hits_sphere};
pub use roll::{advance_dice_widget, apply_roll_completions, WidgetRng};
pub use setup::setup;
pub use sound::{init_roll_cue_sounds, play_roll_cues, CuePlayback, RollCueSounds, SoundError};
