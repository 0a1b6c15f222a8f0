//! Input handling systems
//!
//! Clicking the die (or pressing Space) starts a roll; the UI buttons switch
//! the die type and drive the multiplier panel.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::dice3d::meshes::pick_radius;
use crate::dice3d::overlay::MultiplierOverlay;
use crate::dice3d::types::*;
use crate::dice3d::widget::DiceWidget;

/// Start a roll when the die is clicked or Space is pressed
pub fn handle_die_click(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    die_query: Query<(&GlobalTransform, &DieMesh)>,
    buttons: Query<&Interaction, With<WidgetButton>>,
    mut widget: ResMut<DiceWidget>,
) {
    let mut clicked = keyboard.just_pressed(KeyCode::Space);

    // Clicks on the UI panels never reach the die.
    let over_ui = buttons.iter().any(|i| *i != Interaction::None);
    if mouse.just_pressed(MouseButton::Left) && !over_ui {
        clicked |= cursor_hits_die(&windows, &camera_query, &die_query);
    }

    if clicked {
        widget.click();
    }
}

fn cursor_hits_die(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    die_query: &Query<(&GlobalTransform, &DieMesh)>,
) -> bool {
    let Ok(window) = windows.single() else {
        return false;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return false;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return false;
    };

    // Cast ray from camera through cursor position
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return false;
    };

    die_query.iter().any(|(transform, die)| {
        ray_hits_sphere(
            ray.origin,
            *ray.direction,
            transform.translation(),
            pick_radius(die.die_type),
        )
    })
}

/// Whether the ray `origin + t * direction` (t >= 0) passes within `radius`
/// of `center`. `direction` must be normalized.
pub fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> bool {
    let to_center = center - origin;
    let t = to_center.dot(direction);
    if t < 0.0 {
        // Sphere is behind the ray unless the origin is inside it
        return to_center.length_squared() <= radius * radius;
    }
    let closest = origin + direction * t;
    closest.distance_squared(center) <= radius * radius
}

/// Handle presses on the die selector and multiplier buttons
pub fn handle_widget_buttons(
    interaction_query: Query<(&Interaction, &WidgetButton), Changed<Interaction>>,
    mut widget: ResMut<DiceWidget>,
    mut overlay: ResMut<MultiplierOverlay>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match *button {
            WidgetButton::SelectDie(die_type) => {
                widget.select(die_type);
            }
            WidgetButton::Multiply(factor) => {
                overlay.multiply(factor);
            }
            WidgetButton::ResetMultiplier => {
                overlay.reset_multiplier();
            }
        }
    }
}
