//! Camera control systems
//!
//! A/D (or the arrow keys) orbit the camera around the die, W/S zoom.

use bevy::prelude::*;

use crate::dice3d::types::*;

pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 6.0;

/// Distance of the camera from the die
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraOrbit {
    pub distance: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self { distance: 3.5 }
    }
}

impl CameraOrbit {
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }
}

/// System to handle camera rotation and keyboard zoom
pub fn rotate_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<CameraOrbit>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let rotation_speed = 1.0;
    let zoom_speed = 2.0;

    let mut angle = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        angle += rotation_speed * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        angle -= rotation_speed * time.delta_secs();
    }

    let mut zoom = 0.0;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        zoom -= zoom_speed * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        zoom += zoom_speed * time.delta_secs();
    }

    if angle == 0.0 && zoom == 0.0 {
        return;
    }
    if zoom != 0.0 {
        orbit.zoom(zoom);
    }

    for mut transform in camera_query.iter_mut() {
        let direction = (Quat::from_rotation_y(angle) * transform.translation).normalize_or(Vec3::Z);
        transform.translation = direction * orbit.distance;
        *transform = transform.looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = CameraOrbit::default();
        orbit.zoom(-100.0);
        assert_eq!(orbit.distance, CAMERA_MIN_DISTANCE);
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, CAMERA_MAX_DISTANCE);
    }
}
