//! Face-orientation tables
//!
//! Each die type has a fixed table mapping an outcome to the Euler rotation
//! (x, y, z) that brings that face to the top (+Y). The values are calibrated
//! against the face layout in `dice3d::meshes`.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::dice3d::types::DiceType;

/// Euler angles (radians) describing a die's pose.
pub type Orientation = Vec3;

/// Index 0 is outcome 1.
const D6_ORIENTATIONS: [Orientation; 6] = [
    Vec3::new(PI, 0.0, 0.0),
    Vec3::new(-FRAC_PI_2, 0.0, 0.0),
    Vec3::new(0.0, 0.0, FRAC_PI_2),
    Vec3::new(0.0, 0.0, -FRAC_PI_2),
    Vec3::new(FRAC_PI_2, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0),
];

/// Index 0 is outcome 1.
const D20_ORIENTATIONS: [Orientation; 20] = [
    Vec3::new(-1.2059, 0.0, 1.5708),
    Vec3::new(-0.6155, 0.0, 0.7854),
    Vec3::new(-0.3649, 0.0, 0.0),
    Vec3::new(-0.6155, 0.0, -0.7854),
    Vec3::new(-1.2059, 0.0, -1.5708),
    Vec3::new(-0.6155, 0.0, 2.3562),
    Vec3::new(0.0, 0.0, 1.9357),
    Vec3::new(0.0, 0.0, 1.2059),
    Vec3::new(0.6155, 0.0, 0.7854),
    Vec3::new(0.3649, 0.0, 0.0),
    Vec3::new(0.6155, 0.0, -0.7854),
    Vec3::new(0.0, 0.0, -1.2059),
    Vec3::new(0.0, 0.0, -1.9357),
    Vec3::new(-0.6155, 0.0, -2.3562),
    Vec3::new(-0.3649, 0.0, 3.1416),
    Vec3::new(0.3649, 0.0, 3.1416),
    Vec3::new(0.6155, 0.0, 2.3562),
    Vec3::new(1.2059, 0.0, 1.5708),
    Vec3::new(1.2059, 0.0, -1.5708),
    Vec3::new(0.6155, 0.0, -2.3562),
];

/// Outcome → final orientation lookup for one die type
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceOrientationTable {
    die_type: DiceType,
    orientations: &'static [Orientation],
}

impl FaceOrientationTable {
    pub fn for_die(die_type: DiceType) -> Self {
        let orientations: &'static [Orientation] = match die_type {
            DiceType::D6 => &D6_ORIENTATIONS,
            DiceType::D20 => &D20_ORIENTATIONS,
        };
        Self {
            die_type,
            orientations,
        }
    }

    pub fn die_type(&self) -> DiceType {
        self.die_type
    }

    /// Number of faces, i.e. the largest outcome.
    pub fn faces(&self) -> u32 {
        self.orientations.len() as u32
    }

    /// Orientation that shows `outcome` on top. `None` outside `1..=faces`.
    pub fn orientation_of(&self, outcome: u32) -> Option<Orientation> {
        let index = outcome.checked_sub(1)? as usize;
        self.orientations.get(index).copied()
    }
}

/// Rotation applied to the die mesh for an orientation: `Rx * Ry * Rz`.
pub fn orientation_quat(orientation: Orientation) -> Quat {
    Quat::from_rotation_x(orientation.x)
        * Quat::from_rotation_y(orientation.y)
        * Quat::from_rotation_z(orientation.z)
}
