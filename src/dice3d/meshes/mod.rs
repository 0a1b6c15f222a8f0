pub mod d20;
pub mod d6;

use bevy::prelude::*;

use crate::dice3d::types::DiceType;

pub use d20::{create_d20, d20_face_normals};
pub use d6::{create_d6, d6_face_normals};

pub fn create_die_mesh(die_type: DiceType) -> (Mesh, Vec<(Vec3, u32)>) {
    match die_type {
        DiceType::D6 => create_d6(),
        DiceType::D20 => create_d20(),
    }
}

pub fn face_normals(die_type: DiceType) -> Vec<(Vec3, u32)> {
    match die_type {
        DiceType::D6 => d6_face_normals(),
        DiceType::D20 => d20_face_normals(),
    }
}

/// Radius of the sphere used to pick the die with the mouse.
pub fn pick_radius(die_type: DiceType) -> f32 {
    match die_type {
        DiceType::D6 => d6::D6_SIZE * 0.9,
        DiceType::D20 => 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d6_has_6_faces() {
        let (_, face_normals) = create_d6();
        assert_eq!(face_normals.len(), 6, "D6 should have 6 face normals");
        for (_, value) in &face_normals {
            assert!(*value >= 1 && *value <= 6, "D6 face values should be 1-6");
        }
    }

    #[test]
    fn test_d20_has_20_faces() {
        let (_, face_normals) = create_d20();
        assert_eq!(face_normals.len(), 20, "D20 should have 20 face normals");
        let mut values: Vec<u32> = face_normals.iter().map(|(_, v)| *v).collect();
        values.sort();
        assert_eq!(values, (1..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_d20_normals_are_unit_length() {
        for (normal, value) in d20_face_normals() {
            assert!(
                (normal.length() - 1.0).abs() < 1e-5,
                "normal of face {} is not normalized",
                value
            );
        }
    }

    #[test]
    fn test_create_die_mesh() {
        let (_, d6_faces) = create_die_mesh(DiceType::D6);
        let (_, d20_faces) = create_die_mesh(DiceType::D20);

        assert_eq!(d6_faces.len(), 6);
        assert_eq!(d20_faces.len(), 20);
        assert_eq!(face_normals(DiceType::D20), d20_faces);
    }
}
