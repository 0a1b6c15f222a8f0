use bevy::prelude::*;

pub const D6_SIZE: f32 = 0.6;

/// Outward face normals of the cube and the pip count printed on each face.
pub fn d6_face_normals() -> Vec<(Vec3, u32)> {
    vec![
        (Vec3::Y, 6),
        (Vec3::NEG_Y, 1),
        (Vec3::X, 3),
        (Vec3::NEG_X, 4),
        (Vec3::Z, 2),
        (Vec3::NEG_Z, 5),
    ]
}

pub fn create_d6() -> (Mesh, Vec<(Vec3, u32)>) {
    let mesh = Mesh::from(Cuboid::new(D6_SIZE, D6_SIZE, D6_SIZE));
    (mesh, d6_face_normals())
}
