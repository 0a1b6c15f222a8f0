use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

const D20_SIZE: f32 = 0.5;

/// 20 triangular faces (vertex indices). Face `i` carries the number `i + 1`.
const D20_FACES: [[usize; 3]; 20] = [
    [0, 1, 8],
    [0, 8, 4],
    [0, 4, 5],
    [0, 5, 9],
    [0, 9, 1],
    [1, 6, 8],
    [8, 6, 10],
    [8, 10, 4],
    [4, 10, 2],
    [4, 2, 5],
    [5, 2, 11],
    [5, 11, 9],
    [9, 11, 7],
    [9, 7, 1],
    [1, 7, 6],
    [3, 6, 7],
    [3, 10, 6],
    [3, 2, 10],
    [3, 11, 2],
    [3, 7, 11],
];

fn d20_vertices() -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = D20_SIZE * 0.7;

    // Icosahedron has 12 vertices
    vec![
        Vec3::new(0.0, 1.0, phi) * s,
        Vec3::new(0.0, -1.0, phi) * s,
        Vec3::new(0.0, 1.0, -phi) * s,
        Vec3::new(0.0, -1.0, -phi) * s,
        Vec3::new(1.0, phi, 0.0) * s,
        Vec3::new(-1.0, phi, 0.0) * s,
        Vec3::new(1.0, -phi, 0.0) * s,
        Vec3::new(-1.0, -phi, 0.0) * s,
        Vec3::new(phi, 0.0, 1.0) * s,
        Vec3::new(-phi, 0.0, 1.0) * s,
        Vec3::new(phi, 0.0, -1.0) * s,
        Vec3::new(-phi, 0.0, -1.0) * s,
    ]
}

/// Outward face normals of the icosahedron and the number on each face.
pub fn d20_face_normals() -> Vec<(Vec3, u32)> {
    let vertices = d20_vertices();
    D20_FACES
        .iter()
        .enumerate()
        .map(|(i, face)| {
            let center = (vertices[face[0]] + vertices[face[1]] + vertices[face[2]]) / 3.0;
            (center.normalize(), (i + 1) as u32)
        })
        .collect()
}

pub fn create_d20() -> (Mesh, Vec<(Vec3, u32)>) {
    let vertices = d20_vertices();
    let mesh = create_d20_mesh(&vertices, &D20_FACES);
    (mesh, d20_face_normals())
}

fn create_d20_mesh(vertices: &[Vec3], faces: &[[usize; 3]; 20]) -> Mesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();

    for face in faces {
        let v0 = vertices[face[0]];
        let v1 = vertices[face[1]];
        let v2 = vertices[face[2]];

        // Flat shading: every corner of the triangle shares the face normal
        let mut normal = (v1 - v0).cross(v2 - v0).normalize();
        let (a, b) = if normal.dot(v0) < 0.0 {
            normal = -normal;
            (v2, v1)
        } else {
            (v1, v2)
        };
        let n = normal.to_array();

        positions.push(v0.to_array());
        positions.push(a.to_array());
        positions.push(b.to_array());

        normals.push(n);
        normals.push(n);
        normals.push(n);
    }

    let num_vertices = positions.len();
    let indices: Vec<u32> = (0..num_vertices as u32).collect();
    let uvs: Vec<[f32; 2]> = positions.iter().map(|_| [0.5, 0.5]).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}
