//! Die rendering systems
//!
//! Keeps the die entity in step with the mounted engine: respawns the mesh
//! when a new die is mounted, copies the live orientation every frame and
//! recolors the die once it shows its result.

use bevy::prelude::*;

use crate::dice3d::faces::orientation_quat;
use crate::dice3d::meshes::create_die_mesh;
use crate::dice3d::types::*;
use crate::dice3d::widget::DiceWidget;

/// Where the die sits in the scene
pub const DIE_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.0);

pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    die_type: DiceType,
    instance: DieInstanceId,
) {
    let (mesh, _face_normals) = create_die_mesh(die_type);
    let material = materials.add(StandardMaterial {
        base_color: die_type.color(),
        perceptual_roughness: 0.35,
        reflectance: 0.6,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::from_translation(DIE_POSITION),
        DieMesh { instance, die_type },
    ));
}

/// Despawn dice that were unmounted and spawn the one that is mounted
pub fn sync_die_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    widget: Res<DiceWidget>,
    dice: Query<(Entity, &DieMesh)>,
) {
    let engine = widget.engine();
    let mut mounted = false;

    for (entity, die) in dice.iter() {
        if die.instance == engine.instance() {
            mounted = true;
        } else {
            commands.entity(entity).despawn();
        }
    }

    if !mounted {
        spawn_die(
            &mut commands,
            &mut meshes,
            &mut materials,
            engine.die_type(),
            engine.instance(),
        );
    }
}

/// Copy the engine's live orientation onto the die transform
pub fn sync_die_orientation(
    widget: Res<DiceWidget>,
    mut dice: Query<(&DieMesh, &mut Transform)>,
) {
    let engine = widget.engine();
    for (die, mut transform) in dice.iter_mut() {
        if die.instance == engine.instance() {
            transform.rotation = orientation_quat(engine.current_orientation());
        }
    }
}

/// Tint the die by its result once resolved; base color otherwise
pub fn update_die_color(
    widget: Res<DiceWidget>,
    dice: Query<(&DieMesh, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let engine = widget.engine();
    let color = match (engine.shows_result(), engine.outcome()) {
        (true, Some(outcome)) => engine.die_type().result_color(outcome),
        _ => engine.die_type().color(),
    };

    for (die, material) in dice.iter() {
        if die.instance != engine.instance() {
            continue;
        }
        let unchanged = materials
            .get(&material.0)
            .is_some_and(|m| m.base_color == color);
        if unchanged {
            continue;
        }
        if let Some(m) = materials.get_mut(&material.0) {
            m.base_color = color;
        }
    }
}
