//! Scene setup
//!
//! Spawns the camera, lights and the UI: die selector along the top, the
//! caption under the die and the multiplier panel on the right.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::dice3d::overlay::MULTIPLIER_FACTORS;
use crate::dice3d::systems::camera::CameraOrbit;
use crate::dice3d::types::*;

pub fn setup(mut commands: Commands, orbit: Res<CameraOrbit>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(Vec3::new(0.0, 0.8, 1.0).normalize() * orbit.distance)
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Fill light so the faces turned away from the key light stay readable
    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-4.0, 3.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_die_selector(&mut commands);
    spawn_result_caption(&mut commands);
    spawn_multiplier_panel(&mut commands);

    commands.spawn((
        Text::new("Click the die or press Space to roll. A/D rotate, W/S zoom."),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.6, 0.6, 0.65)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn spawn_die_selector(commands: &mut Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            for die_type in DiceType::ALL {
                spawn_button(parent, WidgetButton::SelectDie(die_type));
            }
        });
}

fn spawn_result_caption(commands: &mut Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(60.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ResultText,
            ));
        });
}

fn spawn_multiplier_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.8)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Roll to enable multipliers"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                MultiplierText,
            ));

            panel
                .spawn(Node {
                    column_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|row| {
                    for factor in MULTIPLIER_FACTORS {
                        spawn_button(row, WidgetButton::Multiply(factor));
                    }
                });

            spawn_button(panel, WidgetButton::ResetMultiplier);
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands, button: WidgetButton) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|label| {
            label.spawn((
                Text::new(button.label()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}
