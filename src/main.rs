// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use dndgamerolls_widget::dice3d::{DiceType, DiceWidgetPlugin, WidgetConfig};

/// DnD Game Rolls - 3D dice widget
#[derive(Parser)]
#[command(name = "dndgamerolls-widget")]
#[command(author, version, about = "Click-to-roll 3D d6/d20 widget")]
struct Args {
    /// Path to a RON widget config (defaults to the bundled one)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Die to mount at startup (d6 or d20)
    #[arg(short, long, value_parser = parse_die_arg)]
    die: Option<DiceType>,
}

fn parse_die_arg(s: &str) -> Result<DiceType, String> {
    DiceType::parse(s).ok_or_else(|| format!("Unknown die '{}': expected d6 or d20", s))
}

fn main() {
    let args = Args::parse();

    // The log plugin is not up yet, so hold on to the error and report it
    // once the app is built.
    let (mut config, load_error) = match &args.config {
        Some(path) => match WidgetConfig::load(path) {
            Ok(config) => (config, None),
            Err(err) => (WidgetConfig::bundled(), Some(err)),
        },
        None => (WidgetConfig::bundled(), None),
    };
    if let Some(die) = args.die {
        config.default_die = die;
    }

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "DnD Game Rolls - Dice Widget".to_string(),
                    resolution: (900u32, 700u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: "info,wgpu=error,naga=warn".to_string(),
                ..default()
            }),
    )
    .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
    .add_plugins(DiceWidgetPlugin::new(config));

    if let Some(err) = load_error {
        warn!("Failed to load widget config, using defaults: {}", err);
    }

    app.run();
}
