use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use shape_sorter::{GameConfig, GameMode, GamePlugin};

#[derive(Parser, Debug)]
#[command(about = "Sort falling ornaments into their bins before the clock wins")]
struct Args {
    /// Alternate RON config (default: assets/config/game.ron).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured mode: time-attack | score-rush.
    #[arg(long)]
    mode: Option<String>,
}

fn parse_mode(raw: &str) -> Result<GameMode> {
    match raw {
        "time-attack" => Ok(GameMode::TimeAttack),
        "score-rush" => Ok(GameMode::ScoreRush),
        other => bail!("unknown mode '{other}' (expected time-attack or score-rush)"),
    }
}

#[derive(Resource)]
struct ConfigReport {
    issues: Vec<String>,
}

fn log_config_report(report: Res<ConfigReport>) {
    for issue in &report.issues {
        warn!(target: "config", "{issue}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = args
        .config
        .unwrap_or_else(|| PathBuf::from("assets/config/game.ron"));
    let (mut cfg, load_error) = GameConfig::load_or_default(&path);
    let mut issues: Vec<String> = load_error
        .map(|e| format!("{}: {e}; using defaults", path.display()))
        .into_iter()
        .collect();
    if let Some(raw) = args.mode.as_deref() {
        cfg.rules.mode = parse_mode(raw)?;
    }
    issues.extend(cfg.validate());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(cfg)
        .insert_resource(ConfigReport { issues })
        .add_systems(Startup, log_config_report)
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}
