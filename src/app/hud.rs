use bevy::prelude::*;
use bevy::ui::{FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::core::config::config::GameMode;
use crate::core::config::GameConfig;
use crate::gameplay::session::{RoundClock, RoundSession};

/// In-round readouts: shapes remaining (or score) and the round clock.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Active), spawn_hud)
            .add_systems(Update, refresh_hud.run_if(in_state(AppState::Active)))
            .add_systems(OnExit(AppState::Active), super::menu::despawn_screen::<HudRoot>);
    }
}

#[derive(Component)]
struct HudRoot;
#[derive(Component)]
struct HudProgress;
#[derive(Component)]
struct HudClock;

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
        ))
        .with_children(|p| {
            p.spawn((HudProgress, Text::new("")));
            p.spawn((HudClock, Text::new("")));
        });
}

fn refresh_hud(
    cfg: Res<GameConfig>,
    session: Res<RoundSession>,
    clock: Res<RoundClock>,
    mut q_progress: Query<&mut Text, (With<HudProgress>, Without<HudClock>)>,
    mut q_clock: Query<&mut Text, (With<HudClock>, Without<HudProgress>)>,
) {
    let progress = match cfg.rules.mode {
        GameMode::TimeAttack => format!("Left: {}", session.remaining),
        GameMode::ScoreRush => format!("Score: {}", session.score),
    };
    // Stopwatch to one decimal; countdown in whole seconds.
    let clock_text = match clock.remaining_secs() {
        Some(secs) => format!("{:.0}s", secs.ceil()),
        None => format!("{:.1}s", session.elapsed),
    };
    if let Ok(mut text) = q_progress.single_mut() {
        if text.as_str() != progress {
            *text = Text::new(progress);
        }
    }
    if let Ok(mut text) = q_clock.single_mut() {
        if text.as_str() != clock_text {
            *text = Text::new(clock_text);
        }
    }
}
