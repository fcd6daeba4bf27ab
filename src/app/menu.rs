use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::core::config::GameConfig;
use crate::gameplay::session::RoundSession;

/// Pre-round screens: player-count setup and per-player name entry.
/// Presentation only; every transition lives in the session state machine.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Setup), spawn_setup_ui)
            .add_systems(OnExit(AppState::Setup), despawn_screen::<SetupUiRoot>)
            .add_systems(OnEnter(AppState::PlayerPrep), spawn_prep_ui)
            .add_systems(
                Update,
                populate_prep_text.run_if(in_state(AppState::PlayerPrep)),
            )
            .add_systems(OnExit(AppState::PlayerPrep), despawn_screen::<PrepUiRoot>);
    }
}

#[derive(Component)]
struct SetupUiRoot;
#[derive(Component)]
struct PrepUiRoot;
#[derive(Component)]
struct PrepUiText;

fn screen_root() -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(12.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.02, 0.05, 0.03, 0.85)),
    )
}

fn spawn_setup_ui(mut commands: Commands, cfg: Res<GameConfig>) {
    let limit = cfg.rules.max_players.clamp(1, 9);
    commands
        .spawn((SetupUiRoot, screen_root()))
        .with_children(|p| {
            p.spawn(Text::new("=== SHAPE SORTER ==="));
            p.spawn(Text::new(format!(
                "How many players? Press 1-{limit}"
            )));
        });
}

fn spawn_prep_ui(mut commands: Commands) {
    commands
        .spawn((PrepUiRoot, screen_root()))
        .with_children(|p| {
            p.spawn((PrepUiText, Text::new("")));
            p.spawn(Text::new("Type a name, then press Enter to start"));
        });
}

fn populate_prep_text(
    session: Res<RoundSession>,
    mut q_text: Query<&mut Text, With<PrepUiText>>,
) {
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    let s = format!(
        "Player {} of {}: {}_",
        session.active + 1,
        session.players.len(),
        session.active_player().name
    );
    if text.as_str() != s {
        *text = Text::new(s);
    }
}

pub(super) fn despawn_screen<T: Component>(mut commands: Commands, q_root: Query<Entity, With<T>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}
