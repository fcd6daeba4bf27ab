use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::menu::despawn_screen;
use super::state::AppState;
use crate::gameplay::leaderboard::{podium_slots, rank_players};
use crate::gameplay::session::RoundSession;

/// Post-round summary and the final podium screen.
pub struct ResultsPlugin;

impl Plugin for ResultsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::RoundEnd), spawn_round_summary)
            .add_systems(OnExit(AppState::RoundEnd), despawn_screen::<SummaryRoot>)
            .add_systems(OnEnter(AppState::Leaderboard), spawn_leaderboard);
    }
}

#[derive(Component)]
struct SummaryRoot;

fn centered_column() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(10.0),
        ..default()
    }
}

fn spawn_round_summary(mut commands: Commands, session: Res<RoundSession>) {
    let slot = session.active_player();
    let result = slot
        .result
        .as_ref()
        .map(|r| r.display())
        .unwrap_or_else(|| "-".into());
    let more_players = session.active + 1 < session.players.len();
    commands
        .spawn((SummaryRoot, centered_column()))
        .with_children(|p| {
            p.spawn(Text::new(format!("{} finished!", slot.name)));
            p.spawn(Text::new(result));
            p.spawn(Text::new(if more_players {
                "Press Enter for the next player"
            } else {
                "Press Enter for the leaderboard"
            }));
        });
}

fn spawn_leaderboard(mut commands: Commands, session: Res<RoundSession>) {
    let ranked = rank_players(&session.players);
    let podium = podium_slots(&ranked);
    commands.spawn(centered_column()).with_children(|p| {
        p.spawn(Text::new("=== LEADERBOARD ==="));
        for (place, &idx) in ranked.iter().enumerate() {
            let slot = &session.players[idx];
            let result = slot
                .result
                .as_ref()
                .map(|r| r.display())
                .unwrap_or_else(|| "-".into());
            p.spawn(Text::new(format!("{}. {} - {}", place + 1, slot.name, result)));
        }
        // Podium row reads runner-up / winner / third, left to right.
        let podium_line: Vec<String> = podium
            .iter()
            .map(|s| match s {
                Some(idx) => session.players[*idx].name.clone(),
                None => "-".into(),
            })
            .collect();
        p.spawn(Text::new(format!("Podium: [ {} ]", podium_line.join(" | "))));
    });
    info!(target: "session", "Session complete");
}
