use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::ShapeKind;
use crate::core::config::config::{GameMode, RulesConfig};
use crate::core::config::GameConfig;
use crate::core::system::system_order::ResolveSet;

/// Fallback when a player leaves the name field empty.
pub const DEFAULT_PLAYER_NAME: &str = "Santa's Helper";

const MAX_NAME_LEN: usize = 16;

/// Fired once per successfully sorted shape; the session's bookkeeping hook.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShapeSorted {
    pub kind: ShapeKind,
    pub zone_index: usize,
    pub position: Vec3,
}

/// A finished player's round outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundResult {
    /// Stopwatch seconds (TimeAttack); lower is better.
    Elapsed(f32),
    /// Accumulated points (ScoreRush); higher is better.
    Score(u32),
}

impl RoundResult {
    pub fn display(&self) -> String {
        match self {
            RoundResult::Elapsed(secs) => format!("{secs:.2}s"),
            RoundResult::Score(points) => format!("{points} pts"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub name: String,
    pub result: Option<RoundResult>,
}

/// Mutable once-per-session state: seat order, the live round's counters,
/// and every recorded result until the leaderboard.
#[derive(Resource, Debug, Clone)]
pub struct RoundSession {
    pub players: Vec<PlayerSlot>,
    pub active: usize,
    pub remaining: u32,
    pub score: u32,
    pub elapsed: f32,
}

impl RoundSession {
    pub fn new(player_count: usize) -> Self {
        let players = (1..=player_count.max(1))
            .map(|i| PlayerSlot {
                name: format!("Player {i}"),
                result: None,
            })
            .collect();
        Self {
            players,
            active: 0,
            remaining: 0,
            score: 0,
            elapsed: 0.0,
        }
    }

    pub fn active_player(&self) -> &PlayerSlot {
        &self.players[self.active]
    }

    fn record(&mut self, result: RoundResult) {
        if let Some(slot) = self.players.get_mut(self.active) {
            slot.result = Some(result);
        }
    }
}

impl Default for RoundSession {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The round's time source. Arming replaces whatever ticker was there
/// before, so re-arming without an explicit disarm still leaves exactly
/// one observable timer; disarm runs on every exit from the active round.
#[derive(Resource, Debug, Default)]
pub struct RoundClock {
    countdown: Option<Timer>,
}

impl RoundClock {
    pub fn arm(&mut self, rules: &RulesConfig) {
        self.countdown = match rules.mode {
            GameMode::TimeAttack => None,
            GameMode::ScoreRush => Some(Timer::from_seconds(
                rules.countdown_secs.max(0.0),
                TimerMode::Once,
            )),
        };
    }

    pub fn disarm(&mut self) {
        self.countdown = None;
    }

    pub fn armed(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn remaining_secs(&self) -> Option<f32> {
        self.countdown.as_ref().map(|t| t.remaining_secs())
    }

    /// Advance the countdown; true exactly once, when it expires.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        match self.countdown.as_mut() {
            Some(t) => t.tick(delta).just_finished(),
            None => false,
        }
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<RoundSession>()
            .init_resource::<RoundClock>()
            .add_event::<ShapeSorted>()
            .add_systems(Startup, skip_setup_for_single_player)
            .add_systems(
                Update,
                choose_player_count.run_if(in_state(AppState::Setup)),
            )
            .add_systems(
                Update,
                (type_player_name, start_on_enter).run_if(in_state(AppState::PlayerPrep)),
            )
            .add_systems(OnEnter(AppState::Active), begin_round)
            .add_systems(
                Update,
                (tick_round_clock, handle_sorted)
                    .in_set(ResolveSet)
                    .run_if(in_state(AppState::Active)),
            )
            .add_systems(OnExit(AppState::Active), disarm_clock)
            .add_systems(OnEnter(AppState::RoundEnd), record_result)
            .add_systems(
                Update,
                advance_after_round.run_if(in_state(AppState::RoundEnd)),
            );
    }
}

fn skip_setup_for_single_player(
    cfg: Res<GameConfig>,
    mut session: ResMut<RoundSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if cfg.rules.max_players <= 1 {
        *session = RoundSession::new(1);
        next_state.set(AppState::PlayerPrep);
    }
}

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

fn choose_player_count(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<GameConfig>,
    mut session: ResMut<RoundSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let limit = cfg.rules.max_players.clamp(1, DIGIT_KEYS.len());
    for (i, key) in DIGIT_KEYS[..limit].iter().enumerate() {
        if keys.just_pressed(*key) {
            let count = i + 1;
            info!(target: "session", "Session set up for {count} player(s)");
            *session = RoundSession::new(count);
            next_state.set(AppState::PlayerPrep);
            break;
        }
    }
}

/// Grow/trim a name from one logical key press. Returns true if it changed.
pub fn apply_name_key(name: &mut String, key: &Key) -> bool {
    match key {
        Key::Character(text) => {
            let mut changed = false;
            for c in text.chars().filter(|c| !c.is_control()) {
                if name.chars().count() < MAX_NAME_LEN {
                    name.push(c);
                    changed = true;
                }
            }
            changed
        }
        Key::Space => {
            if !name.is_empty() && name.chars().count() < MAX_NAME_LEN {
                name.push(' ');
                true
            } else {
                false
            }
        }
        Key::Backspace => name.pop().is_some(),
        _ => false,
    }
}

fn type_player_name(
    mut key_events: EventReader<KeyboardInput>,
    mut session: ResMut<RoundSession>,
) {
    let active = session.active;
    let Some(slot) = session.players.get_mut(active) else {
        return;
    };
    for ev in key_events.read() {
        if ev.state == ButtonState::Pressed {
            apply_name_key(&mut slot.name, &ev.logical_key);
        }
    }
}

fn start_on_enter(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<RoundSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    let active = session.active;
    if let Some(slot) = session.players.get_mut(active) {
        if slot.name.trim().is_empty() {
            slot.name = DEFAULT_PLAYER_NAME.into();
        }
    }
    next_state.set(AppState::Active);
}

fn begin_round(
    cfg: Res<GameConfig>,
    mut session: ResMut<RoundSession>,
    mut clock: ResMut<RoundClock>,
) {
    session.remaining = cfg.spawn.count;
    session.score = 0;
    session.elapsed = 0.0;
    // arm() replaces any leftover ticker wholesale.
    clock.arm(&cfg.rules);
    info!(
        target: "session",
        "Round started for '{}' ({:?}, {} shapes)",
        session.active_player().name,
        cfg.rules.mode,
        session.remaining
    );
}

fn tick_round_clock(
    time: Res<Time>,
    mut session: ResMut<RoundSession>,
    mut clock: ResMut<RoundClock>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    session.elapsed += time.delta_secs();
    if clock.tick(time.delta()) {
        info!(target: "session", "Countdown expired");
        next_state.set(AppState::RoundEnd);
    }
}

pub fn handle_sorted(
    mut events: EventReader<ShapeSorted>,
    cfg: Res<GameConfig>,
    mut session: ResMut<RoundSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for ev in events.read() {
        match cfg.rules.mode {
            GameMode::TimeAttack => {
                if session.remaining == 0 {
                    // Round already complete; stray event after the final shape.
                    continue;
                }
                session.remaining -= 1;
                if session.remaining == 0 {
                    next_state.set(AppState::RoundEnd);
                }
            }
            GameMode::ScoreRush => {
                session.score += cfg.rules.score_per_match;
            }
        }
        debug!(
            target: "session",
            "Sorted {:?} into zone {} (remaining {}, score {})",
            ev.kind, ev.zone_index, session.remaining, session.score
        );
    }
}

fn disarm_clock(mut clock: ResMut<RoundClock>) {
    clock.disarm();
}

fn record_result(cfg: Res<GameConfig>, mut session: ResMut<RoundSession>) {
    let result = match cfg.rules.mode {
        GameMode::TimeAttack => RoundResult::Elapsed(session.elapsed),
        GameMode::ScoreRush => RoundResult::Score(session.score),
    };
    session.record(result);
    info!(
        target: "session",
        "Round over: {} -> {}",
        session.active_player().name,
        result.display()
    );
}

fn advance_after_round(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<RoundSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    if session.active + 1 < session.players.len() {
        session.active += 1;
        next_state.set(AppState::PlayerPrep);
    } else {
        next_state.set(AppState::Leaderboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_replaces_previous_ticker() {
        let rules = RulesConfig {
            mode: GameMode::ScoreRush,
            countdown_secs: 10.0,
            ..Default::default()
        };
        let mut clock = RoundClock::default();
        clock.arm(&rules);
        clock.tick(std::time::Duration::from_secs(6));
        clock.arm(&rules);
        // Only the latest ticker is observable, back at full duration.
        let remaining = clock.remaining_secs().unwrap();
        assert!((remaining - 10.0).abs() < 1e-3);
    }

    #[test]
    fn countdown_expires_exactly_once() {
        let rules = RulesConfig {
            mode: GameMode::ScoreRush,
            countdown_secs: 1.0,
            ..Default::default()
        };
        let mut clock = RoundClock::default();
        clock.arm(&rules);
        assert!(!clock.tick(std::time::Duration::from_millis(500)));
        assert!(clock.tick(std::time::Duration::from_millis(600)));
        assert!(!clock.tick(std::time::Duration::from_millis(600)));
    }

    #[test]
    fn time_attack_has_no_countdown() {
        let mut clock = RoundClock::default();
        clock.arm(&RulesConfig::default());
        assert!(!clock.armed());
        assert!(!clock.tick(std::time::Duration::from_secs(999)));
    }

    #[test]
    fn name_keys_append_trim_and_cap() {
        let mut name = String::new();
        assert!(apply_name_key(&mut name, &Key::Character("Ada".into())));
        apply_name_key(&mut name, &Key::Space);
        apply_name_key(&mut name, &Key::Character("L".into()));
        assert_eq!(name, "Ada L");
        assert!(apply_name_key(&mut name, &Key::Backspace));
        assert_eq!(name, "Ada ");
        for _ in 0..40 {
            apply_name_key(&mut name, &Key::Character("x".into()));
        }
        assert_eq!(name.chars().count(), 16);
    }

    #[test]
    fn leading_space_is_ignored() {
        let mut name = String::new();
        assert!(!apply_name_key(&mut name, &Key::Space));
        assert!(name.is_empty());
    }
}
