use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use shape_sorter::core::config::config::GameMode;
use shape_sorter::gameplay::session::{
    RoundClock, RoundResult, RoundSession, SessionPlugin, ShapeSorted, DEFAULT_PLAYER_NAME,
};
use shape_sorter::{AppState, GameConfig, ShapeKind};

fn test_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(cfg);
    // Stand-ins for the input plugin the full app gets from DefaultPlugins.
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_event::<KeyboardInput>();
    app.add_plugins(SessionPlugin);
    app
}

fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .reset_all();
    // One more frame so the queued state transition applies.
    app.update();
}

fn sort_one(app: &mut App) {
    app.world_mut().send_event(ShapeSorted {
        kind: ShapeKind::Tree,
        zone_index: 0,
        position: Vec3::ZERO,
    });
}

#[test]
fn single_player_skips_setup() {
    let mut app = test_app(GameConfig::default());
    app.update();
    assert_eq!(state(&app), AppState::PlayerPrep);
    assert_eq!(app.world().resource::<RoundSession>().players.len(), 1);
}

#[test]
fn multi_player_setup_collects_count() {
    let mut cfg = GameConfig::default();
    cfg.rules.max_players = 4;
    let mut app = test_app(cfg);
    app.update();
    assert_eq!(state(&app), AppState::Setup);
    press(&mut app, KeyCode::Digit3);
    assert_eq!(state(&app), AppState::PlayerPrep);
    assert_eq!(app.world().resource::<RoundSession>().players.len(), 3);
}

#[test]
fn time_attack_round_completes_when_remaining_hits_zero() {
    let mut cfg = GameConfig::default();
    cfg.spawn.count = 5;
    let mut app = test_app(cfg);
    app.update();
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Active);
    {
        let session = app.world().resource::<RoundSession>();
        assert_eq!(session.remaining, 5);
        // Empty name entry fell back to the default.
        assert_eq!(session.active_player().name, DEFAULT_PLAYER_NAME);
    }

    for _ in 0..4 {
        sort_one(&mut app);
    }
    app.update();
    assert_eq!(state(&app), AppState::Active);
    assert_eq!(app.world().resource::<RoundSession>().remaining, 1);

    sort_one(&mut app);
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::RoundEnd);
    let session = app.world().resource::<RoundSession>();
    assert_eq!(session.remaining, 0);
    assert!(matches!(
        session.players[0].result,
        Some(RoundResult::Elapsed(_))
    ));

    // Single player heads straight to the leaderboard.
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Leaderboard);
}

#[test]
fn surplus_sort_events_trigger_round_end_exactly_once() {
    let mut cfg = GameConfig::default();
    cfg.spawn.count = 5;
    let mut app = test_app(cfg);
    app.update();
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Active);

    // More events than shapes in a single frame: the counter must stop at
    // zero and the round must end once, not underflow or re-trigger.
    for _ in 0..9 {
        sort_one(&mut app);
    }
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::RoundEnd);
    assert_eq!(app.world().resource::<RoundSession>().remaining, 0);

    for _ in 0..3 {
        sort_one(&mut app);
    }
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::RoundEnd);
    assert_eq!(app.world().resource::<RoundSession>().remaining, 0);
}

#[test]
fn score_rush_turns_rotate_through_players_to_leaderboard() {
    let mut cfg = GameConfig::default();
    cfg.rules.mode = GameMode::ScoreRush;
    cfg.rules.max_players = 2;
    cfg.rules.countdown_secs = 0.5;
    cfg.rules.score_per_match = 10;
    let mut app = test_app(cfg);
    app.update();
    press(&mut app, KeyCode::Digit2);
    assert_eq!(state(&app), AppState::PlayerPrep);

    // Player 1's turn.
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Active);
    assert!(app.world().resource::<RoundClock>().armed());
    sort_one(&mut app);
    sort_one(&mut app);
    app.update();
    assert_eq!(app.world().resource::<RoundSession>().score, 20);

    // Let the short countdown expire.
    let mut guard = 0;
    while state(&app) != AppState::RoundEnd {
        std::thread::sleep(std::time::Duration::from_millis(5));
        app.update();
        guard += 1;
        assert!(guard < 400, "countdown never expired");
    }
    {
        let session = app.world().resource::<RoundSession>();
        assert_eq!(session.players[0].result, Some(RoundResult::Score(20)));
        assert!(!app.world().resource::<RoundClock>().armed());
    }

    // Player 2's turn, scoring nothing.
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::PlayerPrep);
    assert_eq!(app.world().resource::<RoundSession>().active, 1);
    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Active);
    let mut guard = 0;
    while state(&app) != AppState::RoundEnd {
        std::thread::sleep(std::time::Duration::from_millis(5));
        app.update();
        guard += 1;
        assert!(guard < 400, "countdown never expired");
    }
    assert_eq!(
        app.world().resource::<RoundSession>().players[1].result,
        Some(RoundResult::Score(0))
    );

    press(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), AppState::Leaderboard);
}
