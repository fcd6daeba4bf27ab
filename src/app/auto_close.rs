use bevy::prelude::*;

use crate::core::config::GameConfig;

/// Smoke-run helper: request app exit a configured number of seconds after
/// launch. `window.autoClose` 0.0 (the default) leaves the app running.
pub struct AutoClosePlugin;

#[derive(Resource, Deref, DerefMut)]
struct ExitDeadline(Timer);

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_deadline).add_systems(
            Update,
            exit_at_deadline.run_if(resource_exists::<ExitDeadline>),
        );
    }
}

fn arm_deadline(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(target: "session", "Smoke run: exiting after {secs} seconds");
        commands.insert_resource(ExitDeadline(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn exit_at_deadline(
    time: Res<Time>,
    mut deadline: ResMut<ExitDeadline>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if deadline.tick(time.delta()).just_finished() {
        info!(target: "session", "Smoke run deadline reached, requesting exit");
        ev_exit.write(AppExit::Success);
    }
}
