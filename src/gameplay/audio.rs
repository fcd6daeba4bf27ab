use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings};
use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::gameplay::session::ShapeSorted;

/// Fire-and-forget cue playback: a pop per sorted shape, a chime per
/// finished round. Nothing downstream consults the result.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_cues)
            .add_systems(Update, pop_on_sort)
            .add_systems(OnEnter(AppState::RoundEnd), chime_on_round_end);
    }
}

#[derive(Resource)]
struct AudioCues {
    pop: Handle<AudioSource>,
    win: Handle<AudioSource>,
}

fn load_cues(mut commands: Commands, assets: Res<AssetServer>, cfg: Res<GameConfig>) {
    if !cfg.audio.enabled {
        return;
    }
    commands.insert_resource(AudioCues {
        pop: assets.load("audio/pop.ogg"),
        win: assets.load("audio/win.ogg"),
    });
}

fn pop_on_sort(
    mut commands: Commands,
    mut sorted: EventReader<ShapeSorted>,
    cues: Option<Res<AudioCues>>,
) {
    let Some(cues) = cues else {
        sorted.clear();
        return;
    };
    for _ in sorted.read() {
        commands.spawn((
            AudioPlayer::new(cues.pop.clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
}

fn chime_on_round_end(mut commands: Commands, cues: Option<Res<AudioCues>>) {
    if let Some(cues) = cues {
        commands.spawn((
            AudioPlayer::new(cues.win.clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
}
