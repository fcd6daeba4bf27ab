use bevy::prelude::*;

use crate::core::components::{Returning, Shape, SpawnOrigin, TargetZone};
use crate::core::config::GameConfig;
use crate::core::system::system_order::AnimateSet;
use crate::interaction::drag::ActiveDrag;

/// Cosmetic per-frame motion. No physics anywhere: idle shapes bob on a
/// sine keyed by wall-clock time, unmatched releases lerp home, squashed
/// bins ease back to rest.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (idle_motion, returning_motion, recover_zones).in_set(AnimateSet),
        );
    }
}

fn idle_motion(
    time: Res<Time>,
    active: Res<ActiveDrag>,
    cfg: Res<GameConfig>,
    mut shapes_q: Query<(Entity, &mut Transform), (With<Shape>, Without<Returning>)>,
) {
    let phase_base = time.elapsed_secs() * cfg.motion.bob_frequency;
    for (entity, mut tf) in shapes_q.iter_mut() {
        if active.held() == Some(entity) {
            continue;
        }
        // Phase offset by x so neighbours bob out of step.
        tf.translation.y += (phase_base + tf.translation.x).sin() * cfg.motion.bob_amplitude;
        tf.rotate_y(cfg.motion.idle_spin);
    }
}

fn returning_motion(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut shapes_q: Query<(Entity, &mut Transform, &SpawnOrigin), With<Returning>>,
) {
    for (entity, mut tf, origin) in shapes_q.iter_mut() {
        tf.translation = tf.translation.lerp(origin.0, cfg.motion.return_lerp);
        if tf.translation.distance(origin.0) < cfg.motion.return_epsilon {
            commands.entity(entity).remove::<Returning>();
        }
    }
}

fn recover_zones(cfg: Res<GameConfig>, mut zones_q: Query<&mut Transform, With<TargetZone>>) {
    for mut tf in zones_q.iter_mut() {
        tf.scale = tf.scale.lerp(Vec3::ONE, cfg.matching.recover_rate);
    }
}
