use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{Returning, Shape, ShapeKind, TargetZone, Zone, Zones};
use crate::core::config::GameConfig;
use crate::core::system::system_order::ResolveSet;
use crate::gameplay::effects::BurstRequest;
use crate::gameplay::session::{handle_sorted, ShapeSorted};
use crate::interaction::drag::DragReleased;

/// First bin, in registration order, that is both within the planar distance
/// threshold (depth axis ignored) and of the released shape's kind. A nearer
/// bin of the wrong kind never shadows a farther matching one.
pub fn evaluate_release(
    kind: ShapeKind,
    position: Vec3,
    zones: &[Zone],
    threshold: f32,
) -> Option<usize> {
    let at = position.truncate();
    zones
        .iter()
        .position(|z| z.kind == kind && at.distance(z.position.truncate()) < threshold)
}

pub struct MatchingPlugin;

impl Plugin for MatchingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            resolve_release
                .in_set(ResolveSet)
                .before(handle_sorted)
                .run_if(in_state(AppState::Active)),
        );
    }
}

fn resolve_release(
    mut commands: Commands,
    mut released: EventReader<DragReleased>,
    mut sorted: EventWriter<ShapeSorted>,
    mut bursts: EventWriter<BurstRequest>,
    zones: Res<Zones>,
    cfg: Res<GameConfig>,
    shapes_q: Query<(&ShapeKind, &Transform), With<Shape>>,
    mut zone_tf_q: Query<&mut Transform, (With<TargetZone>, Without<Shape>)>,
) {
    for ev in released.read() {
        let Ok((kind, tf)) = shapes_q.get(ev.entity) else {
            continue;
        };
        match evaluate_release(
            *kind,
            tf.translation,
            &zones.0,
            cfg.matching.distance_threshold,
        ) {
            Some(index) => {
                sorted.write(ShapeSorted {
                    kind: *kind,
                    zone_index: index,
                    position: tf.translation,
                });
                bursts.write(BurstRequest {
                    position: tf.translation,
                    kind: *kind,
                });
                // Squash the bin; the recover system eases it back to rest.
                if let Ok(mut zone_tf) = zone_tf_q.get_mut(zones.0[index].entity) {
                    zone_tf.scale = Vec3::new(
                        cfg.matching.squash_xz,
                        cfg.matching.squash_y,
                        cfg.matching.squash_xz,
                    );
                }
                commands.entity(ev.entity).despawn();
            }
            None => {
                // Not an error; the shape eases back home.
                commands.entity(ev.entity).insert(Returning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(kind: ShapeKind, x: f32) -> Zone {
        Zone {
            kind,
            position: Vec3::new(x, -3.5, 0.0),
            entity: Entity::from_raw(u32::MAX - 1),
        }
    }

    fn row() -> Vec<Zone> {
        vec![
            zone(ShapeKind::Tree, -3.0),
            zone(ShapeKind::Bell, 0.0),
            zone(ShapeKind::Bauble, 3.0),
        ]
    }

    #[test]
    fn matches_inside_threshold_with_equal_kind() {
        let hit = evaluate_release(ShapeKind::Bell, Vec3::new(0.4, -3.0, 2.0), &row(), 1.8);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn depth_axis_is_ignored() {
        let hit = evaluate_release(ShapeKind::Bell, Vec3::new(0.0, -3.5, 50.0), &row(), 1.8);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn outside_threshold_misses() {
        let hit = evaluate_release(ShapeKind::Bell, Vec3::new(0.0, 5.0, 0.0), &row(), 1.8);
        assert_eq!(hit, None);
    }

    #[test]
    fn kind_flip_alone_flips_the_result() {
        let at = Vec3::new(-3.0, -3.3, 0.0);
        assert_eq!(evaluate_release(ShapeKind::Tree, at, &row(), 1.8), Some(0));
        assert_eq!(evaluate_release(ShapeKind::Bauble, at, &row(), 1.8), None);
    }

    #[test]
    fn nearer_mismatched_bin_does_not_shadow() {
        // Dropped right on the bell bin but within reach of the tree bin.
        let at = Vec3::new(-1.4, -3.5, 0.0);
        let hit = evaluate_release(ShapeKind::Tree, at, &row(), 2.0);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn same_kind_tie_goes_to_first_registered() {
        let zones = vec![zone(ShapeKind::Bell, -0.5), zone(ShapeKind::Bell, 0.5)];
        let hit = evaluate_release(ShapeKind::Bell, Vec3::new(0.0, -3.5, 0.0), &zones, 1.8);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn empty_zone_row_is_total() {
        assert_eq!(evaluate_release(ShapeKind::Tree, Vec3::ZERO, &[], 1.8), None);
    }
}
