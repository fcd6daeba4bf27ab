use bevy::prelude::*;
use rand::Rng;

use crate::app::state::AppState;
use crate::core::components::{PartBounds, Shape, ShapeKind, SpawnOrigin, TargetZone, Zone, Zones};
use crate::core::config::config::{GameMode, ShapeSpawnConfig, SpawnRange};
use crate::core::config::GameConfig;
use crate::core::system::system_order::ResolveSet;
use crate::gameplay::session::{handle_sorted, ShapeSorted};
use crate::rendering::shapes::{build_shape_assets, ShapeAssets};

pub struct ShapeSpawnPlugin;

impl Plugin for ShapeSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Zones>()
            .add_systems(Startup, spawn_zones.after(build_shape_assets))
            .add_systems(OnEnter(AppState::Active), respawn_all)
            .add_systems(
                Update,
                topup_after_sort
                    .in_set(ResolveSet)
                    .after(handle_sorted)
                    .run_if(in_state(AppState::Active)),
            );
    }
}

fn sample(rng: &mut impl Rng, range: &SpawnRange<f32>) -> f32 {
    if range.max > range.min {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}

/// Assemble one compound shape: a tagged root plus one child per part, each
/// carrying its picking sphere. The spawn position doubles as the immutable
/// return-home origin.
pub fn spawn_shape(
    commands: &mut Commands,
    assets: &ShapeAssets,
    spawn_cfg: &ShapeSpawnConfig,
    rng: &mut impl Rng,
) -> Entity {
    let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
    let pos = Vec3::new(
        sample(rng, &spawn_cfg.x_range),
        sample(rng, &spawn_cfg.y_range),
        sample(rng, &spawn_cfg.z_range),
    );
    let rot = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen::<f32>(),
        rng.gen::<f32>(),
        rng.gen::<f32>(),
    );
    commands
        .spawn((
            Shape,
            kind,
            SpawnOrigin(pos),
            Transform::from_translation(pos).with_rotation(rot),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for part in assets.parts(kind) {
                parent.spawn((
                    Mesh3d(part.mesh.clone()),
                    MeshMaterial3d(part.material.clone()),
                    Transform::from_translation(part.offset).with_rotation(part.rotation),
                    PartBounds(part.bound_radius),
                ));
            }
        })
        .id()
}

/// Full working-set reset on round start: clear every tracked shape, then
/// spawn the configured batch.
fn respawn_all(
    mut commands: Commands,
    shapes_q: Query<Entity, With<Shape>>,
    assets: Res<ShapeAssets>,
    cfg: Res<GameConfig>,
) {
    for e in &shapes_q {
        commands.entity(e).despawn();
    }
    let mut rng = rand::thread_rng();
    for _ in 0..cfg.spawn.count {
        spawn_shape(&mut commands, &assets, &cfg.spawn, &mut rng);
    }
    info!(target: "spawn", "Spawned {} shapes", cfg.spawn.count);
}

/// ScoreRush keeps the live working set constant: one replacement per sort.
fn topup_after_sort(
    mut commands: Commands,
    mut sorted: EventReader<ShapeSorted>,
    assets: Res<ShapeAssets>,
    cfg: Res<GameConfig>,
) {
    if cfg.rules.mode != GameMode::ScoreRush {
        sorted.clear();
        return;
    }
    let mut rng = rand::thread_rng();
    for _ in sorted.read() {
        spawn_shape(&mut commands, &assets, &cfg.spawn, &mut rng);
    }
}

/// Build the fixed bin row from config, in registration order. The `Zones`
/// registry preserves that order for deterministic match tie-breaks.
fn spawn_zones(
    mut commands: Commands,
    mut zones: ResMut<Zones>,
    assets: Res<ShapeAssets>,
    cfg: Res<GameConfig>,
) {
    for spec in &cfg.matching.zones {
        let position = Vec3::new(spec.x, cfg.matching.zone_y, 0.0);
        let entity = commands
            .spawn((
                TargetZone { kind: spec.kind },
                Transform::from_translation(position),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(assets.pedestal_mesh.clone()),
                    MeshMaterial3d(assets.pedestal_material.clone()),
                    Transform::default(),
                ));
                // Tinted top plate stands in for the kind silhouette.
                parent.spawn((
                    Mesh3d(assets.plate_mesh.clone()),
                    MeshMaterial3d(assets.kind_material(spec.kind)),
                    Transform::from_xyz(0.0, 0.61, 0.0),
                ));
            })
            .id();
        zones.0.push(Zone {
            kind: spec.kind,
            position,
            entity,
        });
    }
    info!(target: "spawn", "Registered {} bins", zones.0.len());
}
