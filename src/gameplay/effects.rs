use bevy::prelude::*;
use rand::Rng;

use crate::core::components::{BurstParticle, ShapeKind};
use crate::core::config::GameConfig;
use crate::core::system::system_order::AnimateSet;
use crate::rendering::shapes::ShapeAssets;

/// Asks for a particle burst at a match point, tinted by the sorted kind.
#[derive(Event, Debug, Clone, Copy)]
pub struct BurstRequest {
    pub position: Vec3,
    pub kind: ShapeKind,
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BurstRequest>().add_systems(
            Update,
            (spawn_bursts, update_particles).chain().in_set(AnimateSet),
        );
    }
}

fn spawn_bursts(
    mut commands: Commands,
    mut requests: EventReader<BurstRequest>,
    assets: Res<ShapeAssets>,
    cfg: Res<GameConfig>,
) {
    let fx = &cfg.effects;
    let mut rng = rand::thread_rng();
    for req in requests.read() {
        for _ in 0..fx.particle_count {
            let offset = Vec3::new(
                (rng.gen::<f32>() - 0.5) * fx.scatter * 2.0,
                (rng.gen::<f32>() - 0.5) * fx.scatter * 2.0,
                0.0,
            );
            let velocity = Vec3::new(
                (rng.gen::<f32>() - 0.5) * fx.speed,
                (rng.gen::<f32>() - 0.5) * fx.speed,
                (rng.gen::<f32>() - 0.5) * fx.speed,
            );
            commands.spawn((
                Mesh3d(assets.burst_mesh.clone()),
                MeshMaterial3d(assets.kind_material(req.kind)),
                Transform::from_translation(req.position + offset),
                BurstParticle {
                    velocity,
                    life: 1.0,
                },
            ));
        }
    }
}

fn update_particles(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut particles_q: Query<(Entity, &mut Transform, &mut BurstParticle)>,
) {
    let fx = &cfg.effects;
    for (entity, mut tf, mut particle) in particles_q.iter_mut() {
        let velocity = particle.velocity;
        tf.translation += velocity;
        tf.scale *= fx.shrink;
        particle.life -= fx.decay;
        if particle.life <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
