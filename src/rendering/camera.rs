use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

/// Deep pine green backdrop; fog fades the scene floor into it.
const BACKGROUND: Color = Color::srgb(0.102, 0.184, 0.137);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, setup_scene);
    }
}

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45f32.to_radians(),
            ..default()
        }),
        DistanceFog {
            color: BACKGROUND,
            falloff: FogFalloff::Linear {
                start: 20.0,
                end: 50.0,
            },
            ..default()
        },
        Transform::from_xyz(0.0, 8.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 12.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
