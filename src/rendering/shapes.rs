use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use crate::core::components::ShapeKind;

/// Presentation colour associated with each shape kind; also tints the bin
/// plates and the match burst particles.
pub fn kind_color(kind: ShapeKind) -> Color {
    match kind {
        ShapeKind::Tree => Color::srgb_u8(0x27, 0xAE, 0x60),
        ShapeKind::Bell => Color::srgb_u8(0xF1, 0xC4, 0x0F),
        ShapeKind::Bauble => Color::srgb_u8(0xD4, 0x2E, 0x2E),
    }
}

/// One renderable sub-part of a compound shape, with the bounding sphere
/// picking uses.
pub struct PartSpec {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub offset: Vec3,
    pub rotation: Quat,
    pub bound_radius: f32,
}

/// Prepared mesh/material handles for everything the game spawns.
#[derive(Resource)]
pub struct ShapeAssets {
    parts: HashMap<ShapeKind, Vec<PartSpec>>,
    kind_materials: HashMap<ShapeKind, Handle<StandardMaterial>>,
    pub pedestal_mesh: Handle<Mesh>,
    pub pedestal_material: Handle<StandardMaterial>,
    pub plate_mesh: Handle<Mesh>,
    pub burst_mesh: Handle<Mesh>,
}

impl ShapeAssets {
    pub fn parts(&self, kind: ShapeKind) -> &[PartSpec] {
        self.parts.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kind_material(&self, kind: ShapeKind) -> Handle<StandardMaterial> {
        self.kind_materials
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

pub struct ShapeScenePlugin;

impl Plugin for ShapeScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, build_shape_assets);
    }
}

struct Palette {
    red: Handle<StandardMaterial>,
    gold: Handle<StandardMaterial>,
    green: Handle<StandardMaterial>,
    brown: Handle<StandardMaterial>,
    white: Handle<StandardMaterial>,
}

fn part(
    mesh: Handle<Mesh>,
    material: &Handle<StandardMaterial>,
    offset: Vec3,
    rotation: Quat,
    bound_radius: f32,
) -> PartSpec {
    PartSpec {
        mesh,
        material: material.clone(),
        offset,
        rotation,
        bound_radius,
    }
}

/// Procedural compound geometry for the three kinds, after the source
/// ornaments: a trunk-and-cones tree, a flared bell, a capped bauble.
pub fn build_shape_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let surface = |color: Color, roughness: f32, metallic: f32| StandardMaterial {
        base_color: color,
        perceptual_roughness: roughness,
        metallic,
        ..default()
    };
    let palette = Palette {
        red: materials.add(surface(kind_color(ShapeKind::Bauble), 0.6, 0.1)),
        gold: materials.add(surface(kind_color(ShapeKind::Bell), 0.4, 0.6)),
        green: materials.add(surface(kind_color(ShapeKind::Tree), 0.8, 0.0)),
        brown: materials.add(surface(Color::srgb_u8(0x8B, 0x45, 0x13), 0.9, 0.0)),
        white: materials.add(surface(Color::srgb_u8(0xFD, 0xF8, 0xF5), 1.0, 0.0)),
    };

    let upright_ring = Quat::from_rotation_x(FRAC_PI_2);

    let tree = vec![
        part(
            meshes.add(Cylinder::new(0.15, 0.6)),
            &palette.brown,
            Vec3::new(0.0, -0.7, 0.0),
            Quat::IDENTITY,
            0.35,
        ),
        part(
            meshes.add(Cone {
                radius: 0.7,
                height: 0.8,
            }),
            &palette.green,
            Vec3::new(0.0, -0.3, 0.0),
            Quat::IDENTITY,
            0.7,
        ),
        part(
            meshes.add(Cone {
                radius: 0.55,
                height: 0.7,
            }),
            &palette.green,
            Vec3::new(0.0, 0.1, 0.0),
            Quat::IDENTITY,
            0.55,
        ),
        part(
            meshes.add(Cone {
                radius: 0.35,
                height: 0.6,
            }),
            &palette.green,
            Vec3::new(0.0, 0.5, 0.0),
            Quat::IDENTITY,
            0.4,
        ),
        part(
            meshes.add(Sphere::new(0.12)),
            &palette.gold,
            Vec3::new(0.0, 0.85, 0.0),
            Quat::IDENTITY,
            0.12,
        ),
    ];

    let bell = vec![
        part(
            meshes.add(ConicalFrustum {
                radius_top: 0.15,
                radius_bottom: 0.6,
                height: 0.8,
            }),
            &palette.gold,
            Vec3::ZERO,
            Quat::IDENTITY,
            0.6,
        ),
        part(
            meshes.add(Torus {
                minor_radius: 0.08,
                major_radius: 0.6,
            }),
            &palette.gold,
            Vec3::new(0.0, -0.4, 0.0),
            Quat::IDENTITY,
            0.68,
        ),
        part(
            meshes.add(Sphere::new(0.2)),
            &palette.gold,
            Vec3::new(0.0, -0.4, 0.0),
            Quat::IDENTITY,
            0.2,
        ),
        part(
            meshes.add(Torus {
                minor_radius: 0.04,
                major_radius: 0.1,
            }),
            &palette.gold,
            Vec3::new(0.0, 0.45, 0.0),
            upright_ring,
            0.14,
        ),
    ];

    let bauble = vec![
        part(
            meshes.add(Sphere::new(0.6)),
            &palette.red,
            Vec3::ZERO,
            Quat::IDENTITY,
            0.6,
        ),
        part(
            meshes.add(Cylinder::new(0.15, 0.2)),
            &palette.gold,
            Vec3::new(0.0, 0.6, 0.0),
            Quat::IDENTITY,
            0.2,
        ),
        part(
            meshes.add(Torus {
                minor_radius: 0.02,
                major_radius: 0.1,
            }),
            &palette.gold,
            Vec3::new(0.0, 0.7, 0.0),
            upright_ring,
            0.12,
        ),
    ];

    let mut parts = HashMap::new();
    parts.insert(ShapeKind::Tree, tree);
    parts.insert(ShapeKind::Bell, bell);
    parts.insert(ShapeKind::Bauble, bauble);

    let mut kind_materials = HashMap::new();
    for kind in ShapeKind::ALL {
        kind_materials.insert(
            kind,
            materials.add(StandardMaterial {
                base_color: kind_color(kind),
                unlit: true,
                ..default()
            }),
        );
    }

    commands.insert_resource(ShapeAssets {
        parts,
        kind_materials,
        pedestal_mesh: meshes.add(Cuboid::new(2.4, 1.2, 2.4)),
        pedestal_material: palette.white.clone(),
        plate_mesh: meshes.add(Cuboid::new(1.2, 0.04, 1.2)),
        burst_mesh: meshes.add(Cuboid::new(0.12, 0.12, 0.12)),
    });
}
