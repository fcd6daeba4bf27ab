use bevy::prelude::*;
use serde::Deserialize;

/// Closed set of shape categories; match equality is kind equality.
#[derive(Component, Debug, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Tree,
    Bell,
    Bauble,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Tree, ShapeKind::Bell, ShapeKind::Bauble];
}

/// Marker component identifying a draggable shape root (owns the part children).
#[derive(Component)]
pub struct Shape;

/// Local bounding sphere radius of one sub-part of a compound shape, used for picking.
#[derive(Component, Debug, Deref, Copy, Clone)]
pub struct PartBounds(pub f32);

/// Spawn position recorded at creation; immutable, the return-home target.
#[derive(Component, Debug, Deref, Copy, Clone)]
pub struct SpawnOrigin(pub Vec3);

/// Present while a shape is easing back to its origin after an unmatched release.
#[derive(Component, Debug, Default)]
pub struct Returning;

/// Marker on a target bin's root entity; the bin accepts shapes of `kind`.
#[derive(Component, Debug, Copy, Clone)]
pub struct TargetZone {
    pub kind: ShapeKind,
}

/// One registered bin, in creation order. First-registered wins match ties.
#[derive(Debug, Copy, Clone)]
pub struct Zone {
    pub kind: ShapeKind,
    pub position: Vec3,
    pub entity: Entity,
}

/// Creation-ordered registry of target bins for the running session.
#[derive(Resource, Debug, Default)]
pub struct Zones(pub Vec<Zone>);

/// Short-lived match burst particle; nothing else reads or writes these.
#[derive(Component, Debug)]
pub struct BurstParticle {
    pub velocity: Vec3,
    pub life: f32,
}
