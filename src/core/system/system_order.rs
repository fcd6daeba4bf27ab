use bevy::prelude::*;

/// Pointer input and drag state changes; runs first each frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet;

/// Match resolution and session bookkeeping; after input so a release
/// is evaluated the same frame it happens.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResolveSet;

/// Cosmetic per-frame motion: idle bob, return easing, bin recovery,
/// particle decay. Runs last so it sees this frame's ownership changes.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct AnimateSet;
