use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::components::ShapeKind;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Shape Sorter".into(),
            auto_close: 0.0,
        }
    }
}

/// Which round discipline the session runs.
#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Clear every spawned shape; the stopwatch is the result.
    #[default]
    TimeAttack,
    /// Fixed countdown; each sorted shape scores and is replaced.
    ScoreRush,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub mode: GameMode,
    /// Whole seconds on the ScoreRush countdown.
    pub countdown_secs: f32,
    pub score_per_match: u32,
    /// 1 skips player-count setup entirely.
    pub max_players: usize,
}
impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::TimeAttack,
            countdown_secs: 60.0,
            score_per_match: 10,
            max_players: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShapeSpawnConfig {
    pub count: u32,
    pub x_range: SpawnRange<f32>,
    /// Safe band above the bins so fresh shapes never spawn inside one.
    pub y_range: SpawnRange<f32>,
    pub z_range: SpawnRange<f32>,
}
impl Default for ShapeSpawnConfig {
    fn default() -> Self {
        Self {
            count: 10,
            x_range: SpawnRange {
                min: -4.0,
                max: 4.0,
            },
            y_range: SpawnRange { min: 1.0, max: 4.5 },
            z_range: SpawnRange {
                min: -1.0,
                max: 1.0,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    /// Depth offset of the shared drag plane (normal +Z).
    pub plane_depth: f32,
    /// Z the held shape is pinned to so it renders in front of scene clutter.
    pub lift_depth: f32,
    pub spin_x: f32,
    pub spin_z: f32,
}
impl Default for DragConfig {
    fn default() -> Self {
        Self {
            plane_depth: 0.0,
            lift_depth: 2.0,
            spin_x: 0.05,
            spin_z: 0.02,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ZoneSpec {
    pub kind: ShapeKind,
    pub x: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    pub distance_threshold: f32,
    pub zone_y: f32,
    /// Squash applied to a bin on a successful drop, eased back each frame.
    pub squash_xz: f32,
    pub squash_y: f32,
    pub recover_rate: f32,
    pub zones: Vec<ZoneSpec>,
}
impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 1.8,
            zone_y: -3.5,
            squash_xz: 1.1,
            squash_y: 0.9,
            recover_rate: 0.1,
            zones: vec![
                ZoneSpec {
                    kind: ShapeKind::Tree,
                    x: -3.0,
                },
                ZoneSpec {
                    kind: ShapeKind::Bell,
                    x: 0.0,
                },
                ZoneSpec {
                    kind: ShapeKind::Bauble,
                    x: 3.0,
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    pub particle_count: u32,
    /// Life subtracted per frame; particles start at 1.0.
    pub decay: f32,
    /// Per-frame visual scale multiplier.
    pub shrink: f32,
    pub scatter: f32,
    pub speed: f32,
}
impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            particle_count: 12,
            decay: 0.05,
            shrink: 0.9,
            scatter: 0.5,
            speed: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub idle_spin: f32,
    /// Per-frame lerp factor toward the spawn origin while returning.
    pub return_lerp: f32,
    pub return_epsilon: f32,
}
impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            bob_amplitude: 0.005,
            bob_frequency: 2.0,
            idle_spin: 0.01,
            return_lerp: 0.1,
            return_epsilon: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub rules: RulesConfig,
    pub spawn: ShapeSpawnConfig,
    pub drag: DragConfig,
    pub matching: MatchConfig,
    pub effects: EffectsConfig,
    pub motion: MotionConfig,
    pub audio: AudioConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.rules.max_players == 0 {
            w.push("rules.max_players is 0; treated as single player".into());
        }
        if self.rules.mode == GameMode::ScoreRush {
            if self.rules.countdown_secs <= 0.0 {
                w.push("rules.countdown_secs must be > 0 in ScoreRush".into());
            }
            if self.rules.score_per_match == 0 {
                w.push("rules.score_per_match is 0; sorted shapes score nothing".into());
            }
        }
        if self.spawn.count == 0 {
            w.push("spawn.count is 0; rounds complete instantly".into());
        }
        fn check_range(w: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({}) greater than max ({})",
                    r.min, r.max
                ));
            }
        }
        check_range(&mut w, "spawn.x_range", &self.spawn.x_range);
        check_range(&mut w, "spawn.y_range", &self.spawn.y_range);
        check_range(&mut w, "spawn.z_range", &self.spawn.z_range);
        if self.spawn.y_range.min <= self.matching.zone_y {
            w.push(format!(
                "spawn.y_range.min {} reaches below the bin row at y {}; shapes may spawn matched",
                self.spawn.y_range.min, self.matching.zone_y
            ));
        }
        if self.matching.distance_threshold <= 0.0 {
            w.push("matching.distance_threshold must be > 0".into());
        }
        if self.matching.zones.is_empty() {
            w.push("matching.zones is empty; nothing can ever be sorted".into());
        }
        for kind in ShapeKind::ALL {
            if !self.matching.zones.iter().any(|z| z.kind == kind) {
                w.push(format!(
                    "matching.zones has no bin for {kind:?}; those shapes are unsortable"
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.matching.recover_rate) {
            w.push(format!(
                "matching.recover_rate {} outside 0..1",
                self.matching.recover_rate
            ));
        }
        if self.effects.particle_count > 10_000 {
            w.push(format!(
                "effects.particle_count {} very high; bursts may stall the frame",
                self.effects.particle_count
            ));
        }
        if self.effects.decay <= 0.0 {
            w.push("effects.decay must be > 0 or particles never die".into());
        }
        if !(0.0..1.0).contains(&self.effects.shrink) {
            w.push(format!(
                "effects.shrink {} outside 0..1; particles will not shrink",
                self.effects.shrink
            ));
        }
        if !(0.0..=1.0).contains(&self.motion.return_lerp) {
            w.push(format!(
                "motion.return_lerp {} outside 0..1",
                self.motion.return_lerp
            ));
        } else if self.motion.return_lerp == 0.0 {
            w.push("motion.return_lerp is 0; released shapes never get home".into());
        }
        if self.motion.return_epsilon <= 0.0 {
            w.push("motion.return_epsilon must be > 0".into());
        }
        w
    }
}
