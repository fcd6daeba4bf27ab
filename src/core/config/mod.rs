pub mod config;

pub use config::{
    AudioConfig, DragConfig, EffectsConfig, GameConfig, GameMode, MatchConfig, MotionConfig,
    RulesConfig, ShapeSpawnConfig, SpawnRange, WindowConfig, ZoneSpec,
};
