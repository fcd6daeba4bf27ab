pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::app::state::AppState;
pub use crate::core::components::{Shape, ShapeKind, TargetZone, Zone, Zones};
pub use crate::core::config::{GameConfig, GameMode};
