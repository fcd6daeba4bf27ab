pub mod auto_close;
pub mod game;
pub mod hud;
pub mod menu;
pub mod results;
pub mod state;
