//! Journey to Bennu, a terminal arcade shooter.
//!
//! The library holds the deterministic core: entities, the per-tick
//! simulation, pixel-mask collision and a narrow drawing interface.  The
//! binary wires it to a real terminal.

pub mod assets;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod mask;
pub mod render;

pub use assets::{Assets, GameContext, Sprite};
pub use config::GameConfig;
pub use entities::{GameSession, GameStatus};
