//! Vaultcrawl - a real-time terminal dungeon crawler
//!
//! Procedurally generated levels with contextual wall classification,
//! and a fog-of-war engine driven by symmetric shadowcasting.

pub mod config;
pub mod game;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use game::{Game, GameState};
pub use world::{Map, Position, Tile, TileType, VisibilityField};
