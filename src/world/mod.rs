//! World module
//!
//! The dungeon map core: rooms, typed tiles, procedural generation,
//! shadow-cast field of view, and the fog-of-war layer.

pub mod fov;
pub mod generation;
pub mod graphics;
pub mod map;
pub mod position;
pub mod room;
pub mod tile;
pub mod visibility;

pub use map::{Map, Neighbours};
pub use position::Position;
pub use room::{BoundingBox, Room, RoomSet};
pub use tile::{Tile, TileType};
pub use visibility::{Bounds, VisibilityField, FOV_RADIUS};

use thiserror::Error;

/// Errors from map construction and generation
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("dungeon must be at least {min}x{min} tiles, got {width}x{height}")]
    MapTooSmall { width: i32, height: i32, min: i32 },

    #[error("raw tile grid is {cols}x{rows}, expected {width}x{height}")]
    DimensionMismatch {
        width: i32,
        height: i32,
        rows: usize,
        cols: usize,
    },
}
