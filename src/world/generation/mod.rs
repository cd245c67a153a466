//! Procedural generation
//!
//! Produces the raw room-and-corridor layout the map is built from.

mod rooms;

pub use rooms::{debug_dungeon, generate_dungeon, RawDungeon, RAW_DOOR, RAW_FLOOR, RAW_WALL};
