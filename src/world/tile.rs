//! Tile definitions
//!
//! A single grid cell: its type, occlusion flag, corridor classification,
//! and the fog state mutated by the visibility field.

use serde::{Deserialize, Serialize};

use super::RoomSet;

/// Types of tiles in the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Open floor (or empty space)
    None,
    Wall,
    Door,
}

impl TileType {
    /// Map a generator's raw per-cell type string to a TileType. Total over
    /// all inputs: anything unrecognized is open floor.
    pub fn from_raw(raw: &str) -> TileType {
        match raw {
            "wall" => TileType::Wall,
            "door" => TileType::Door,
            _ => TileType::None,
        }
    }

    /// Walls and closed doors block movement and line of sight
    pub fn collides(self) -> bool {
        !matches!(self, TileType::None)
    }
}

/// A single tile in the map
///
/// `tile_type`, `collides` and `corridor` are fixed at construction; only
/// the fog state (`seen`, `desired_alpha`, `alpha`) mutates afterwards.
#[derive(Debug, Clone)]
pub struct Tile {
    pub tile_type: TileType,
    pub x: i32,
    pub y: i32,
    /// Blocks movement and sight
    pub collides: bool,
    /// Not within one cell of any room: corridor walls render with a
    /// distinct tileset bank
    pub corridor: bool,
    /// Set the first time the visibility field lights the tile; never reset
    pub seen: bool,
    /// Fog target opacity in [0, 1], owned by the visibility field
    pub desired_alpha: f32,
    /// Displayed opacity, blended toward `desired_alpha` each frame
    pub alpha: f32,
}

impl Tile {
    pub fn new(tile_type: TileType, x: i32, y: i32, rooms: &RoomSet) -> Self {
        Self {
            tile_type,
            x,
            y,
            collides: tile_type.collides(),
            corridor: !rooms.contains_near(x, y),
            seen: false,
            desired_alpha: 1.0,
            alpha: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Room;

    #[test]
    fn test_from_raw_total() {
        assert_eq!(TileType::from_raw("wall"), TileType::Wall);
        assert_eq!(TileType::from_raw("door"), TileType::Door);
        assert_eq!(TileType::from_raw("floor"), TileType::None);
        assert_eq!(TileType::from_raw(""), TileType::None);
        assert_eq!(TileType::from_raw("lava"), TileType::None);
    }

    #[test]
    fn test_collides_from_type() {
        let rooms = RoomSet::default();
        assert!(Tile::new(TileType::Wall, 0, 0, &rooms).collides);
        assert!(Tile::new(TileType::Door, 0, 0, &rooms).collides);
        assert!(!Tile::new(TileType::None, 0, 0, &rooms).collides);
    }

    #[test]
    fn test_corridor_classification() {
        let rooms = RoomSet::new(vec![Room::new(2, 2, 3, 3)]);
        // Inside the room and on its margin: not corridor
        assert!(!Tile::new(TileType::Wall, 3, 3, &rooms).corridor);
        assert!(!Tile::new(TileType::Wall, 1, 1, &rooms).corridor);
        // Far from any room: corridor
        assert!(Tile::new(TileType::Wall, 8, 8, &rooms).corridor);
    }

    #[test]
    fn test_fog_state_initial() {
        let rooms = RoomSet::default();
        let tile = Tile::new(TileType::None, 4, 4, &rooms);
        assert!(!tile.seen);
        assert_eq!(tile.desired_alpha, 1.0);
        assert_eq!(tile.alpha, 1.0);
    }
}
