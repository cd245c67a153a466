//! Map data structure
//!
//! The typed tile grid for one dungeon level, built from a generator's raw
//! output: corridor classification, enclosed-wall pruning, neighbour
//! queries, and wall sprite selection.

use rand::rngs::StdRng;
use rand::Rng;

use super::generation::RawDungeon;
use super::tile::{Tile, TileType};
use super::{graphics, Position, RoomSet, WorldError};

/// The 8-connected neighbourhood of a cell, each direction bounds-checked
#[derive(Debug)]
pub struct Neighbours<'a> {
    pub n: Option<&'a Tile>,
    pub s: Option<&'a Tile>,
    pub w: Option<&'a Tile>,
    pub e: Option<&'a Tile>,
    pub nw: Option<&'a Tile>,
    pub ne: Option<&'a Tile>,
    pub sw: Option<&'a Tile>,
    pub se: Option<&'a Tile>,
}

impl<'a> Neighbours<'a> {
    /// All eight directions in a fixed order
    pub fn all(&self) -> [Option<&'a Tile>; 8] {
        [
            self.n, self.s, self.w, self.e, self.nw, self.ne, self.sw, self.se,
        ]
    }
}

/// A dungeon floor map
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    rooms: RoomSet,
    /// Center of a randomly chosen room
    pub start_pos: Position,
}

impl Map {
    /// Build a map from the generator's raw output. Every raw cell string is
    /// mapped to a TileType (unrecognized means open floor), corridor flags
    /// are computed against the room set, and fully enclosed walls are
    /// pruned away.
    pub fn from_raw(raw: &RawDungeon, rng: &mut StdRng) -> Result<Self, WorldError> {
        let width = raw.width;
        let height = raw.height;

        if raw.tiles.len() != height as usize
            || raw.tiles.iter().any(|row| row.len() != width as usize)
        {
            return Err(WorldError::DimensionMismatch {
                width,
                height,
                rows: raw.tiles.len(),
                cols: raw.tiles.first().map_or(0, |r| r.len()),
            });
        }

        let rooms = RoomSet::new(raw.rooms.clone());

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let tile_type = TileType::from_raw(&raw.tiles[y as usize][x as usize]);
                tiles.push(Tile::new(tile_type, x, y, &rooms));
            }
        }

        let start_pos = if rooms.is_empty() {
            Position::new(width / 2, height / 2)
        } else {
            let room = rooms.rooms()[rng.gen_range(0..rooms.len())];
            room.center()
        };

        let mut map = Self {
            width,
            height,
            tiles,
            rooms,
            start_pos,
        };
        map.prune_enclosed_walls();

        Ok(map)
    }

    /// Replace every fully enclosed wall with open floor. Enclosure is
    /// evaluated against the original classification: indices are collected
    /// first, then replaced in one batch, so a replacement never changes the
    /// test for a neighbour in the same pass.
    fn prune_enclosed_walls(&mut self) {
        let mut to_reset = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let tile = &self.tiles[self.xy_to_idx(x, y)];
                if tile.tile_type == TileType::Wall && self.is_enclosed(x, y) {
                    to_reset.push((x, y));
                }
            }
        }

        if !to_reset.is_empty() {
            log::debug!("pruning {} enclosed wall tiles", to_reset.len());
        }

        for (x, y) in to_reset {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = Tile::new(TileType::None, x, y, &self.rooms);
        }
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position; any out-of-range coordinate is simply no tile
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// The 8-connected neighbourhood of (x, y)
    pub fn neighbours(&self, x: i32, y: i32) -> Neighbours<'_> {
        Neighbours {
            n: self.tile_at(x, y - 1),
            s: self.tile_at(x, y + 1),
            w: self.tile_at(x - 1, y),
            e: self.tile_at(x + 1, y),
            nw: self.tile_at(x - 1, y - 1),
            ne: self.tile_at(x + 1, y - 1),
            sw: self.tile_at(x - 1, y + 1),
            se: self.tile_at(x + 1, y + 1),
        }
    }

    /// True iff all 8 neighbours are out of the grid or walls. Out-of-grid
    /// counts as wall-like, so border walls of a solid region still qualify.
    pub fn is_enclosed(&self, x: i32, y: i32) -> bool {
        self.neighbours(x, y)
            .all()
            .iter()
            .all(|t| t.map_or(true, |t| t.tile_type == TileType::Wall))
    }

    /// Tileset index for the tile at (x, y), derived from its type and its
    /// wall/door adjacency. Total: every combination resolves to exactly one
    /// index. Corridor walls shift into the corridor tileset bank.
    pub fn sprite_index(&self, x: i32, y: i32) -> u16 {
        let Some(tile) = self.tile_at(x, y) else {
            return 0;
        };

        let modifier = if tile.tile_type == TileType::Wall && tile.corridor {
            graphics::CORRIDOR_OFFSET
        } else {
            0
        };

        self.raw_index(tile) + modifier
    }

    fn raw_index(&self, tile: &Tile) -> u16 {
        use crate::world::graphics::{doors, walls};

        let nb = self.neighbours(tile.x, tile.y);

        let is = |t: Option<&Tile>, ty: TileType| t.map_or(false, |t| t.tile_type == ty);

        let n = is(nb.n, TileType::Wall);
        let s = is(nb.s, TileType::Wall);
        let w = is(nb.w, TileType::Wall);
        let e = is(nb.e, TileType::Wall);

        let w_door = is(nb.w, TileType::Door);
        let e_door = is(nb.e, TileType::Door);

        match tile.tile_type {
            TileType::Wall => match (n, e, s, w) {
                (true, true, true, true) => walls::N_E_S_W,
                (true, true, true, false) => walls::N_E_S,
                (true, false, true, true) => walls::N_S_W,
                (false, true, true, true) => walls::E_S_W,
                (true, true, false, true) => walls::N_E_W,
                (false, true, true, false) => walls::E_S,
                (false, true, false, true) => walls::E_W,
                (false, false, true, true) => walls::S_W,
                (true, false, true, false) => walls::N_S,
                (true, true, false, false) => walls::N_E,
                (true, false, false, true) => walls::N_W,
                (false, false, false, true) if e_door => walls::E_DOOR,
                (false, true, false, false) if w_door => walls::W_DOOR,
                (true, false, false, false) => walls::N,
                (false, false, true, false) => walls::S,
                (false, true, false, false) => walls::E,
                (false, false, false, true) => walls::W,
                (false, false, false, false) => walls::ALONE,
            },
            TileType::Door => {
                if n && s {
                    doors::VERTICAL
                } else {
                    doors::HORIZONTAL
                }
            }
            TileType::None => 0,
        }
    }

    /// Replace a closed door with open floor, preserving its fog state.
    /// Returns true if a door was opened.
    pub fn open_door(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.tile_at(x, y) else {
            return false;
        };
        if tile.tile_type != TileType::Door {
            return false;
        }

        let (seen, desired_alpha, alpha) = (tile.seen, tile.desired_alpha, tile.alpha);
        let idx = self.xy_to_idx(x, y);
        let mut opened = Tile::new(TileType::None, x, y, &self.rooms);
        opened.seen = seen;
        opened.desired_alpha = desired_alpha;
        opened.alpha = alpha;
        self.tiles[idx] = opened;

        log::info!("door opened at ({}, {})", x, y);
        true
    }

    /// Check if a position can be walked onto
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).map_or(false, |t| !t.collides)
    }

    /// Check if a position blocks line of sight
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).map_or(true, |t| t.collides)
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}
