//! Room and corridor dungeon generator
//!
//! Classic roguelike layout: random non-overlapping rooms joined by
//! L-shaped corridors, with doors where a corridor crosses a room's wall
//! ring. Output is the raw per-cell type grid the map constructor consumes.

use rand::rngs::StdRng;
use rand::Rng;

use crate::world::{Room, WorldError};

pub const RAW_WALL: &str = "wall";
pub const RAW_DOOR: &str = "door";
pub const RAW_FLOOR: &str = "floor";

const MIN_MAP_SIZE: i32 = 16;
const MIN_ROOM_SIZE: i32 = 4;
const MAX_ROOM_SIZE: i32 = 8;
const MAX_ROOMS: usize = 16;
const PLACEMENT_ATTEMPTS: usize = 100;

/// Raw generator output: the room list plus a row-major grid of per-cell
/// type strings (`"wall" | "door" | "floor"`).
#[derive(Debug, Clone)]
pub struct RawDungeon {
    pub width: i32,
    pub height: i32,
    pub rooms: Vec<Room>,
    /// Indexed `tiles[y][x]`
    pub tiles: Vec<Vec<String>>,
}

impl RawDungeon {
    fn solid(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rooms: Vec::new(),
            tiles: vec![vec![RAW_WALL.to_string(); width as usize]; height as usize],
        }
    }

    fn set(&mut self, x: i32, y: i32, kind: &str) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.tiles[y as usize][x as usize] = kind.to_string();
        }
    }

    fn kind_at(&self, x: i32, y: i32) -> &str {
        &self.tiles[y as usize][x as usize]
    }
}

/// Generate a dungeon layout with rooms and corridors
pub fn generate_dungeon(
    rng: &mut StdRng,
    width: i32,
    height: i32,
) -> Result<RawDungeon, WorldError> {
    if width < MIN_MAP_SIZE || height < MIN_MAP_SIZE {
        return Err(WorldError::MapTooSmall {
            width,
            height,
            min: MIN_MAP_SIZE,
        });
    }

    let mut dungeon = RawDungeon::solid(width, height);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..PLACEMENT_ATTEMPTS {
        if rooms.len() >= MAX_ROOMS {
            break;
        }

        let w = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
        let h = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
        let x = rng.gen_range(1..width - w - 1);
        let y = rng.gen_range(1..height - h - 1);

        let new_room = Room::new(x, y, w, h);

        // Reject anything touching an existing room's wall ring, so every
        // room keeps a full ring of its own.
        let overlaps = rooms.iter().any(|r| {
            Room::new(r.x - 1, r.y - 1, r.width + 2, r.height + 2).intersects(&new_room)
        });
        if overlaps {
            continue;
        }

        carve_room(&mut dungeon, &new_room);

        if let Some(prev) = rooms.last() {
            let prev_center = prev.center();
            let new_center = new_room.center();

            if rng.gen_bool(0.5) {
                carve_h_corridor(&mut dungeon, &rooms, prev_center.x, new_center.x, prev_center.y);
                carve_v_corridor(&mut dungeon, &rooms, prev_center.y, new_center.y, new_center.x);
            } else {
                carve_v_corridor(&mut dungeon, &rooms, prev_center.y, new_center.y, prev_center.x);
                carve_h_corridor(&mut dungeon, &rooms, prev_center.x, new_center.x, new_center.y);
            }
        }

        rooms.push(new_room);
    }

    log::info!(
        "generated {}x{} dungeon with {} rooms",
        width,
        height,
        rooms.len()
    );

    dungeon.rooms = rooms;
    Ok(dungeon)
}

/// Fixed debug layout: one room spanning the whole grid, walled perimeter,
/// open interior. Used when procedural generation is disabled.
pub fn debug_dungeon(width: i32, height: i32) -> RawDungeon {
    let mut dungeon = RawDungeon::solid(width, height);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            dungeon.set(x, y, RAW_FLOOR);
        }
    }
    dungeon.rooms = vec![Room::new(0, 0, width, height)];
    dungeon
}

fn carve_room(dungeon: &mut RawDungeon, room: &Room) {
    let b = room.bounding_box();
    for y in b.top..=b.bottom {
        for x in b.left..=b.right {
            dungeon.set(x, y, RAW_FLOOR);
        }
    }
}

/// Carve one corridor cell. A wall cell on an earlier room's perimeter ring
/// becomes a door; everything else becomes floor.
fn carve_cell(dungeon: &mut RawDungeon, rooms: &[Room], x: i32, y: i32) {
    let on_ring = rooms.iter().any(|r| r.on_perimeter(x, y));
    if on_ring && dungeon.kind_at(x, y) == RAW_WALL {
        dungeon.set(x, y, RAW_DOOR);
    } else if dungeon.kind_at(x, y) != RAW_DOOR {
        dungeon.set(x, y, RAW_FLOOR);
    }
}

fn carve_h_corridor(dungeon: &mut RawDungeon, rooms: &[Room], x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        carve_cell(dungeon, rooms, x, y);
    }
}

fn carve_v_corridor(dungeon: &mut RawDungeon, rooms: &[Room], y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        carve_cell(dungeon, rooms, x, y);
    }
}
