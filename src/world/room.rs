//! Rooms and room queries
//!
//! Rectangular rooms placed by the generator, and the RoomSet used to
//! classify wall tiles as room walls or corridor walls.

use serde::{Deserialize, Serialize};

use super::Position;

/// A rectangular room in grid coordinates. Immutable once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Inclusive bounding box of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            top: self.y,
            left: self.x,
            right: self.x + self.width - 1,
            bottom: self.y + self.height - 1,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Is (x, y) inside the room itself?
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let b = self.bounding_box();
        x >= b.left && x <= b.right && y >= b.top && y <= b.bottom
    }

    /// Is (x, y) inside the bounding box expanded by one cell? Walls
    /// immediately bordering a room count as room walls.
    pub fn contains_near(&self, x: i32, y: i32) -> bool {
        let b = self.bounding_box();
        x >= b.left - 1 && x <= b.right + 1 && y >= b.top - 1 && y <= b.bottom + 1
    }

    /// On the one-cell wall ring around the room, but not inside it
    pub fn on_perimeter(&self, x: i32, y: i32) -> bool {
        self.contains_near(x, y) && !self.contains(x, y)
    }

    pub fn intersects(&self, other: &Room) -> bool {
        let a = self.bounding_box();
        let b = other.bounding_box();
        a.left <= b.right && a.right >= b.left && a.top <= b.bottom && a.bottom >= b.top
    }
}

/// The immutable collection of rooms for one level
#[derive(Debug, Clone, Default)]
pub struct RoomSet {
    rooms: Vec<Room>,
}

impl RoomSet {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Does (x, y) fall within any room's expanded bounding box? Rooms may
    /// overlap at their edges; any containing room satisfies the query.
    pub fn contains_near(&self, x: i32, y: i32) -> bool {
        self.rooms.iter().any(|r| r.contains_near(x, y))
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_inclusive() {
        let room = Room::new(2, 3, 4, 5);
        let b = room.bounding_box();
        assert_eq!(b.left, 2);
        assert_eq!(b.top, 3);
        assert_eq!(b.right, 5);
        assert_eq!(b.bottom, 7);
    }

    #[test]
    fn test_contains_near_margin() {
        let rooms = RoomSet::new(vec![Room::new(5, 5, 3, 3)]);
        // Inside
        assert!(rooms.contains_near(6, 6));
        // On the one-cell margin
        assert!(rooms.contains_near(4, 4));
        assert!(rooms.contains_near(8, 8));
        // Two cells out
        assert!(!rooms.contains_near(3, 6));
        assert!(!rooms.contains_near(6, 9));
    }

    #[test]
    fn test_contains_near_any_room() {
        let rooms = RoomSet::new(vec![Room::new(0, 0, 2, 2), Room::new(10, 10, 2, 2)]);
        assert!(rooms.contains_near(1, 1));
        assert!(rooms.contains_near(11, 11));
        assert!(!rooms.contains_near(6, 6));
    }

    #[test]
    fn test_perimeter_ring() {
        let room = Room::new(5, 5, 3, 3);
        assert!(room.on_perimeter(4, 5));
        assert!(room.on_perimeter(8, 8));
        assert!(!room.on_perimeter(5, 5));
        assert!(!room.on_perimeter(3, 5));
    }
}
