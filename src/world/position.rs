//! Grid positions
//!
//! Integer cell coordinates and the distance metrics used by the FOV.

use serde::{Deserialize, Serialize};

/// Position of a cell in the dungeon grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Euclidean distance, used by the fog dropoff table
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev() {
        let a = Position::new(0, 0);
        assert_eq!(a.chebyshev_distance(&Position::new(3, -2)), 3);
        assert_eq!(a.chebyshev_distance(&a), 0);
    }

    #[test]
    fn test_euclidean() {
        let a = Position::new(0, 0);
        assert_eq!(a.euclidean_distance(&Position::new(3, 4)), 5.0);
    }
}
