//! Fog-of-war layer
//!
//! Maintains each tile's target opacity (lit, dimmed-but-remembered, or
//! never seen) and blends the displayed opacity toward it over time. The
//! expensive shadow-cast only reruns when the observer changes grid cell;
//! the per-frame blend pass is a linear scan over the camera window.

use super::{fov, Map, Position};

/// Default light radius around the observer
pub const FOV_RADIUS: i32 = 7;

/// Opacity of previously seen tiles outside the current light
const FOG_ALPHA: f32 = 0.8;

/// Opacity by distance from the light's edge inward; distances past the
/// table are fully lit
const LIGHT_DROPOFF: [f32; 4] = [0.7, 0.6, 0.3, 0.1];

/// Fade rate for the per-frame blend
const ALPHA_PER_MS: f32 = 0.002;

/// A camera window in grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Incremental fog-of-war over one level's map
#[derive(Debug)]
pub struct VisibilityField {
    /// Observer cell of the last shadow-cast; None forces a recompute
    last_pos: Option<Position>,
    radius: i32,
    /// How many shadow-casts have run (instrumentation)
    recomputes: u64,
}

impl VisibilityField {
    pub fn new() -> Self {
        Self::with_radius(FOV_RADIUS)
    }

    pub fn with_radius(radius: i32) -> Self {
        Self {
            last_pos: None,
            radius,
            recomputes: 0,
        }
    }

    /// Per-frame update: recompute visibility if the observer moved to a new
    /// grid cell, then blend displayed opacity toward the target within the
    /// camera bounds.
    pub fn update(&mut self, map: &mut Map, pos: Position, bounds: Bounds, delta_ms: f32) {
        if self.last_pos != Some(pos) {
            self.recompute(map, pos);
            self.last_pos = Some(pos);
        }

        let step = ALPHA_PER_MS * delta_ms;
        for y in bounds.y..bounds.y + bounds.height {
            for x in bounds.x..bounds.x + bounds.width {
                let Some(tile) = map.tile_at_mut(x, y) else {
                    continue;
                };
                if tile.alpha > tile.desired_alpha {
                    tile.alpha = (tile.alpha - step).max(tile.desired_alpha);
                } else if tile.alpha < tile.desired_alpha {
                    tile.alpha = (tile.alpha + step).min(tile.desired_alpha);
                }
            }
        }
    }

    /// Force the next update to rerun the shadow-cast, e.g. after a door
    /// opens and the occluder set changes.
    pub fn invalidate(&mut self) {
        self.last_pos = None;
    }

    /// Number of shadow-cast recomputations so far
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    fn recompute(&mut self, map: &mut Map, pos: Position) {
        self.recomputes += 1;
        log::trace!("fov recompute #{} at ({}, {})", self.recomputes, pos.x, pos.y);

        // Everything explored falls back to dim fog; the shadow-cast below
        // re-lights whatever is visible from the new cell.
        for tile in map.tiles_mut() {
            if tile.seen {
                tile.desired_alpha = FOG_ALPHA;
            }
        }

        let mut visible = Vec::new();
        fov::compute(
            pos,
            self.radius,
            |x, y| map.is_opaque(x, y),
            |x, y| visible.push(Position::new(x, y)),
        );

        for cell in visible {
            let Some(tile) = map.tile_at_mut(cell.x, cell.y) else {
                continue;
            };
            let distance = pos.euclidean_distance(&cell).floor() as i32;
            let rolloff_idx = if distance <= self.radius {
                (self.radius - distance) as usize
            } else {
                0
            };
            tile.desired_alpha = LIGHT_DROPOFF.get(rolloff_idx).copied().unwrap_or(0.0);
            tile.seen = true;
        }
    }
}

impl Default for VisibilityField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::RawDungeon;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// An open width x height map, optionally with walls at given cells
    fn open_map(width: i32, height: i32, walls: &[(i32, i32)]) -> Map {
        let tiles = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if walls.contains(&(x, y)) {
                            "wall".to_string()
                        } else {
                            "floor".to_string()
                        }
                    })
                    .collect()
            })
            .collect();
        let raw = RawDungeon {
            width,
            height,
            rooms: vec![],
            tiles,
        };
        Map::from_raw(&raw, &mut StdRng::seed_from_u64(1)).unwrap()
    }

    fn full_bounds(map: &Map) -> Bounds {
        Bounds::new(0, 0, map.width, map.height)
    }

    #[test]
    fn test_dropoff_follows_table() {
        let mut map = open_map(20, 20, &[]);
        let mut field = VisibilityField::new();
        let observer = Position::new(10, 10);
        let bounds = full_bounds(&map);
        field.update(&mut map, observer, bounds, 16.0);

        // Every cell within the circular radius is seen
        for y in 0..20 {
            for x in 0..20 {
                let dx = x - observer.x;
                let dy = y - observer.y;
                let tile = map.tile_at(x, y).unwrap();
                if dx * dx + dy * dy <= FOV_RADIUS * FOV_RADIUS {
                    assert!(tile.seen, "({}, {}) not seen", x, y);
                }
            }
        }

        // Cells whose floored distance is 7 but whose true distance exceeds
        // the radius sit outside the circular gate and stay dark.
        assert!(!map.tile_at(17, 13).unwrap().seen); // dist² = 58
        assert_eq!(map.tile_at(17, 13).unwrap().desired_alpha, 1.0);

        // rolloff_idx = radius - distance, clamped to the dropoff table;
        // distances past the table are fully lit.
        assert_eq!(map.tile_at(10, 3).unwrap().desired_alpha, 0.7); // distance 7
        assert_eq!(map.tile_at(10, 4).unwrap().desired_alpha, 0.6); // distance 6
        assert_eq!(map.tile_at(10, 5).unwrap().desired_alpha, 0.3); // distance 5
        assert_eq!(map.tile_at(10, 6).unwrap().desired_alpha, 0.1); // distance 4
        assert_eq!(map.tile_at(10, 7).unwrap().desired_alpha, 0.0); // distance 3
        assert_eq!(map.tile_at(10, 10).unwrap().desired_alpha, 0.0); // observer
    }

    #[test]
    fn test_never_seen_tiles_stay_opaque() {
        let mut map = open_map(40, 10, &[]);
        let mut field = VisibilityField::new();
        let bounds = full_bounds(&map);
        field.update(&mut map, Position::new(5, 5), bounds, 16.0);

        let far = map.tile_at(30, 5).unwrap();
        assert!(!far.seen);
        assert_eq!(far.desired_alpha, 1.0);
    }

    #[test]
    fn test_occluder_blocks_sight() {
        // Wall directly between observer and target on the same row
        let mut map = open_map(20, 9, &[(7, 4)]);
        let mut field = VisibilityField::new();
        let bounds = full_bounds(&map);
        field.update(&mut map, Position::new(5, 4), bounds, 16.0);

        assert!(map.tile_at(7, 4).unwrap().seen);
        assert!(!map.tile_at(8, 4).unwrap().seen);
        assert!(!map.tile_at(9, 4).unwrap().seen);
    }

    #[test]
    fn test_seen_is_monotonic() {
        let mut map = open_map(30, 10, &[]);
        let mut field = VisibilityField::new();
        let bounds = full_bounds(&map);

        field.update(&mut map, Position::new(5, 5), bounds, 16.0);
        assert!(map.tile_at(5, 5).unwrap().seen);

        // Walk the observer far away; the old cells dim but stay seen.
        for x in 6..25 {
            field.update(&mut map, Position::new(x, 5), bounds, 16.0);
        }
        let old = map.tile_at(5, 5).unwrap();
        assert!(old.seen);
        assert_eq!(old.desired_alpha, 0.8);
    }

    #[test]
    fn test_recompute_gated_on_cell_change() {
        let mut map = open_map(20, 20, &[]);
        let mut field = VisibilityField::new();
        let bounds = full_bounds(&map);

        field.update(&mut map, Position::new(10, 10), bounds, 16.0);
        assert_eq!(field.recomputes(), 1);

        // Same cell: blend only
        field.update(&mut map, Position::new(10, 10), bounds, 16.0);
        field.update(&mut map, Position::new(10, 10), bounds, 16.0);
        assert_eq!(field.recomputes(), 1);

        field.update(&mut map, Position::new(10, 11), bounds, 16.0);
        assert_eq!(field.recomputes(), 2);

        field.invalidate();
        field.update(&mut map, Position::new(10, 11), bounds, 16.0);
        assert_eq!(field.recomputes(), 3);
    }

    #[test]
    fn test_blend_converges_without_overshoot() {
        let mut map = open_map(20, 20, &[]);
        let mut field = VisibilityField::new();
        let bounds = full_bounds(&map);
        let observer = Position::new(10, 10);

        field.update(&mut map, observer, bounds, 0.0);
        // Observer cell: alpha starts at 1.0, target 0.0
        let mut last = map.tile_at(10, 10).unwrap().alpha;
        assert_eq!(last, 1.0);

        for _ in 0..100 {
            field.update(&mut map, observer, bounds, 16.0);
            let alpha = map.tile_at(10, 10).unwrap().alpha;
            assert!(alpha <= last, "alpha must move down toward the target");
            assert!(alpha >= 0.0, "alpha must not overshoot the target");
            last = alpha;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_blend_skips_out_of_range_bounds() {
        let mut map = open_map(10, 10, &[]);
        let mut field = VisibilityField::new();
        // Bounds hang off every edge of the grid; must simply be skipped.
        let bounds = Bounds::new(-5, -5, 20, 20);
        field.update(&mut map, Position::new(5, 5), bounds, 16.0);
        assert!(map.tile_at(5, 5).unwrap().seen);
    }
}
