//! Field of view calculation
//!
//! Recursive symmetric shadowcasting over 8 octants with a circular radius,
//! decoupled from the map through an occlusion predicate and a visible-cell
//! sink.

use super::Position;

/// Compute the visible cells around `origin` within `radius`.
///
/// `occludes(x, y)` must return true for cells that block sight (treat
/// out-of-grid as blocking); `on_visible(x, y)` is invoked once per visible
/// cell, origin included. Coordinates passed to `on_visible` may lie outside
/// the grid when the radius overhangs an edge; the caller is expected to
/// bounds-check.
pub fn compute<F, G>(origin: Position, radius: i32, occludes: F, mut on_visible: G)
where
    F: Fn(i32, i32) -> bool,
    G: FnMut(i32, i32),
{
    on_visible(origin.x, origin.y);

    for octant in 0..8 {
        cast_light(origin, radius, 1, 1.0, 0.0, octant, &occludes, &mut on_visible);
    }
}

/// Recursive shadowcasting for a single octant
fn cast_light<F, G>(
    origin: Position,
    radius: i32,
    row: i32,
    mut start_slope: f64,
    end_slope: f64,
    octant: u8,
    occludes: &F,
    on_visible: &mut G,
) where
    F: Fn(i32, i32) -> bool,
    G: FnMut(i32, i32),
{
    if start_slope < end_slope {
        return;
    }

    let mut next_start_slope = start_slope;

    for j in row..=radius {
        let mut blocked = false;

        let dy = -j;
        for dx in dy..=0 {
            let (map_x, map_y) = transform_octant(dx, dy, octant);
            let cur_x = origin.x + map_x;
            let cur_y = origin.y + map_y;

            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start_slope < right_slope {
                continue;
            }
            if end_slope > left_slope {
                break;
            }

            // Circular radius
            if dx * dx + dy * dy <= radius * radius {
                on_visible(cur_x, cur_y);
            }

            if blocked {
                if occludes(cur_x, cur_y) {
                    next_start_slope = right_slope;
                } else {
                    blocked = false;
                    start_slope = next_start_slope;
                }
            } else if occludes(cur_x, cur_y) && j < radius {
                blocked = true;
                cast_light(
                    origin,
                    radius,
                    j + 1,
                    start_slope,
                    left_slope,
                    octant,
                    occludes,
                    on_visible,
                );
                next_start_slope = right_slope;
            }
        }

        if blocked {
            break;
        }
    }
}

/// Transform coordinates based on octant
fn transform_octant(col: i32, row: i32, octant: u8) -> (i32, i32) {
    match octant {
        0 => (col, row),
        1 => (row, col),
        2 => (row, -col),
        3 => (col, -row),
        4 => (-col, -row),
        5 => (-row, -col),
        6 => (-row, col),
        7 => (-col, row),
        _ => (col, row),
    }
}
