//! Tileset indices
//!
//! Sprite indices into the environment tilesheet (16 columns wide). Room
//! wall variants occupy the left half of their rows; the matching corridor
//! variants sit `CORRIDOR_OFFSET` to the right, so the two banks never
//! collide.

/// Offset applied to wall indices for corridor walls
pub const CORRIDOR_OFFSET: u16 = 8;

/// Wall sprite indices, one per adjacency pattern
pub mod walls {
    // 4-way and 3-way junctions, then 2-way corners/straights (row 0)
    pub const N_E_S_W: u16 = 0;
    pub const N_E_S: u16 = 1;
    pub const N_S_W: u16 = 2;
    pub const E_S_W: u16 = 3;
    pub const N_E_W: u16 = 4;
    pub const E_S: u16 = 5;
    pub const E_W: u16 = 6;
    pub const S_W: u16 = 7;

    // Remaining 2-ways, door-adjacent and single-direction walls (row 2)
    pub const N_S: u16 = 32;
    pub const N_E: u16 = 33;
    pub const N_W: u16 = 34;
    pub const E_DOOR: u16 = 35;
    pub const W_DOOR: u16 = 36;
    pub const N: u16 = 37;
    pub const S: u16 = 38;
    pub const E: u16 = 39;

    // Row 4
    pub const W: u16 = 64;
    pub const ALONE: u16 = 65;
}

/// Door sprite indices
pub mod doors {
    pub const HORIZONTAL: u16 = 96;
    pub const VERTICAL: u16 = 97;
}

/// Terminal glyph for a wall or door sprite index. Corridor variants share
/// the room variant's glyph; the renderer distinguishes them by color.
pub fn glyph(index: u16) -> char {
    // Fold the corridor bank back onto the room bank
    let base = match index {
        8..=15 | 40..=47 | 72..=73 => index - CORRIDOR_OFFSET,
        _ => index,
    };

    match base {
        walls::N_E_S_W => '┼',
        walls::N_E_S => '├',
        walls::N_S_W => '┤',
        walls::E_S_W => '┬',
        walls::N_E_W => '┴',
        walls::E_S => '┌',
        walls::E_W => '─',
        walls::S_W => '┐',
        walls::N_S => '│',
        walls::N_E => '└',
        walls::N_W => '┘',
        walls::E_DOOR | walls::W_DOOR => '─',
        walls::N | walls::S => '│',
        walls::E | walls::W => '─',
        walls::ALONE => '■',
        doors::HORIZONTAL | doors::VERTICAL => '+',
        _ => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_bank_disjoint() {
        let bases = [
            walls::N_E_S_W,
            walls::N_E_S,
            walls::N_S_W,
            walls::E_S_W,
            walls::N_E_W,
            walls::E_S,
            walls::E_W,
            walls::S_W,
            walls::N_S,
            walls::N_E,
            walls::N_W,
            walls::E_DOOR,
            walls::W_DOOR,
            walls::N,
            walls::S,
            walls::E,
            walls::W,
            walls::ALONE,
        ];
        for base in bases {
            let corridor = base + CORRIDOR_OFFSET;
            assert!(
                !bases.contains(&corridor),
                "corridor variant {} collides with a room variant",
                corridor
            );
        }
    }

    #[test]
    fn test_corridor_glyph_matches_room_glyph() {
        assert_eq!(glyph(walls::N_S), glyph(walls::N_S + CORRIDOR_OFFSET));
        assert_eq!(glyph(walls::E_S), glyph(walls::E_S + CORRIDOR_OFFSET));
        assert_eq!(glyph(walls::ALONE), glyph(walls::ALONE + CORRIDOR_OFFSET));
    }
}
