//! Game state
//!
//! Owns the current level's map and fog-of-war, the player position, and
//! the stairs that transition to the next level. Each level transition
//! discards the old map and visibility field wholesale.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::Config;
use crate::world::generation::{debug_dungeon, generate_dungeon};
use crate::world::{Bounds, Map, Position, VisibilityField, WorldError};

/// Fixed starting cell when debug mode replaces generation
const DEBUG_START: Position = Position { x: 5, y: 15 };

/// Preferred minimum distance between the start and the stairs
const MIN_STAIRS_DISTANCE: i32 = 10;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Quit,
}

/// The running game
pub struct Game {
    config: Config,
    state: GameState,
    map: Map,
    /// None in debug mode: everything renders fully lit
    fov: Option<VisibilityField>,
    player_pos: Position,
    stairs_pos: Position,
    level: u32,
    rng: StdRng,
    messages: Vec<String>,
}

impl Game {
    pub fn new(config: Config) -> Result<Self, WorldError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic construction for tests
    pub fn with_rng(config: Config, mut rng: StdRng) -> Result<Self, WorldError> {
        let (map, player_pos, stairs_pos) = Self::build_level(&config, &mut rng, 1)?;
        let fov = if config.enable_debug_mode {
            None
        } else {
            Some(VisibilityField::with_radius(config.fov_radius))
        };

        Ok(Self {
            config,
            state: GameState::Playing,
            map,
            fov,
            player_pos,
            stairs_pos,
            level: 1,
            rng,
            messages: vec!["You descend into the vault.".to_string()],
        })
    }

    fn build_level(
        config: &Config,
        rng: &mut StdRng,
        level: u32,
    ) -> Result<(Map, Position, Position), WorldError> {
        let raw = if config.enable_debug_mode {
            debug_dungeon(config.map_width, config.map_height)
        } else {
            generate_dungeon(rng, config.map_width, config.map_height)?
        };
        let map = Map::from_raw(&raw, rng)?;

        let start = if config.enable_debug_mode && map.is_walkable(DEBUG_START.x, DEBUG_START.y) {
            DEBUG_START
        } else {
            map.start_pos
        };

        // Stairs at a random room center, re-rolled a few times to land
        // away from the start when the layout allows it.
        let rooms = map.rooms().rooms();
        let mut stairs = start;
        if !rooms.is_empty() {
            stairs = rooms[rng.gen_range(0..rooms.len())].center();
            for _ in 0..10 {
                if stairs.chebyshev_distance(&start) >= MIN_STAIRS_DISTANCE {
                    break;
                }
                stairs = rooms[rng.gen_range(0..rooms.len())].center();
            }
        }

        log::info!(
            "level {} ready, start ({}, {}), stairs ({}, {})",
            level,
            start.x,
            start.y,
            stairs.x,
            stairs.y
        );

        Ok((map, start, stairs))
    }

    /// Attempt to move the player by one cell. Bumping a closed door opens
    /// it; stepping onto the stairs descends to the next level.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), WorldError> {
        let target = Position::new(self.player_pos.x + dx, self.player_pos.y + dy);

        if self.map.is_walkable(target.x, target.y) {
            self.player_pos = target;
            if target == self.stairs_pos {
                self.descend()?;
            }
            return Ok(());
        }

        if self.map.open_door(target.x, target.y) {
            self.push_message("The door splinters open.");
            // The occluder set changed under the last shadow-cast.
            if let Some(fov) = &mut self.fov {
                fov.invalidate();
            }
        }

        Ok(())
    }

    /// Discard the current level and build the next one
    pub fn descend(&mut self) -> Result<(), WorldError> {
        let next = self.level + 1;
        let (map, start, stairs) = Self::build_level(&self.config, &mut self.rng, next)?;
        self.map = map;
        self.player_pos = start;
        self.stairs_pos = stairs;
        self.level = next;
        if self.fov.is_some() {
            self.fov = Some(VisibilityField::with_radius(self.config.fov_radius));
        }
        self.push_message(format!("You descend to level {}.", next));
        Ok(())
    }

    /// Per-frame update: advance the fog-of-war within the camera window
    pub fn update(&mut self, bounds: Bounds, delta: Duration) {
        if let Some(fov) = &mut self.fov {
            fov.update(
                &mut self.map,
                self.player_pos,
                bounds,
                delta.as_secs_f32() * 1000.0,
            );
        }
    }

    fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > 50 {
            self.messages.remove(0);
        }
    }

    pub fn quit(&mut self) {
        self.state = GameState::Quit;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player_pos(&self) -> Position {
        self.player_pos
    }

    pub fn stairs_pos(&self) -> Position {
        self.stairs_pos
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// True when the fog-of-war is active (disabled in debug mode)
    pub fn fog_enabled(&self) -> bool {
        self.fov.is_some()
    }

    pub fn latest_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}
