//! Game module - level lifecycle and player state

mod state;

pub use state::{Game, GameState};
