//! Snake.
//!
//! The snake moves one cell per tick on a square grid. Eating food grows it by
//! one segment and scores 10 points; running into a wall or its own body ends
//! the game.

pub mod logic;
pub mod render;
pub mod types;

pub use logic::*;
pub use types::*;
