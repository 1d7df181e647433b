//! Flappy Bird.
//!
//! Gravity pulls the bird down each tick and a key press flaps it upward. A
//! single pipe pair scrolls in from the right; each pipe that leaves the left
//! edge scores a point. Touching a pipe, the ground or the top edge ends the
//! game.

pub mod logic;
pub mod render;
pub mod types;

pub use logic::*;
pub use types::*;
