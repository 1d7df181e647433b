//! Snake game data structures.

use crate::constants::{SNAKE_GRID_SIZE, SNAKE_START_CELL, SURFACE_HEIGHT};
use rand::Rng;
use std::collections::VecDeque;

/// A cell on the square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        Self {
            x: self.x + direction.dx,
            y: self.y + direction.dy,
        }
    }
}

/// Movement vector. Either zero (not moving yet) or one orthogonal unit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// True if `other` points straight back along this direction.
    pub fn is_opposite(self, other: Direction) -> bool {
        !self.is_none() && self.dx == -other.dx && self.dy == -other.dy
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    /// Cells per side of the square grid.
    pub tile_count: i32,
    /// Height of the surface being drawn to. The score panel fills the
    /// space below the board.
    pub surface_height: u32,

    /// Body segments, head at index 0.
    pub segments: VecDeque<Position>,
    pub direction: Direction,
    pub food: Position,

    pub score: u32,
    pub alive: bool,

    /// Steps taken since the last reset. Drives the food pulse animation.
    pub tick_count: u64,
}

impl SnakeGame {
    pub fn new<R: Rng + ?Sized>(tile_count: i32, rng: &mut R) -> Self {
        let (x, y) = SNAKE_START_CELL;
        Self {
            tile_count,
            surface_height: SURFACE_HEIGHT,
            segments: VecDeque::from([Position::new(x, y)]),
            direction: Direction::NONE,
            food: spawn_food(tile_count, rng),
            score: 0,
            alive: true,
            tick_count: 0,
        }
    }

    /// Grid size that fits a surface `width` units wide.
    pub fn tile_count_for(width: u32) -> i32 {
        (width / SNAKE_GRID_SIZE) as i32
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.tile_count).contains(&pos.x) && (0..self.tile_count).contains(&pos.y)
    }
}

/// Pick a uniformly random cell for food.
///
/// Occupied cells are not excluded, so food can land under the snake. It is
/// eaten as soon as the head reaches that cell.
pub fn spawn_food<R: Rng + ?Sized>(tile_count: i32, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..tile_count), rng.gen_range(0..tile_count))
}
