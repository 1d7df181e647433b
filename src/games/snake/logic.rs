//! Snake game logic: input mapping, movement, collision detection.

use super::render::render_snake;
use super::types::*;
use crate::constants::{SNAKE_FOOD_POINTS, SNAKE_GRID_SIZE, SNAKE_START_CELL, SNAKE_TICK};
use crate::engine::{Simulation, StepOutcome};
use crate::error::{ArcadeError, Result};
use crate::games::GameKind;
use crate::input::Key;
use crate::surface::Context2d;
use rand::{Rng, RngCore};
use std::time::Duration;

/// Map an arrow key to its direction.
pub fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::UP),
        Key::Down => Some(Direction::DOWN),
        Key::Left => Some(Direction::LEFT),
        Key::Right => Some(Direction::RIGHT),
        _ => None,
    }
}

/// Change direction unless the new one points straight back.
/// Returns true if the direction was accepted.
pub fn turn(game: &mut SnakeGame, direction: Direction) -> bool {
    if game.direction.is_opposite(direction) {
        return false;
    }
    game.direction = direction;
    true
}

/// Single movement step.
pub fn step_snake<R: Rng + ?Sized>(game: &mut SnakeGame, rng: &mut R) -> StepOutcome {
    if !game.alive {
        return StepOutcome::default();
    }
    game.tick_count += 1;

    let head = game.head().offset(game.direction);

    // Walls, then the body as it was before the move (tail included). The
    // current head is skipped so a snake with no direction stays put.
    let hit_body = game.segments.iter().skip(1).any(|&seg| seg == head);
    if !game.in_bounds(head) || hit_body {
        game.alive = false;
        return StepOutcome {
            scored: false,
            terminal: true,
        };
    }

    game.segments.push_front(head);

    if head == game.food {
        game.score += SNAKE_FOOD_POINTS;
        game.food = spawn_food(game.tile_count, rng);
        StepOutcome {
            scored: true,
            terminal: false,
        }
    } else {
        game.segments.pop_back();
        StepOutcome::default()
    }
}

impl Simulation for SnakeGame {
    const KIND: GameKind = GameKind::Snake;
    const TICK: Duration = SNAKE_TICK;

    fn create(width: u32, height: u32, rng: &mut dyn RngCore) -> Result<Self> {
        let tile_count = SnakeGame::tile_count_for(width);
        let (start_x, start_y) = SNAKE_START_CELL;
        let fits = tile_count > start_x.max(start_y)
            && height >= tile_count as u32 * SNAKE_GRID_SIZE;
        if !fits {
            return Err(ArcadeError::SurfaceTooSmall { width, height });
        }
        let mut game = SnakeGame::new(tile_count, rng);
        game.surface_height = height;
        Ok(game)
    }

    fn reset(&mut self, rng: &mut dyn RngCore) {
        let surface_height = self.surface_height;
        *self = SnakeGame::new(self.tile_count, rng);
        self.surface_height = surface_height;
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key_direction(key) {
            Some(direction) => {
                if !turn(self, direction) {
                    log::trace!("snake: reversal {:?} rejected", direction);
                }
                true
            }
            None => false,
        }
    }

    fn step(&mut self, rng: &mut dyn RngCore) -> StepOutcome {
        step_snake(self, rng)
    }

    fn render(&self, ctx: &mut dyn Context2d) {
        render_snake(self, ctx);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
