//! Game logic for Flappy Bird: physics, scrolling, collision detection.

use super::render::render_flappy;
use super::types::*;
use crate::constants::*;
use crate::engine::{Simulation, StepOutcome};
use crate::error::{ArcadeError, Result};
use crate::games::GameKind;
use crate::input::Key;
use crate::surface::Context2d;
use rand::{Rng, RngCore};
use std::time::Duration;

/// Set the bird's velocity to the jump impulse. Replaces the current velocity
/// rather than adding to it. Does nothing once the bird has crashed.
pub fn flap(game: &mut FlappyGame) {
    if game.alive {
        game.bird.velocity = FLAPPY_JUMP;
    }
}

/// Process one game tick.
pub fn step_flappy<R: Rng + ?Sized>(game: &mut FlappyGame, rng: &mut R) -> StepOutcome {
    if !game.alive {
        return StepOutcome::default();
    }
    let mut outcome = StepOutcome::default();

    // Bird
    game.bird.velocity += FLAPPY_GRAVITY;
    game.bird.y += game.bird.velocity;
    game.bird.flap_frame = (game.bird.flap_frame + 1) % FLAPPY_FLAP_CYCLE;

    // Pipe wraps to the right edge once fully off the left edge
    game.pipe.x -= FLAPPY_PIPE_SPEED;
    if game.pipe.x < -FLAPPY_PIPE_WIDTH {
        game.pipe.x = game.width;
        game.pipe.gap_top = random_gap_top(rng);
        game.score += 1;
        outcome.scored = true;
    }

    game.ground_offset -= FLAPPY_PIPE_SPEED;
    if game.ground_offset <= -game.width {
        game.ground_offset = 0.0;
    }

    if check_collision(game) {
        game.alive = false;
        outcome.terminal = true;
    }
    outcome
}

/// Ground, ceiling, or either pipe. Uses the bird's bounding square, not its
/// circle.
pub fn check_collision(game: &FlappyGame) -> bool {
    let y = game.bird.y;
    if y > game.ground_line() || y < 0.0 {
        return true;
    }

    let bird = game.bird.bounds();
    bird.overlaps(&game.pipe.upper_bounds()) || bird.overlaps(&game.pipe.lower_bounds())
}

impl Simulation for FlappyGame {
    const KIND: GameKind = GameKind::FlappyBird;
    const TICK: Duration = FLAPPY_TICK;

    fn create(width: u32, height: u32, rng: &mut dyn RngCore) -> Result<Self> {
        // The bird must start on screen and above the ground
        let fits = width as f64 > FLAPPY_BIRD_X + FLAPPY_BIRD_RADIUS
            && height as f64 > FLAPPY_BIRD_START_Y + FLAPPY_GROUND_HEIGHT;
        if !fits {
            return Err(ArcadeError::SurfaceTooSmall { width, height });
        }
        Ok(FlappyGame::new(width, height, rng))
    }

    fn reset(&mut self, rng: &mut dyn RngCore) {
        *self = FlappyGame::new(self.width as u32, self.height as u32, rng);
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if key != Key::Space {
            return false;
        }
        flap(self);
        true
    }

    fn step(&mut self, rng: &mut dyn RngCore) -> StepOutcome {
        step_flappy(self, rng)
    }

    fn render(&self, ctx: &mut dyn Context2d) {
        render_flappy(self, ctx);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_game() -> (FlappyGame, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let game = FlappyGame::new(400, 600, &mut rng);
        (game, rng)
    }

    #[test]
    fn test_gravity_integrates_velocity_then_position() {
        let (mut game, mut rng) = new_game();
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.bird.velocity, 0.5);
        assert_eq!(game.bird.y, 300.5);
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.bird.velocity, 1.0);
        assert_eq!(game.bird.y, 301.5);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let (mut game, _) = new_game();
        game.bird.velocity = 7.5;
        flap(&mut game);
        assert_eq!(game.bird.velocity, FLAPPY_JUMP);

        game.bird.velocity = -4.0;
        flap(&mut game);
        assert_eq!(game.bird.velocity, FLAPPY_JUMP);
    }

    #[test]
    fn test_flap_then_tick_applies_gravity_once() {
        let (mut game, mut rng) = new_game();
        game.bird.velocity = 3.0;
        assert!(game.handle_key(Key::Space));
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.bird.velocity, FLAPPY_JUMP + FLAPPY_GRAVITY);
        assert_eq!(game.bird.y, 300.0 + FLAPPY_JUMP + FLAPPY_GRAVITY);
    }

    #[test]
    fn test_flap_ignored_after_crash() {
        let (mut game, _) = new_game();
        game.alive = false;
        game.bird.velocity = 2.0;
        flap(&mut game);
        assert_eq!(game.bird.velocity, 2.0);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut game, _) = new_game();
        assert!(!game.handle_key(Key::Up));
        assert!(!game.handle_key(Key::Enter));
        assert_eq!(game.bird.velocity, 0.0);
    }

    #[test]
    fn test_flap_frame_wraps() {
        let (mut game, mut rng) = new_game();
        game.bird.flap_frame = FLAPPY_FLAP_CYCLE - 1;
        // Keep the bird aloft
        game.bird.velocity = -0.5;
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.bird.flap_frame, 0);
    }

    #[test]
    fn test_pipe_scrolls_left() {
        let (mut game, mut rng) = new_game();
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.pipe.x, 397.0);
        assert_eq!(game.ground_offset, -3.0);
    }

    #[test]
    fn test_score_when_pipe_leaves_left_edge() {
        let (mut game, mut rng) = new_game();
        game.pipe.x = -58.0;
        let outcome = step_flappy(&mut game, &mut rng);
        assert!(outcome.scored);
        assert_eq!(game.score, 1);
        assert_eq!(game.pipe.x, 400.0);
        assert!((100.0..400.0).contains(&game.pipe.gap_top));
    }

    #[test]
    fn test_no_score_while_pipe_still_visible() {
        let (mut game, mut rng) = new_game();
        // -57 - 3 = -60, which is not past -PIPE_WIDTH
        game.pipe.x = -57.0;
        let outcome = step_flappy(&mut game, &mut rng);
        assert!(!outcome.scored);
        assert_eq!(game.score, 0);
        assert_eq!(game.pipe.x, -60.0);
    }

    #[test]
    fn test_ground_offset_wraps() {
        let (mut game, mut rng) = new_game();
        game.ground_offset = -397.0;
        step_flappy(&mut game, &mut rng);
        assert_eq!(game.ground_offset, 0.0);
    }

    #[test]
    fn test_ground_collision_freezes_state() {
        let (mut game, mut rng) = new_game();
        game.bird.y = 600.0;
        let outcome = step_flappy(&mut game, &mut rng);
        assert!(outcome.terminal);
        assert!(!game.alive);

        let frozen = game.clone();
        for _ in 0..10 {
            assert_eq!(step_flappy(&mut game, &mut rng), StepOutcome::default());
        }
        assert_eq!(game, frozen);
    }

    #[test]
    fn test_ceiling_collision() {
        let (mut game, mut rng) = new_game();
        game.bird.y = 5.0;
        game.bird.velocity = -10.0;
        assert!(step_flappy(&mut game, &mut rng).terminal);
    }

    #[test]
    fn test_upper_pipe_collision() {
        let (mut game, _) = new_game();
        game.pipe.x = game.bird.x - 10.0;
        game.pipe.gap_top = 300.0;
        game.bird.y = 310.0; // box top 295 < gap_top
        assert!(check_collision(&game));
    }

    #[test]
    fn test_lower_pipe_collision() {
        let (mut game, _) = new_game();
        game.pipe.x = game.bird.x - 10.0;
        game.pipe.gap_top = 150.0;
        game.bird.y = 290.0; // box bottom 305 > 300
        assert!(check_collision(&game));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let (mut game, _) = new_game();
        game.pipe.x = game.bird.x - 10.0;
        game.pipe.gap_top = 200.0;
        game.bird.y = 275.0; // box spans 260..290, gap 200..350
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_box_corner_counts_as_hit() {
        // The circle would clear this corner; the bounding square does not.
        let (mut game, _) = new_game();
        game.pipe.gap_top = 200.0;
        game.pipe.x = game.bird.x + 13.0;
        game.bird.y = 213.0;
        assert!(check_collision(&game));
    }

    #[test]
    fn test_pipe_horizontally_clear() {
        let (mut game, _) = new_game();
        game.pipe.x = game.bird.x + FLAPPY_BIRD_RADIUS;
        game.pipe.gap_top = 400.0;
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_create_rejects_small_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(FlappyGame::create(100, 600, &mut rng).is_err());
        assert!(FlappyGame::create(400, 350, &mut rng).is_err());
        assert!(FlappyGame::create(400, 600, &mut rng).is_ok());
    }

    #[test]
    fn test_reset_restores_start() {
        let (mut game, mut rng) = new_game();
        game.score = 9;
        game.alive = false;
        game.bird.y = 10.0;
        game.reset(&mut rng);
        assert_eq!(game.score, 0);
        assert!(game.alive);
        assert_eq!(game.bird, Bird::new());
        assert_eq!(game.pipe.x, 400.0);
        assert_eq!(game.width, 400.0);
    }
}
