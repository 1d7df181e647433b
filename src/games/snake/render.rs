//! Snake frame rendering.

use super::types::{Direction, Position, SnakeGame};
use crate::constants::SNAKE_GRID_SIZE;
use crate::surface::{Context2d, Rgba};

const BACKGROUND: Rgba = Rgba::rgb(0x1a, 0x20, 0x2c);
const SCORE_PANEL: Rgba = Rgba::rgb(0x2d, 0x37, 0x48);
const GRID_LINE: Rgba = Rgba::rgba(0xFF, 0xFF, 0xFF, 13);
const HEAD: Rgba = Rgba::rgb(0x4a, 0xde, 0x80);
const BODY: Rgba = Rgba::rgb(0x22, 0xc5, 0x5e);
const FOOD: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
const FOOD_SHINE: Rgba = Rgba::rgba(0xFF, 0xFF, 0xFF, 102);

const EYE_RADIUS: f64 = 3.0;
const HEAD_CORNER: f64 = 6.0;
const BODY_CORNER: f64 = 4.0;
/// Food pulse phase advance per tick, in radians.
const PULSE_STEP: f64 = 0.33;

/// Draw one complete frame.
pub fn render_snake(game: &SnakeGame, ctx: &mut dyn Context2d) {
    let cell = SNAKE_GRID_SIZE as f64;
    let board = game.tile_count as f64 * cell;
    let height = game.surface_height as f64;

    ctx.fill_rect(0.0, 0.0, board, board, BACKGROUND);
    // Below the board
    ctx.fill_rect(0.0, board, board, (height - board).max(0.0), SCORE_PANEL);

    for i in 0..=game.tile_count {
        let offset = i as f64 * cell;
        ctx.stroke_line((offset, 0.0), (offset, board), 0.5, GRID_LINE);
        ctx.stroke_line((0.0, offset), (board, offset), 0.5, GRID_LINE);
    }

    for (index, segment) in game.segments.iter().enumerate() {
        render_segment(ctx, *segment, index == 0, game.direction);
    }

    render_food(ctx, game.food, game.tick_count);

    ctx.fill_text(
        &format!("Score: {}", game.score),
        10.0,
        board + 40.0,
        24.0,
        Rgba::WHITE,
    );
}

fn render_segment(ctx: &mut dyn Context2d, segment: Position, is_head: bool, direction: Direction) {
    let cell = SNAKE_GRID_SIZE as f64;
    let size = cell - 2.0;
    let x = segment.x as f64 * cell + 1.0;
    let y = segment.y as f64 * cell + 1.0;

    let (color, corner) = if is_head {
        (HEAD, HEAD_CORNER)
    } else {
        (BODY, BODY_CORNER)
    };
    ctx.fill_rounded_rect(x, y, size, size, corner, color);

    if is_head {
        let [left, right] = eye_positions(x, y, size, direction);
        ctx.fill_circle(left.0, left.1, EYE_RADIUS, Rgba::WHITE);
        ctx.fill_circle(right.0, right.1, EYE_RADIUS, Rgba::WHITE);
    }
}

/// Eyes sit toward the side the head is facing. A stationary head looks down.
fn eye_positions(x: f64, y: f64, size: f64, direction: Direction) -> [(f64, f64); 2] {
    match direction {
        Direction::RIGHT => [(x + size - 6.0, y + 5.0), (x + size - 6.0, y + size - 8.0)],
        Direction::LEFT => [(x + 6.0, y + 5.0), (x + 6.0, y + size - 8.0)],
        Direction::UP => [(x + 5.0, y + 6.0), (x + size - 8.0, y + 6.0)],
        _ => [(x + 5.0, y + size - 6.0), (x + size - 8.0, y + size - 6.0)],
    }
}

fn render_food(ctx: &mut dyn Context2d, food: Position, tick_count: u64) {
    let cell = SNAKE_GRID_SIZE as f64;
    let pulse = 1.0 + (tick_count as f64 * PULSE_STEP).sin() * 0.1;
    let cx = food.x as f64 * cell + cell / 2.0;
    let cy = food.y as f64 * cell + cell / 2.0;
    let radius = (cell / 2.0 - 2.0) * pulse;

    ctx.fill_circle(cx, cy, radius, FOOD);
    ctx.fill_circle(cx - 2.0, cy - 2.0, radius / 3.0, FOOD_SHINE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface, Surface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn draw(game: &SnakeGame) -> RecordingSurface {
        let mut surface = RecordingSurface::new(400, game.surface_height);
        render_snake(game, surface.context_2d().unwrap());
        surface.present();
        surface
    }

    #[test]
    fn test_head_and_body_use_distinct_colors() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut game = SnakeGame::new(20, &mut rng);
        game.segments.push_back(Position::new(9, 10));
        let surface = draw(&game);

        let segments: Vec<(Rgba, f64)> = surface
            .last_frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::RoundedRect { color, radius, .. } => Some((*color, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(segments, vec![(HEAD, HEAD_CORNER), (BODY, BODY_CORNER)]);
    }

    #[test]
    fn test_eyes_follow_direction() {
        let [l, r] = eye_positions(0.0, 0.0, 18.0, Direction::RIGHT);
        assert_eq!(l.0, r.0);
        assert!(l.0 > 9.0);

        let [l, r] = eye_positions(0.0, 0.0, 18.0, Direction::UP);
        assert_eq!(l.1, r.1);
        assert!(l.1 < 9.0);

        // Standing still looks the same as moving down
        assert_eq!(
            eye_positions(0.0, 0.0, 18.0, Direction::NONE),
            eye_positions(0.0, 0.0, 18.0, Direction::DOWN)
        );
    }

    #[test]
    fn test_frame_has_score_text() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut game = SnakeGame::new(20, &mut rng);
        game.score = 30;
        let surface = draw(&game);
        assert_eq!(surface.texts(), vec!["Score: 30"]);
    }

    fn panel_height(surface: &RecordingSurface) -> Option<f64> {
        surface.last_frame().iter().find_map(|cmd| match cmd {
            DrawCommand::Rect { height, color, .. } if *color == SCORE_PANEL => Some(*height),
            _ => None,
        })
    }

    #[test]
    fn test_score_panel_fills_below_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut game = SnakeGame::new(20, &mut rng);
        assert_eq!(panel_height(&draw(&game)), Some(200.0));

        game.surface_height = 800;
        assert_eq!(panel_height(&draw(&game)), Some(400.0));

        // Exactly square leaves no room for the panel
        game.surface_height = 400;
        assert_eq!(panel_height(&draw(&game)), Some(0.0));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let game = SnakeGame::new(20, &mut rng);
        let before = format!("{:?}", game);
        draw(&game);
        assert_eq!(format!("{:?}", game), before);
    }
}
