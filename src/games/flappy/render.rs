//! Flappy Bird frame rendering.

use super::types::{Bird, FlappyGame, Pipe};
use crate::constants::*;
use crate::surface::{Context2d, Rgba};

const SKY_BLUE: Rgba = Rgba::rgb(0x87, 0xCE, 0xEB);
const GROUND_GREEN: Rgba = Rgba::rgb(0x9A, 0xCD, 0x32);
const PIPE_GREEN: Rgba = Rgba::rgb(0x53, 0x8D, 0x4E);
const PIPE_RIM: Rgba = Rgba::rgb(0x3E, 0x6A, 0x3A);
const YELLOW: Rgba = Rgba::rgb(0xFF, 0xD7, 0x00);
const ORANGE: Rgba = Rgba::rgb(0xFF, 0xA5, 0x00);

/// Draw one complete frame.
pub fn render_flappy(game: &FlappyGame, ctx: &mut dyn Context2d) {
    ctx.fill_rect(0.0, 0.0, game.width, game.height, SKY_BLUE);

    // Two ground tiles side by side give a seamless scroll
    let ground_top = game.ground_line();
    for tile in 0..2 {
        let x = game.ground_offset + tile as f64 * game.width;
        ctx.fill_rect(x, ground_top, game.width, FLAPPY_GROUND_HEIGHT, GROUND_GREEN);
    }

    render_pipe(ctx, &game.pipe, game.height);
    render_bird(ctx, &game.bird);

    ctx.fill_text(
        &format!("Score: {}", game.score),
        10.0,
        40.0,
        36.0,
        Rgba::BLACK,
    );
}

fn render_pipe(ctx: &mut dyn Context2d, pipe: &Pipe, height: f64) {
    let rim_x = pipe.x - FLAPPY_RIM_OVERHANG;
    let rim_width = FLAPPY_PIPE_WIDTH + 2.0 * FLAPPY_RIM_OVERHANG;

    // Upper pipe with its rim at the gap
    ctx.fill_rect(pipe.x, 0.0, FLAPPY_PIPE_WIDTH, pipe.gap_top, PIPE_GREEN);
    ctx.fill_rect(
        rim_x,
        pipe.gap_top - FLAPPY_RIM_HEIGHT,
        rim_width,
        FLAPPY_RIM_HEIGHT,
        PIPE_RIM,
    );

    // Lower pipe
    let lower_top = pipe.gap_bottom();
    ctx.fill_rect(pipe.x, lower_top, FLAPPY_PIPE_WIDTH, height, PIPE_GREEN);
    ctx.fill_rect(rim_x, lower_top, rim_width, FLAPPY_RIM_HEIGHT, PIPE_RIM);
}

/// Wing triangle for the current phase, relative to the bird centre.
fn wing_points(bird: &Bird) -> [(f64, f64); 3] {
    let (x, y) = (bird.x, bird.y);
    match bird.wing_phase() {
        0 => [(x + 5.0, y + 5.0), (x + 10.0, y - 5.0), (x - 5.0, y - 5.0)],
        1 => [(x + 5.0, y + 5.0), (x + 15.0, y), (x - 5.0, y)],
        _ => [(x + 5.0, y + 5.0), (x + 10.0, y + 10.0), (x - 5.0, y + 10.0)],
    }
}

fn render_bird(ctx: &mut dyn Context2d, bird: &Bird) {
    let (x, y) = (bird.x, bird.y);

    ctx.fill_circle(x, y, FLAPPY_BIRD_RADIUS, YELLOW);
    ctx.fill_polygon(&wing_points(bird), YELLOW);

    // Eye
    ctx.fill_circle(x + 8.0, y - 5.0, 5.0, Rgba::WHITE);
    ctx.fill_circle(x + 8.0, y - 5.0, 2.0, Rgba::BLACK);

    // Beak
    ctx.fill_polygon(
        &[(x + 10.0, y), (x + 20.0, y - 5.0), (x + 20.0, y + 5.0)],
        ORANGE,
    );
}
