use std::time::Duration;

// Drawing surface
pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 600;

// Lifecycle
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(100);

// Host loop
pub const DEFAULT_FRAME_MS: u64 = 16;
/// Largest wall-clock step fed to the scheduler in one frame (prevents a burst
/// of catch-up ticks after the terminal was suspended).
pub const MAX_FRAME_STEP_MS: u64 = 500;

// Snake
pub const SNAKE_TICK: Duration = Duration::from_millis(110);
pub const SNAKE_GRID_SIZE: u32 = 20;
pub const SNAKE_START_CELL: (i32, i32) = (10, 10);
pub const SNAKE_FOOD_POINTS: u32 = 10;

// Flappy Bird
/// 60 ticks per second.
pub const FLAPPY_TICK: Duration = Duration::from_nanos(16_666_667);
pub const FLAPPY_GRAVITY: f64 = 0.5;
pub const FLAPPY_JUMP: f64 = -10.0;
pub const FLAPPY_PIPE_WIDTH: f64 = 60.0;
pub const FLAPPY_PIPE_GAP: f64 = 150.0;
pub const FLAPPY_PIPE_SPEED: f64 = 3.0;
pub const FLAPPY_GROUND_HEIGHT: f64 = 100.0;
pub const FLAPPY_RIM_HEIGHT: f64 = 20.0;
pub const FLAPPY_RIM_OVERHANG: f64 = 10.0;
pub const FLAPPY_BIRD_RADIUS: f64 = 15.0;
pub const FLAPPY_BIRD_X: f64 = 100.0;
pub const FLAPPY_BIRD_START_Y: f64 = 300.0;
/// Length of the wing animation cycle in ticks (three visible phases).
pub const FLAPPY_FLAP_CYCLE: u32 = 10;
pub const FLAPPY_GAP_TOP_MIN: f64 = 100.0;
pub const FLAPPY_GAP_TOP_MAX: f64 = 400.0;
