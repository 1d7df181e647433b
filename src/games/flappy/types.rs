//! Flappy Bird data structures.

use crate::constants::*;
use rand::Rng;

/// The player's bird. `x` never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    /// Centre height, growing downward.
    pub y: f64,
    /// Vertical speed per tick (positive = falling).
    pub velocity: f64,
    /// Wing animation counter in `0..FLAPPY_FLAP_CYCLE`.
    pub flap_frame: u32,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: FLAPPY_BIRD_X,
            y: FLAPPY_BIRD_START_Y,
            velocity: 0.0,
            flap_frame: 0,
        }
    }

    /// Wing frame to draw: 0 = up, 1 = level, 2 = down.
    pub fn wing_phase(&self) -> u32 {
        let frames_per_phase = FLAPPY_FLAP_CYCLE as f64 / 3.0;
        (self.flap_frame as f64 / frames_per_phase).floor() as u32
    }

    /// Square circumscribing the bird's circle.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.x - FLAPPY_BIRD_RADIUS,
            right: self.x + FLAPPY_BIRD_RADIUS,
            top: self.y - FLAPPY_BIRD_RADIUS,
            bottom: self.y + FLAPPY_BIRD_RADIUS,
        }
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

/// The single obstacle: an upper and a lower pipe around a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge. Scrolls leftward.
    pub x: f64,
    /// Bottom of the upper pipe; the gap runs `FLAPPY_PIPE_GAP` below it.
    pub gap_top: f64,
}

impl Pipe {
    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + FLAPPY_PIPE_GAP
    }

    pub fn upper_bounds(&self) -> Bounds {
        Bounds {
            left: self.x,
            right: self.x + FLAPPY_PIPE_WIDTH,
            top: f64::NEG_INFINITY,
            bottom: self.gap_top,
        }
    }

    pub fn lower_bounds(&self) -> Bounds {
        Bounds {
            left: self.x,
            right: self.x + FLAPPY_PIPE_WIDTH,
            top: self.gap_bottom(),
            bottom: f64::INFINITY,
        }
    }
}

/// Main game state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlappyGame {
    pub width: f64,
    pub height: f64,

    pub bird: Bird,
    pub pipe: Pipe,
    /// Horizontal scroll of the ground tiles, in `(-width, 0]`.
    pub ground_offset: f64,

    /// Pipes passed.
    pub score: u32,
    pub alive: bool,
}

impl FlappyGame {
    pub fn new<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let width = width as f64;
        Self {
            width,
            height: height as f64,
            bird: Bird::new(),
            pipe: Pipe {
                x: width,
                gap_top: random_gap_top(rng),
            },
            ground_offset: 0.0,
            score: 0,
            alive: true,
        }
    }

    /// Height of the top of the ground band.
    pub fn ground_line(&self) -> f64 {
        self.height - FLAPPY_GROUND_HEIGHT
    }
}

/// Uniform gap position in `[FLAPPY_GAP_TOP_MIN, FLAPPY_GAP_TOP_MAX)`.
pub fn random_gap_top<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(FLAPPY_GAP_TOP_MIN..FLAPPY_GAP_TOP_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let game = FlappyGame::new(400, 600, &mut rng);
        assert_eq!(game.bird, Bird::new());
        assert_eq!(game.bird.y, 300.0);
        assert_eq!(game.pipe.x, 400.0);
        assert!((100.0..400.0).contains(&game.pipe.gap_top));
        assert_eq!(game.ground_offset, 0.0);
        assert_eq!(game.score, 0);
        assert!(game.alive);
        assert_eq!(game.ground_line(), 500.0);
    }

    #[test]
    fn test_wing_phase_cycles_through_three_frames() {
        let mut bird = Bird::new();
        let phases: Vec<u32> = (0..FLAPPY_FLAP_CYCLE)
            .map(|frame| {
                bird.flap_frame = frame;
                bird.wing_phase()
            })
            .collect();
        assert_eq!(phases, vec![0, 0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_bird_bounds_is_circumscribed_square() {
        let bird = Bird::new();
        let b = bird.bounds();
        assert_eq!(b.right - b.left, 2.0 * FLAPPY_BIRD_RADIUS);
        assert_eq!(b.bottom - b.top, 2.0 * FLAPPY_BIRD_RADIUS);
        assert_eq!(b.left, bird.x - FLAPPY_BIRD_RADIUS);
    }

    #[test]
    fn test_bounds_overlap_is_strict() {
        let a = Bounds {
            left: 0.0,
            right: 10.0,
            top: 0.0,
            bottom: 10.0,
        };
        let touching = Bounds {
            left: 10.0,
            right: 20.0,
            top: 0.0,
            bottom: 10.0,
        };
        let inside = Bounds {
            left: 5.0,
            right: 6.0,
            top: 5.0,
            bottom: 6.0,
        };
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_pipe_bounds() {
        let pipe = Pipe {
            x: 200.0,
            gap_top: 150.0,
        };
        assert_eq!(pipe.upper_bounds().bottom, 150.0);
        assert_eq!(pipe.lower_bounds().top, 300.0);
        assert_eq!(pipe.upper_bounds().right, 260.0);
    }

    #[test]
    fn test_random_gap_top_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..1000 {
            let gap = random_gap_top(&mut rng);
            assert!((FLAPPY_GAP_TOP_MIN..FLAPPY_GAP_TOP_MAX).contains(&gap));
        }
    }
}
