//! The arcade's games: Snake and Flappy Bird.

pub mod flappy;
pub mod snake;

pub use flappy::FlappyGame;
pub use snake::SnakeGame;

use crate::engine::{Callbacks, Engine, EngineContext, GameEngine};
use crate::error::Result;
use rand::RngCore;

pub type SnakeEngine = Engine<SnakeGame>;
pub type FlappyEngine = Engine<FlappyGame>;

/// Which game an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
    FlappyBird,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Snake, GameKind::FlappyBird];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(GameKind::Snake)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Snake => "Snake",
            Self::FlappyBird => "Flappy Bird",
        }
    }

    /// One-line menu blurb.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Snake => "Eat, grow, and keep clear of the walls and your own tail.",
            Self::FlappyBird => "Flap through the gaps without touching a pipe.",
        }
    }

    /// Key hints shown while playing.
    pub fn controls(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Snake => &[("[Arrows]", "Steer"), ("[Esc]", "Menu")],
            Self::FlappyBird => &[("[Space]", "Flap"), ("[Esc]", "Menu")],
        }
    }

    /// Build an idle engine for this game.
    pub fn create_engine(
        self,
        context: EngineContext,
        callbacks: Callbacks,
        rng: impl RngCore + 'static,
    ) -> Result<Box<dyn GameEngine>> {
        Ok(match self {
            Self::Snake => Box::new(SnakeEngine::new(context, callbacks, rng)?),
            Self::FlappyBird => Box::new(FlappyEngine::new(context, callbacks, rng)?),
        })
    }
}
