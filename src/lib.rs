//! Arcade - Snake and Flappy Bird on a shared engine host.
//!
//! Games are fixed-tick simulations driven by a virtual-clock [`scheduler`],
//! fed keys through an [`input`] bus and drawn onto a recording [`surface`].
//! The terminal front end in `main.rs` replays each frame with ratatui.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod games;
pub mod input;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod ui;

pub use engine::{Callbacks, Engine, EngineContext, GameEngine, GameOver, Lifecycle};
pub use error::{ArcadeError, Result};
pub use games::{FlappyEngine, GameKind, SnakeEngine};
