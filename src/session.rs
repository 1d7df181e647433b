//! Host session controller.
//!
//! Owns the drawing surface, scheduler and input bus, and at most one engine.
//! A play session is: build engine → start → (Esc or game over) → stop and
//! drop the engine → back to the menu.

use crate::constants::{MAX_FRAME_STEP_MS, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::engine::{Callbacks, EngineContext, GameEngine, GameOver};
use crate::error::Result;
use crate::games::GameKind;
use crate::input::{InputBus, Key};
use crate::scheduler::Scheduler;
use crate::surface::RecordingSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// What the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing(GameKind),
    /// Game-over notice, dismissed by any key.
    GameOver(GameOver),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Continue,
    Quit,
}

pub struct Session {
    surface: Rc<RefCell<RecordingSurface>>,
    scheduler: Scheduler,
    input: InputBus,
    engine: Option<Box<dyn GameEngine>>,
    screen: Screen,
    selected: usize,
    score: Rc<Cell<u32>>,
    finished: Rc<Cell<Option<GameOver>>>,
    seed: Option<u64>,
    games_started: u64,
}

impl Session {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            surface: RecordingSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT).into_shared(),
            scheduler: Scheduler::new(),
            input: InputBus::new(),
            engine: None,
            screen: Screen::Menu,
            selected: 0,
            score: Rc::new(Cell::new(0)),
            finished: Rc::new(Cell::new(None)),
            seed,
            games_started: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Highlighted menu entry.
    pub fn selected(&self) -> GameKind {
        GameKind::from_index(self.selected)
    }

    /// Latest score reported by the running engine.
    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn surface(&self) -> Ref<'_, RecordingSurface> {
        self.surface.borrow()
    }

    pub fn engine(&self) -> Option<&dyn GameEngine> {
        self.engine.as_deref()
    }

    fn next_rng(&mut self) -> StdRng {
        self.games_started += 1;
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.games_started)),
            None => StdRng::from_entropy(),
        }
    }

    /// Release any current engine, then build and start `kind`.
    pub fn start_game(&mut self, kind: GameKind) -> Result<()> {
        self.release_engine();
        self.score.set(0);
        self.finished.set(None);

        let score = Rc::clone(&self.score);
        let finished = Rc::clone(&self.finished);
        let callbacks = Callbacks::new(
            move |new_score| score.set(new_score),
            move |notice| finished.set(Some(notice)),
        );
        let context = EngineContext {
            surface: self.surface.clone(),
            scheduler: self.scheduler.clone(),
            input: self.input.clone(),
        };

        let rng = self.next_rng();
        let mut engine = kind.create_engine(context, callbacks, rng)?;
        engine.start();
        self.engine = Some(engine);
        self.screen = Screen::Playing(kind);
        log::info!("started {}", kind.name());
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        self.release_engine();
        self.screen = Screen::Menu;
    }

    fn release_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
            log::debug!("released {} engine", engine.kind().name());
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Result<SessionAction> {
        match self.screen {
            Screen::Menu => match key {
                Key::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                Key::Down => {
                    self.selected = (self.selected + 1).min(GameKind::ALL.len() - 1);
                }
                Key::Enter | Key::Space => self.start_game(self.selected())?,
                Key::Escape | Key::Char('q') => return Ok(SessionAction::Quit),
                _ => {}
            },
            Screen::Playing(_) => {
                if key == Key::Escape {
                    self.return_to_menu();
                } else {
                    self.input.dispatch(key);
                }
            }
            Screen::GameOver(_) => self.return_to_menu(),
        }
        Ok(SessionAction::Continue)
    }

    /// Feed elapsed wall-clock time to the scheduler and react to game over.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed = elapsed.min(Duration::from_millis(MAX_FRAME_STEP_MS));
        self.scheduler.advance(elapsed);

        if let Some(notice) = self.finished.take() {
            self.release_engine();
            self.screen = Screen::GameOver(notice);
            log::info!("{} over, final score {}", notice.game.name(), notice.score);
        }
    }
}
