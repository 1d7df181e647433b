//! Engine lifecycle shared by every game.
//!
//! An [`Engine`] wraps one [`Simulation`] and drives it from a repeating
//! scheduler timer. It moves through three states:
//!
//! ```text
//! Idle --start()--> Running --stop() / game over--> Stopped
//! ```
//!
//! `Stopped` is terminal; playing again takes a fresh engine. The engine
//! subscribes to the input bus when it is built and releases the subscription
//! in `stop()` (or on drop). Timer and input closures hold weak references
//! back to the engine, so dropping the engine is always enough to detach it.

use crate::constants::GAME_OVER_DELAY;
use crate::error::{ArcadeError, Result};
use crate::games::GameKind;
use crate::input::{InputBus, Key, Subscription};
use crate::scheduler::{Scheduler, TimerId};
use crate::surface::{Context2d, SharedSurface};
use rand::RngCore;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The score changed this step.
    pub scored: bool,
    /// The game reached its terminal state this step.
    pub terminal: bool,
}

/// A self-contained fixed-tick game.
///
/// Implementations are plain state machines: no timers, no surfaces, no
/// callbacks. [`Engine`] supplies all of that.
pub trait Simulation: Sized + 'static {
    const KIND: GameKind;

    /// Period of the repeating tick timer.
    const TICK: Duration;

    /// Build the initial state for a `width` x `height` surface.
    fn create(width: u32, height: u32, rng: &mut dyn RngCore) -> Result<Self>;

    /// Return to the initial state.
    fn reset(&mut self, rng: &mut dyn RngCore);

    /// Apply a key press. Returns false if the key means nothing to this game.
    fn handle_key(&mut self, key: Key) -> bool;

    /// Advance one tick.
    fn step(&mut self, rng: &mut dyn RngCore) -> StepOutcome;

    /// Draw the current state. Must not change it.
    fn render(&self, ctx: &mut dyn Context2d);

    fn score(&self) -> u32;

    fn is_alive(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// Final result delivered to the host after a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub game: GameKind,
    pub score: u32,
}

/// Host hooks an engine reports through.
pub struct Callbacks {
    /// Called synchronously inside the tick that changed the score.
    pub on_score: Box<dyn FnMut(u32)>,
    /// Called once, [`GAME_OVER_DELAY`] after the terminal tick.
    pub on_game_over: Box<dyn FnMut(GameOver)>,
}

impl Callbacks {
    pub fn new(
        on_score: impl FnMut(u32) + 'static,
        on_game_over: impl FnMut(GameOver) + 'static,
    ) -> Self {
        Self {
            on_score: Box::new(on_score),
            on_game_over: Box::new(on_game_over),
        }
    }

    /// Callbacks that ignore everything.
    pub fn silent() -> Self {
        Self::new(|_| {}, |_| {})
    }
}

/// Host-owned resources an engine borrows for one play session.
#[derive(Clone)]
pub struct EngineContext {
    pub surface: SharedSurface,
    pub scheduler: Scheduler,
    pub input: InputBus,
}

/// Object-safe view of an engine, used by the host to hold either game.
pub trait GameEngine {
    fn kind(&self) -> GameKind;
    fn start(&mut self);
    fn stop(&mut self);
    fn lifecycle(&self) -> Lifecycle;
    fn score(&self) -> u32;
}

struct Core<G> {
    game: G,
    rng: Box<dyn RngCore>,
    lifecycle: Lifecycle,
    timer: Option<TimerId>,
    subscription: Option<Subscription>,
    game_over_timer: Option<TimerId>,
}

struct Shared<G> {
    core: RefCell<Core<G>>,
    callbacks: RefCell<Callbacks>,
    context: EngineContext,
}

impl<G: Simulation> Shared<G> {
    fn handle_key(&self, key: Key) {
        let mut core = self.core.borrow_mut();
        if core.lifecycle != Lifecycle::Running {
            log::trace!("{}: ignoring {:?} while {:?}", G::KIND.name(), key, core.lifecycle);
            return;
        }
        if !core.game.handle_key(key) {
            log::trace!("{}: ignoring {:?}", G::KIND.name(), key);
        }
    }

    fn tick(self: &Rc<Self>) {
        let (outcome, score) = {
            let mut core = self.core.borrow_mut();
            if core.lifecycle != Lifecycle::Running {
                return;
            }
            let core = &mut *core;
            let outcome = core.game.step(core.rng.as_mut());
            debug_assert_eq!(
                outcome.terminal,
                !core.game.is_alive(),
                "{}: terminal flag disagrees with is_alive",
                G::KIND.name()
            );
            (outcome, core.game.score())
        };

        if outcome.scored {
            (self.callbacks.borrow_mut().on_score)(score);
        }

        self.render();

        if outcome.terminal {
            log::info!("{}: game over with score {}", G::KIND.name(), score);
            self.halt();
            self.schedule_game_over(score);
        }
    }

    fn render(&self) {
        let core = self.core.borrow();
        let mut surface = self.context.surface.borrow_mut();
        match surface.context_2d() {
            Some(ctx) => core.game.render(ctx),
            None => {
                log::warn!("{}: drawing context lost, frame skipped", G::KIND.name());
                return;
            }
        }
        surface.present();
    }

    fn schedule_game_over(self: &Rc<Self>, score: u32) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let id = self.context.scheduler.set_timeout(GAME_OVER_DELAY, move || {
            let Some(shared) = weak.upgrade() else { return };
            shared.core.borrow_mut().game_over_timer = None;
            let notice = GameOver {
                game: G::KIND,
                score,
            };
            (shared.callbacks.borrow_mut().on_game_over)(notice);
        });
        self.core.borrow_mut().game_over_timer = Some(id);
    }

    /// Cancel the tick timer and release the input subscription. Safe to call
    /// any number of times, including from inside a tick.
    fn halt(&self) {
        let (timer, subscription, was) = {
            let mut core = self.core.borrow_mut();
            let was = core.lifecycle;
            core.lifecycle = Lifecycle::Stopped;
            (core.timer.take(), core.subscription.take(), was)
        };
        if let Some(id) = timer {
            self.context.scheduler.cancel(id);
        }
        if let Some(subscription) = subscription {
            self.context.input.unsubscribe(subscription);
        }
        if was != Lifecycle::Stopped {
            log::debug!("{}: {:?} -> Stopped", G::KIND.name(), was);
        }
    }
}

/// Lifecycle driver around a [`Simulation`].
pub struct Engine<G: Simulation> {
    shared: Rc<Shared<G>>,
}

impl<G: Simulation> Engine<G> {
    /// Bind a new engine to the host's surface, scheduler and input bus.
    ///
    /// Fails if the surface has no 2D context or is too small for the game.
    /// The engine starts `Idle`, already subscribed to input.
    pub fn new(
        context: EngineContext,
        callbacks: Callbacks,
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        let (width, height) = {
            let mut surface = context.surface.borrow_mut();
            if surface.context_2d().is_none() {
                return Err(ArcadeError::SurfaceUnavailable);
            }
            (surface.width(), surface.height())
        };

        let mut rng: Box<dyn RngCore> = Box::new(rng);
        let game = G::create(width, height, rng.as_mut())?;

        let shared = Rc::new(Shared {
            core: RefCell::new(Core {
                game,
                rng,
                lifecycle: Lifecycle::Idle,
                timer: None,
                subscription: None,
                game_over_timer: None,
            }),
            callbacks: RefCell::new(callbacks),
            context,
        });

        let weak = Rc::downgrade(&shared);
        let subscription = shared.context.input.subscribe(move |key| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_key(key);
            }
        });
        shared.core.borrow_mut().subscription = Some(subscription);

        log::debug!("{}: engine created on {}x{} surface", G::KIND.name(), width, height);
        Ok(Self { shared })
    }

    /// Reset the game and begin ticking. Does nothing unless `Idle`.
    pub fn start(&mut self) {
        let mut core = self.shared.core.borrow_mut();
        match core.lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Running => return,
            Lifecycle::Stopped => {
                log::debug!("{}: start ignored, engine already stopped", G::KIND.name());
                return;
            }
        }

        let core = &mut *core;
        core.game.reset(core.rng.as_mut());
        core.lifecycle = Lifecycle::Running;

        let weak = Rc::downgrade(&self.shared);
        core.timer = Some(self.shared.context.scheduler.set_interval(G::TICK, move || {
            if let Some(shared) = weak.upgrade() {
                shared.tick();
            }
        }));
        log::debug!("{}: Idle -> Running", G::KIND.name());
    }

    /// Cancel the timer and unsubscribe from input. Idempotent.
    pub fn stop(&mut self) {
        self.shared.halt();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.core.borrow().lifecycle
    }

    pub fn score(&self) -> u32 {
        self.shared.core.borrow().game.score()
    }

    /// Read-only access to the game state.
    pub fn with_state<R>(&self, f: impl FnOnce(&G) -> R) -> R {
        f(&self.shared.core.borrow().game)
    }
}

impl<G: Simulation> GameEngine for Engine<G> {
    fn kind(&self) -> GameKind {
        G::KIND
    }

    fn start(&mut self) {
        Engine::start(self);
    }

    fn stop(&mut self) {
        Engine::stop(self);
    }

    fn lifecycle(&self) -> Lifecycle {
        Engine::lifecycle(self)
    }

    fn score(&self) -> u32 {
        Engine::score(self)
    }
}

impl<G: Simulation> Drop for Engine<G> {
    fn drop(&mut self) {
        self.shared.halt();
        if let Some(id) = self.shared.core.borrow_mut().game_over_timer.take() {
            self.shared.context.scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, Rgba};
    use rand::rngs::mock::StepRng;
    use std::cell::Cell;

    /// Counts ticks and ends after `limit` of them.
    struct Countdown {
        ticks: u32,
        limit: u32,
        keys: Vec<Key>,
        /// Set by `!`. Ends the game without flagging the step terminal.
        hide_terminal: bool,
    }

    impl Simulation for Countdown {
        const KIND: GameKind = GameKind::Snake;
        const TICK: Duration = Duration::from_millis(10);

        fn create(width: u32, height: u32, _rng: &mut dyn RngCore) -> Result<Self> {
            if width == 0 || height == 0 {
                return Err(ArcadeError::SurfaceTooSmall { width, height });
            }
            Ok(Self {
                ticks: 99,
                limit: 3,
                keys: Vec::new(),
                hide_terminal: false,
            })
        }

        fn reset(&mut self, _rng: &mut dyn RngCore) {
            self.ticks = 0;
        }

        fn handle_key(&mut self, key: Key) -> bool {
            self.keys.push(key);
            if key == Key::Char('!') {
                self.hide_terminal = true;
            }
            key == Key::Space
        }

        fn step(&mut self, _rng: &mut dyn RngCore) -> StepOutcome {
            self.ticks += 1;
            StepOutcome {
                scored: true,
                terminal: !self.hide_terminal && self.ticks >= self.limit,
            }
        }

        fn render(&self, ctx: &mut dyn Context2d) {
            ctx.fill_text(&self.ticks.to_string(), 0.0, 0.0, 10.0, Rgba::BLACK);
        }

        fn score(&self) -> u32 {
            self.ticks
        }

        fn is_alive(&self) -> bool {
            self.ticks < self.limit
        }
    }

    fn context() -> (EngineContext, Rc<RefCell<RecordingSurface>>) {
        let surface = RecordingSurface::new(400, 600).into_shared();
        let ctx = EngineContext {
            surface: surface.clone(),
            scheduler: Scheduler::new(),
            input: InputBus::new(),
        };
        (ctx, surface)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_engine_is_idle_and_subscribed() {
        let (ctx, _) = context();
        let engine = Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1))
            .unwrap();
        assert_eq!(engine.lifecycle(), Lifecycle::Idle);
        assert_eq!(ctx.input.subscriber_count(), 1);
        assert_eq!(ctx.scheduler.pending(), 0);
    }

    #[test]
    fn test_missing_context_is_fatal() {
        let surface = RecordingSurface::without_context(400, 600).into_shared();
        let ctx = EngineContext {
            surface,
            scheduler: Scheduler::new(),
            input: InputBus::new(),
        };
        let result = Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1));
        assert!(matches!(result, Err(ArcadeError::SurfaceUnavailable)));
        assert_eq!(ctx.input.subscriber_count(), 0);
    }

    #[test]
    fn test_start_resets_and_is_idempotent() {
        let (ctx, _) = context();
        let mut engine =
            Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1)).unwrap();
        engine.start();
        assert_eq!(engine.score(), 0);
        engine.start();
        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert_eq!(ctx.scheduler.pending(), 1);
    }

    #[test]
    fn test_keys_ignored_unless_running() {
        let (ctx, _) = context();
        let mut engine =
            Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1)).unwrap();
        ctx.input.dispatch(Key::Space);
        assert_eq!(engine.with_state(|g| g.keys.len()), 0);

        engine.start();
        ctx.input.dispatch(Key::Space);
        ctx.input.dispatch(Key::Char('x'));
        assert_eq!(engine.with_state(|g| g.keys.clone()), vec![Key::Space, Key::Char('x')]);
    }

    #[test]
    fn test_terminal_tick_stops_and_notifies_after_delay() {
        let (ctx, surface) = context();
        let scores = Rc::new(RefCell::new(Vec::new()));
        let over = Rc::new(Cell::new(None));
        let (s, o) = (Rc::clone(&scores), Rc::clone(&over));
        let callbacks = Callbacks::new(
            move |score| s.borrow_mut().push(score),
            move |notice| o.set(Some(notice)),
        );
        let mut engine = Engine::<Countdown>::new(ctx.clone(), callbacks, StepRng::new(0, 1)).unwrap();
        engine.start();

        ctx.scheduler.advance(ms(30));
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert_eq!(*scores.borrow(), vec![1, 2, 3]);
        assert_eq!(surface.borrow().frames_presented(), 3);
        assert_eq!(ctx.input.subscriber_count(), 0);
        assert!(over.get().is_none());

        ctx.scheduler.advance(ms(99));
        assert!(over.get().is_none());
        ctx.scheduler.advance(ms(1));
        assert_eq!(
            over.get(),
            Some(GameOver {
                game: GameKind::Snake,
                score: 3
            })
        );

        // No further ticks once stopped
        ctx.scheduler.advance(ms(1000));
        assert_eq!(engine.score(), 3);
        assert_eq!(surface.borrow().frames_presented(), 3);
    }

    #[test]
    fn test_stop_twice_and_restart_is_ignored() {
        let (ctx, _) = context();
        let mut engine =
            Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1)).unwrap();
        engine.start();
        engine.stop();
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        engine.stop();
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);

        engine.start();
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert_eq!(ctx.scheduler.pending(), 0);
        assert_eq!(ctx.input.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_releases_everything() {
        let (ctx, _) = context();
        let over = Rc::new(Cell::new(false));
        let o = Rc::clone(&over);
        let mut engine = Engine::<Countdown>::new(
            ctx.clone(),
            Callbacks::new(|_| {}, move |_| o.set(true)),
            StepRng::new(0, 1),
        )
        .unwrap();
        engine.start();
        ctx.scheduler.advance(ms(30));
        // Game over is pending; releasing the engine cancels it
        drop(engine);

        assert_eq!(ctx.scheduler.pending(), 0);
        assert_eq!(ctx.input.subscriber_count(), 0);
        ctx.scheduler.advance(ms(500));
        assert!(!over.get());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "terminal flag disagrees with is_alive")]
    fn test_unflagged_death_is_caught() {
        let (ctx, _) = context();
        let mut engine =
            Engine::<Countdown>::new(ctx.clone(), Callbacks::silent(), StepRng::new(0, 1)).unwrap();
        engine.start();
        ctx.input.dispatch(Key::Char('!'));
        ctx.scheduler.advance(ms(30));
    }
}
