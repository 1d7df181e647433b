//! Single-threaded cooperative timer scheduler.
//!
//! The scheduler keeps its own virtual clock. The host advances it once per
//! frame with the elapsed wall-clock time; tests advance it by exact amounts.
//! Due timers run one at a time in due-time order (ties broken by creation
//! order), so a callback always finishes before the next one starts. No borrow
//! is held while a callback runs, which lets callbacks create or cancel timers,
//! including their own.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shortest interval period accepted; zero would fire forever.
const MIN_PERIOD: Duration = Duration::from_micros(1);

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    Interval(Duration),
    Timeout,
}

struct Timer {
    id: TimerId,
    due: Duration,
    kind: TimerKind,
    callback: Rc<dyn Fn()>,
}

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Inner {
    fn insert(&mut self, due: Duration, kind: TimerKind, callback: Rc<dyn Fn()>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due,
            kind,
            callback,
        });
        id
    }

    /// Claim the next timer due at or before `deadline`, rescheduling
    /// intervals and removing timeouts.
    fn claim_due(&mut self, deadline: Duration) -> Option<Rc<dyn Fn()>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;

        let due = self.timers[index].due;
        self.now = self.now.max(due);
        match self.timers[index].kind {
            TimerKind::Interval(period) => {
                let timer = &mut self.timers[index];
                timer.due = due + period;
                Some(Rc::clone(&timer.callback))
            }
            TimerKind::Timeout => Some(self.timers.remove(index).callback),
        }
    }
}

/// Shared handle to the scheduler. Clones refer to the same timers.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<Inner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `callback` every `period`, first at `now + period`.
    pub fn set_interval(&self, period: Duration, callback: impl Fn() + 'static) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + period;
        inner.insert(due, TimerKind::Interval(period), Rc::new(callback))
    }

    /// Run `callback` once at `now + delay`.
    pub fn set_timeout(&self, delay: Duration, callback: impl Fn() + 'static) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + delay;
        inner.insert(due, TimerKind::Timeout, Rc::new(callback))
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.timers.len();
        inner.timers.retain(|t| t.id != id);
        inner.timers.len() != before
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Advance the clock by `elapsed`, running every timer that falls due.
    /// Returns the number of callbacks run.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let deadline = self.now() + elapsed;
        let mut fired = 0;
        loop {
            // Borrow released before the callback runs
            let next = self.inner.borrow_mut().claim_due(deadline);
            let Some(callback) = next else { break };
            callback();
            fired += 1;
        }
        self.inner.borrow_mut().now = deadline;
        fired
    }
}
