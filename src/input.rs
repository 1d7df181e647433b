//! Key input source.
//!
//! The host owns one [`InputBus`] and feeds it every key press. Engines
//! subscribe at construction and get back a [`Subscription`] token, which
//! `unsubscribe` consumes. The token is neither `Clone` nor `Copy`, so a
//! subscription can be released at most once.

use crossterm::event::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;

/// UI-agnostic key events delivered to engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Char(char),
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        }
    }
}

type Handler = Rc<dyn Fn(Key)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Proof of a live subscription. Hand it back to [`InputBus::unsubscribe`].
#[must_use = "dropping the token leaves the handler subscribed"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

/// Broadcasts key events to every subscribed handler, in subscription order.
#[derive(Clone, Default)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(Key) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Rc::new(handler)));
        Subscription { id }
    }

    /// Remove the handler behind `subscription`. Returns false if it was
    /// already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.handlers.len();
        registry.handlers.retain(|(id, _)| *id != subscription.id);
        registry.handlers.len() != before
    }

    /// Deliver `key` to every handler. Returns how many handlers ran.
    ///
    /// Handlers may subscribe or unsubscribe while the event is in flight;
    /// a handler removed mid-dispatch is not called.
    pub fn dispatch(&self, key: Key) -> usize {
        let snapshot: Vec<(u64, Handler)> = self.registry.borrow().handlers.clone();
        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            handler(key);
            delivered += 1;
        }
        if delivered == 0 {
            log::trace!("key {:?} had no subscribers", key);
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.registry
            .borrow()
            .handlers
            .iter()
            .any(|(handler_id, _)| *handler_id == id)
    }
}
