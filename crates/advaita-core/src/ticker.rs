//! Explicit frame scheduler.
//!
//! The host calls [`Ticker::tick`] once per display frame (from
//! `requestAnimationFrame` on the web, from a loop in tests). Every
//! registered callback runs exactly once per tick while the ticker is
//! running. Callbacks may add or remove callbacks through a shared handle;
//! such changes take effect on the next frame. A `tick` issued from inside a
//! callback is ignored, so callbacks never re-enter one another.

use std::cell::{Cell, RefCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// Per-frame timing handed to every callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tick {
    /// Seconds since the host clock origin.
    pub now: f64,
    /// Seconds since the previous frame, 0 on the first frame after `start`.
    pub dt: f64,
    pub frame: u64,
}

type Callback = Box<dyn FnMut(Tick)>;

#[derive(Default)]
pub struct Ticker {
    callbacks: RefCell<Vec<(CallbackId, Callback)>>,
    added: RefCell<Vec<(CallbackId, Callback)>>,
    removed: RefCell<Vec<CallbackId>>,
    next_id: Cell<u64>,
    running: Cell<bool>,
    in_tick: Cell<bool>,
    last_now: Cell<Option<f64>>,
    frame: Cell<u64>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.running.replace(true) {
            self.last_now.set(None);
        }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn add(&self, callback: impl FnMut(Tick) + 'static) -> CallbackId {
        let id = CallbackId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        let entry: (CallbackId, Callback) = (id, Box::new(callback));
        if self.in_tick.get() {
            self.added.borrow_mut().push(entry);
        } else {
            self.callbacks.borrow_mut().push(entry);
        }
        id
    }

    pub fn remove(&self, id: CallbackId) {
        if self.in_tick.get() {
            self.removed.borrow_mut().push(id);
        } else {
            self.callbacks.borrow_mut().retain(|(cid, _)| *cid != id);
            self.added.borrow_mut().retain(|(cid, _)| *cid != id);
        }
    }

    /// Registered callbacks, counted between frames.
    pub fn len(&self) -> usize {
        self.callbacks.borrow().len() + self.added.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run one frame. Returns `false` when nothing ran (stopped or nested).
    pub fn tick(&self, now: f64) -> bool {
        if !self.running.get() {
            return false;
        }
        if self.in_tick.replace(true) {
            log::warn!("[ticker] nested tick ignored");
            return false;
        }
        let dt = match self.last_now.replace(Some(now)) {
            Some(prev) => (now - prev).max(0.0),
            None => 0.0,
        };
        let tick = Tick {
            now,
            dt,
            frame: self.frame.get(),
        };
        self.frame.set(self.frame.get() + 1);

        // Callbacks run with the list detached so they can call add/remove.
        let mut current = std::mem::take(&mut *self.callbacks.borrow_mut());
        for (_, cb) in current.iter_mut() {
            cb(tick);
        }
        {
            let removed = std::mem::take(&mut *self.removed.borrow_mut());
            let mut added = std::mem::take(&mut *self.added.borrow_mut());
            current.append(&mut added);
            current.retain(|(id, _)| !removed.contains(id));
            *self.callbacks.borrow_mut() = current;
        }
        self.in_tick.set(false);
        true
    }
}
