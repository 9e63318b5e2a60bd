//! Easing curves, time-bounded tweens and one-shot timers.

/// Named easing curves mapping linear progress in [0, 1] to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power3InOut,
    Power4Out,
    SineInOut,
}

impl Ease {
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::Power1Out => 1.0 - (1.0 - p) * (1.0 - p),
            Ease::Power3InOut => {
                if p < 0.5 {
                    8.0 * p.powi(4)
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(4) / 2.0
                }
            }
            Ease::Power4Out => 1.0 - (1.0 - p).powi(5),
            Ease::SineInOut => -((std::f64::consts::PI * p).cos() - 1.0) / 2.0,
        }
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A value moving from `from` to `to` over `duration` seconds of frame time.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub ease: Ease,
    elapsed: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current value. The final
    /// step lands exactly on `to`.
    pub fn step(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }
        lerp(self.from, self.to, self.ease.apply(self.elapsed / self.duration))
    }

    pub fn is_done(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// Smooth window scroll with a completion payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTween<A> {
    pub tween: Tween,
    pub on_complete: Option<A>,
}

impl<A> ScrollTween<A> {
    pub fn new(from: f64, to: f64, duration: f64, on_complete: Option<A>) -> Self {
        Self {
            tween: Tween::new(from, to, duration, Ease::Power3InOut),
            on_complete,
        }
    }
}

/// One-shot delayed actions on the frame clock.
#[derive(Clone, Debug)]
pub struct Timers<A> {
    pending: Vec<(f64, A)>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: f64, action: A) {
        self.pending.push((at, action));
    }

    /// Remove and return every action due at `now`, in scheduling order.
    pub fn take_due(&mut self, now: f64) -> Vec<A> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
