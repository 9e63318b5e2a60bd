//! Ambient "earthquake" perturbation shared by every registered element.
//!
//! One global clock drives all targets; each target gets its own random
//! phase seed so elements sharing the clock do not move in lockstep.
//! Frequency scales how fast the clock advances, amplitude scales every
//! channel of every target.

use crate::constants::*;
use crate::layout::ElementKey;
use crate::tween::{Ease, Tween};
use fnv::FnvHashMap;
use rand::prelude::*;

/// Per-frame perturbation of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShakeTransform {
    pub y_percent: f32,
    pub x_percent: f32,
    pub rotation_deg: f32,
}

impl ShakeTransform {
    pub fn is_identity(&self) -> bool {
        self.y_percent == 0.0 && self.x_percent == 0.0 && self.rotation_deg == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeTarget {
    pub key: ElementKey,
    pub strength: f32,
    pub seed: f32,
}

impl ShakeTarget {
    /// Transform at clock `t` under global `amplitude`; `None` when the
    /// target is disabled (strength ≤ 0).
    pub fn transform_at(&self, t: f32, amplitude: f32) -> Option<ShakeTransform> {
        if self.strength.is_nan() || self.strength <= 0.0 {
            return None;
        }
        let amp = amplitude * self.strength;
        let wave = |(clock, seed, scale): (f32, f32, f32)| {
            (t * clock + self.seed * seed).sin() * scale * amp
        };
        Some(ShakeTransform {
            y_percent: wave(QUAKE_Y_WAVE),
            x_percent: wave(QUAKE_X_WAVE),
            rotation_deg: wave(QUAKE_ROT_WAVE),
        })
    }
}

#[derive(Clone, Debug)]
struct Settle {
    amplitude: Tween,
    frequency: Tween,
}

pub struct QuakeDriver {
    time: f32,
    amplitude: f32,
    frequency: f32,
    targets: Vec<ShakeTarget>,
    index: FnvHashMap<ElementKey, usize>,
    settle: Option<Settle>,
    rng: StdRng,
}

impl QuakeDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            time: 0.0,
            amplitude: QUAKE_BASE_AMPLITUDE,
            frequency: QUAKE_BASE_FREQUENCY,
            targets: Vec::new(),
            index: FnvHashMap::default(),
            settle: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add a target; the seed is drawn on first registration only.
    pub fn register(&mut self, key: ElementKey, strength: f32) -> ShakeTarget {
        if let Some(&i) = self.index.get(&key) {
            return self.targets[i];
        }
        let target = ShakeTarget {
            key,
            strength,
            seed: self.rng.gen_range(0.0..QUAKE_SEED_RANGE),
        };
        self.index.insert(key, self.targets.len());
        self.targets.push(target);
        target
    }

    pub fn register_all(&mut self, targets: &[(ElementKey, f32)]) {
        for &(key, strength) in targets {
            self.register(key, strength);
        }
    }

    pub fn target(&self, key: ElementKey) -> Option<&ShakeTarget> {
        self.index.get(&key).map(|&i| &self.targets[i])
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn levels(&self) -> (f32, f32) {
        (self.amplitude, self.frequency)
    }

    /// Jump to new levels, dropping any settle in progress.
    pub fn set_levels(&mut self, amplitude: f32, frequency: f32) {
        self.settle = None;
        self.amplitude = amplitude;
        self.frequency = frequency;
    }

    /// Ease from `from` to `to` (amplitude, frequency) over `secs`.
    pub fn settle(&mut self, from: (f32, f32), to: (f32, f32), secs: f32) {
        self.amplitude = from.0;
        self.frequency = from.1;
        self.settle = Some(Settle {
            amplitude: Tween::new(from.0 as f64, to.0 as f64, secs as f64, Ease::Power1Out),
            frequency: Tween::new(from.1 as f64, to.1 as f64, secs as f64, Ease::Power1Out),
        });
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Advance one frame and emit transforms for live, enabled targets.
    pub fn step(
        &mut self,
        dt: f32,
        is_alive: impl Fn(ElementKey) -> bool,
    ) -> Vec<(ElementKey, ShakeTransform)> {
        if let Some(settle) = &mut self.settle {
            self.amplitude = settle.amplitude.step(dt as f64) as f32;
            self.frequency = settle.frequency.step(dt as f64) as f32;
            if settle.amplitude.is_done() && settle.frequency.is_done() {
                log::debug!("[quake] settled at {:.2}/{:.2}", self.amplitude, self.frequency);
                self.settle = None;
            }
        }
        self.time += QUAKE_FRAME_STEP * self.frequency;

        let (t, amplitude) = (self.time, self.amplitude);
        self.targets
            .iter()
            .filter(|target| is_alive(target.key))
            .filter_map(|target| Some((target.key, target.transform_at(t, amplitude)?)))
            .collect()
    }
}
