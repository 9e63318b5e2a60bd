//! Scroll + pointer parallax with inertial easing per layer.

use crate::constants::*;
use crate::layout::ElementKey;
use glam::Vec2;

/// Static motion parameters for one layer. Levels are 1..=9 buckets; values
/// outside that range are clamped before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    pub scroll_level: f32,
    pub scroll_max: f32,
    /// +1 moves down with scroll, -1 moves up.
    pub scroll_direction: f32,
    pub pointer_level: f32,
    pub pointer_max: f32,
    /// Seconds the layer needs to visually catch up with its target.
    pub inertia_secs: f32,
    /// Multiplier on the shared fog breathing wave; 0 disables it.
    pub breathe: f32,
    /// Half-period of the horizontal fog drift; 0 disables it.
    pub drift_secs: f32,
}

impl LayerSpec {
    pub const fn new(
        scroll_level: f32,
        scroll_max: f32,
        scroll_direction: f32,
        pointer_level: f32,
        pointer_max: f32,
        inertia_secs: f32,
    ) -> Self {
        Self {
            scroll_level,
            scroll_max,
            scroll_direction,
            pointer_level,
            pointer_max,
            inertia_secs,
            breathe: 0.0,
            drift_secs: 0.0,
        }
    }

    pub const fn with_breathe(mut self, breathe: f32) -> Self {
        self.breathe = breathe;
        self
    }

    pub const fn with_drift(mut self, drift_secs: f32) -> Self {
        self.drift_secs = drift_secs;
        self
    }
}

/// Per-frame output for one layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerTransform {
    /// Pixel translation.
    pub offset: Vec2,
    /// Horizontal drift in percent of the layer width.
    pub drift_percent: f32,
}

#[inline]
fn level_fraction(level: f32) -> f32 {
    let level = if level.is_finite() { level } else { LEVEL_MIN };
    level.clamp(LEVEL_MIN, LEVEL_MAX) / LEVEL_MAX
}

/// Displacement driven by zone progress `p` (0..1).
pub fn scroll_offset(p: f32, level: f32, max: f32, direction: f32) -> f32 {
    let speed = level_fraction(level);
    let t = ((p - (1.0 - speed)) / speed).clamp(0.0, 1.0);
    t * max * direction
}

/// Displacement driven by a normalized pointer coordinate (-1..1).
pub fn pointer_offset(input: f32, level: f32, max: f32) -> f32 {
    max * POINTER_SCALE * level_fraction(level) * input
}

/// Shared fog breathing wave at `time` seconds.
#[inline]
pub fn breathe_wave(time: f32) -> f32 {
    (time * BREATHE_RATE).sin() * BREATHE_AMPLITUDE_PX
}

/// Sine in-out yoyo between 0 and [`DRIFT_PERCENT`].
#[inline]
pub fn drift_wave(time: f32, half_period: f32) -> f32 {
    if half_period <= 0.0 {
        return 0.0;
    }
    DRIFT_PERCENT * 0.5 * (1.0 - (std::f32::consts::PI * time / half_period).cos())
}

/// Normalize client coordinates to -1..1 on each axis.
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(client_x / width * 2.0 - 1.0, client_y / height * 2.0 - 1.0)
}

#[derive(Clone, Debug)]
struct Layer {
    key: ElementKey,
    spec: LayerSpec,
    current: Vec2,
}

impl Layer {
    fn target(&self, scroll_p: f32, pointer: Vec2, time: f32) -> Vec2 {
        let s = &self.spec;
        let y = scroll_offset(scroll_p, s.scroll_level, s.scroll_max, s.scroll_direction)
            + pointer_offset(pointer.y, s.pointer_level, s.pointer_max)
            + breathe_wave(time) * s.breathe;
        let x = pointer_offset(pointer.x, s.pointer_level, s.pointer_max);
        Vec2::new(x, y)
    }
}

/// Drives every layer of one scene.
#[derive(Clone, Debug, Default)]
pub struct ParallaxDriver {
    layers: Vec<Layer>,
    scroll_progress: f32,
    pointer: Vec2,
    time: f32,
}

impl ParallaxDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(layers: &[(ElementKey, LayerSpec)]) -> Self {
        let mut driver = Self::new();
        for &(key, spec) in layers {
            driver.add_layer(key, spec);
        }
        driver
    }

    pub fn add_layer(&mut self, key: ElementKey, spec: LayerSpec) {
        self.layers.push(Layer {
            key,
            spec,
            current: Vec2::ZERO,
        });
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn set_scroll_progress(&mut self, p: f32) {
        self.scroll_progress = p.clamp(0.0, 1.0);
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    /// Advance by `dt` seconds and emit one transform per layer.
    pub fn step(&mut self, dt: f32) -> Vec<(ElementKey, LayerTransform)> {
        self.time += dt.max(0.0);
        let (p, pointer, time) = (self.scroll_progress, self.pointer, self.time);
        self.layers
            .iter_mut()
            .map(|layer| {
                let target = layer.target(p, pointer, time);
                let tau = (layer.spec.inertia_secs * INERTIA_TAU_FRACTION).max(1e-3);
                let alpha = 1.0 - (-dt.max(0.0) / tau).exp();
                layer.current += (target - layer.current) * alpha;
                (
                    layer.key,
                    LayerTransform {
                        offset: layer.current,
                        drift_percent: drift_wave(time, layer.spec.drift_secs),
                    },
                )
            })
            .collect()
    }
}
