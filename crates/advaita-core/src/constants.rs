// Shared timing/animation tuning constants used by the director and drivers.

// Audio
pub const DEFAULT_FADE_SEC: f64 = 1.5; // crossfade used by `play_default`
pub const THUNDER_VOLUME: f32 = 0.3;
pub const THUNDER_FADE_SEC: f64 = 2.0;
pub const QUAKE_SFX_VOLUME: f32 = 0.6;
pub const PLAYLIST_VOLUME: f32 = 0.8;

// Earthquake oscillation
pub const QUAKE_FRAME_STEP: f32 = 0.016; // nominal clock increment per frame
pub const QUAKE_BASE_AMPLITUDE: f32 = 0.2;
pub const QUAKE_BASE_FREQUENCY: f32 = 0.5;
pub const QUAKE_SHAKE_AMPLITUDE: f32 = 0.12;
pub const QUAKE_SHAKE_FREQUENCY: f32 = 16.0;
pub const QUAKE_SETTLE_SEC: f32 = 5.0;
pub const QUAKE_SEED_RANGE: f32 = 1000.0;
pub const QUAKE_DEFAULT_STRENGTH: f32 = 0.5;

// Per-channel sine shaping: (clock multiplier, seed multiplier, scale)
pub const QUAKE_Y_WAVE: (f32, f32, f32) = (2.1, 1.0, 3.0); // yPercent
pub const QUAKE_X_WAVE: (f32, f32, f32) = (1.4, 1.3, 1.6); // xPercent
pub const QUAKE_ROT_WAVE: (f32, f32, f32) = (1.1, 0.7, 0.06); // degrees

// Parallax
pub const LEVEL_MIN: f32 = 1.0;
pub const LEVEL_MAX: f32 = 9.0;
pub const POINTER_SCALE: f32 = 0.2; // share of the max offset the pointer can reach
pub const BREATHE_AMPLITUDE_PX: f32 = 15.0;
pub const BREATHE_RATE: f32 = 0.5; // radians per second
pub const DRIFT_PERCENT: f32 = -20.0;
// quickTo durations describe when the ease is visually done; the exponential
// time constant is a fraction of that.
pub const INERTIA_TAU_FRACTION: f32 = 0.2;

// Director timing
pub const LAYOUT_DELAY_SEC: f64 = 0.05; // one frame for mounted scenes to lay out
pub const SCENE_TWO_SCROLL_DELAY_SEC: f64 = 1.0;
pub const SCENE_TWO_SCROLL_SEC: f64 = 4.0;
pub const SCENE_THREE_SCROLL_SEC: f64 = 1.5;
pub const PORTAL_REVEAL_PROGRESS: f32 = 0.85;
pub const SEAM_TRAVEL_PX: f32 = -200.0;

// Device classification
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
