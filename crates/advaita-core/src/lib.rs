//! Platform-free orchestration for the ADVAITA 2026 scroll experience.
//!
//! Nothing in this crate touches a browser. Hosts implement [`Stage`] and
//! [`AudioBackend`] and drive a [`Director`] once per frame.

pub mod audio;
pub mod constants;
pub mod device;
pub mod director;
pub mod layout;
pub mod parallax;
pub mod playlist;
pub mod quake;
pub mod scroll;
pub mod ticker;
pub mod tween;

pub use audio::{AudioBackend, AudioError, AudioRegistry, SinkEvent, SinkId, TrackState};
pub use device::should_skip_intro;
pub use director::{
    Cue, Director, DirectorConfig, IntroState, SceneCatalog, SceneId, SceneSpec, Seam, TrackSpec,
};
pub use layout::{ElementKey, Layout, Part, Rect, Stage};
pub use parallax::{normalize_pointer, LayerSpec, LayerTransform, ParallaxDriver};
pub use playlist::{Direction, Playlist, PlayerView, PLAYLIST};
pub use quake::{QuakeDriver, ShakeTransform};
pub use scroll::{Anchor, ScrollTracker, ZoneEvent, ZoneEventKind, ZoneSpec};
pub use ticker::{Tick, Ticker};
