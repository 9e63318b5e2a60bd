//! Seam between the orchestration core and whatever renders the page.
//!
//! The core never touches a document directly. Elements are referred to by
//! [`ElementKey`] handles that the host hands out, geometry is read through
//! [`Layout`] and every visible side effect goes through [`Stage`].

use crate::parallax::LayerTransform;
use crate::quake::ShakeTransform;

/// Stable handle for a host element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub u32);

/// Document-relative vertical extent of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Read-only geometry queries.
pub trait Layout {
    /// `None` when the element is not mounted or has no box.
    fn rect(&self, key: ElementKey) -> Option<Rect>;
    fn viewport_height(&self) -> f64;
}

/// Independently mountable regions of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    SceneOne,
    SeamOneTwo,
    SceneTwo,
    SeamTwoThree,
    SceneThree,
    MainContent,
    Navbar,
    MusicPlayer,
}

impl Part {
    pub const ALL: [Part; 8] = [
        Part::SceneOne,
        Part::SeamOneTwo,
        Part::SceneTwo,
        Part::SeamTwoThree,
        Part::SceneThree,
        Part::MainContent,
        Part::Navbar,
        Part::MusicPlayer,
    ];
}

/// Everything the director may do to the page.
pub trait Stage: Layout {
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, y: f64);
    fn set_mounted(&mut self, part: Part, mounted: bool);
    /// Liveness predicate for lazily cleaned handles.
    fn is_attached(&self, key: ElementKey) -> bool;
    fn apply_shake(&mut self, key: ElementKey, transform: ShakeTransform);
    fn apply_layer(&mut self, key: ElementKey, transform: LayerTransform);
    fn set_offset_y(&mut self, key: ElementKey, y: f32);
    fn set_portal_visible(&mut self, visible: bool);
}
