//! Scroll zones: map the continuous scroll offset to discrete crossings.
//!
//! A zone spans the scroll range between two anchors on a trigger element.
//! It is active once the offset is past its start, up to and including its
//! end. Crossing events are edge-triggered (one per boundary crossing, in
//! the order they happened), scrub progress is level-triggered and reported
//! on every update.

use crate::layout::{ElementKey, Layout};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(u32);

/// A scroll position expressed against the trigger and the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// `element` (0 = top, 1 = bottom of the trigger) meets `viewport`
    /// (0 = top, 1 = bottom of the viewport). "top 60%" is `{0.0, 0.6}`.
    Edge { element: f64, viewport: f64 },
    /// Top of another element; one viewport height when it is not laid out.
    TopOf(ElementKey),
}

impl Anchor {
    pub const TOP_TOP: Anchor = Anchor::Edge {
        element: 0.0,
        viewport: 0.0,
    };
    pub const BOTTOM_TOP: Anchor = Anchor::Edge {
        element: 1.0,
        viewport: 0.0,
    };
    pub const BOTTOM_BOTTOM: Anchor = Anchor::Edge {
        element: 1.0,
        viewport: 1.0,
    };

    pub fn edge(element: f64, viewport: f64) -> Self {
        Anchor::Edge { element, viewport }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneSpec<A> {
    /// `None` triggers on the document itself (top at 0).
    pub trigger: Option<ElementKey>,
    pub start: Anchor,
    /// Defaults to [`Anchor::BOTTOM_TOP`].
    pub end: Option<Anchor>,
    pub scrub: bool,
    pub action: A,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoneEventKind {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
    Progress(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneEvent<A> {
    pub zone: ZoneId,
    pub kind: ZoneEventKind,
    pub action: A,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Unknown,
    Before,
    Inside,
    After,
}

#[derive(Clone, Debug)]
struct Zone<A> {
    id: ZoneId,
    spec: ZoneSpec<A>,
    bounds: Option<(f64, f64)>,
    side: Side,
    last_progress: Option<f32>,
}

impl<A> Zone<A> {
    fn progress(&self, scroll: f64) -> Option<f32> {
        let (start, end) = self.bounds?;
        let span = end - start;
        let p = if span <= 0.0 {
            if scroll >= start {
                1.0
            } else {
                0.0
            }
        } else {
            ((scroll - start) / span).clamp(0.0, 1.0)
        };
        Some(p as f32)
    }
}

pub struct ScrollTracker<A> {
    zones: Vec<Zone<A>>,
    next_id: u32,
    last_scroll: Option<f64>,
}

impl<A> Default for ScrollTracker<A> {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            next_id: 0,
            last_scroll: None,
        }
    }
}

impl<A: Clone + PartialEq> ScrollTracker<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone. It stays dormant until the next [`refresh`](Self::refresh).
    pub fn create(&mut self, spec: ZoneSpec<A>) -> ZoneId {
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.zones.push(Zone {
            id,
            spec,
            bounds: None,
            side: Side::Unknown,
            last_progress: None,
        });
        id
    }

    pub fn kill(&mut self, id: ZoneId) {
        self.zones.retain(|z| z.id != id);
    }

    pub fn kill_matching(&mut self, action: &A) {
        self.zones.retain(|z| z.spec.action != *action);
    }

    /// Keep only zones whose action satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&A) -> bool) {
        self.zones.retain(|z| keep(&z.spec.action));
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    pub fn contains(&self, action: &A) -> bool {
        self.zones.iter().any(|z| z.spec.action == *action)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn bounds(&self, id: ZoneId) -> Option<(f64, f64)> {
        self.zones.iter().find(|z| z.id == id).and_then(|z| z.bounds)
    }

    pub fn last_scroll(&self) -> Option<f64> {
        self.last_scroll
    }

    /// Recompute pixel boundaries from the current layout.
    pub fn refresh(&mut self, layout: &impl Layout) {
        let vh = layout.viewport_height();
        for zone in &mut self.zones {
            zone.bounds = resolve_bounds(&zone.spec, layout, vh);
            if zone.bounds.is_none() {
                log::debug!("[zones] {:?} dormant: trigger not laid out", zone.id);
            }
        }
    }

    /// Feed the current scroll offset and collect the resulting events.
    pub fn update(&mut self, scroll: f64) -> Vec<ZoneEvent<A>> {
        self.last_scroll = Some(scroll);
        let mut events = Vec::new();
        for zone in &mut self.zones {
            let Some((start, end)) = zone.bounds else {
                continue;
            };
            // Resting exactly on the start edge has not crossed it yet.
            let side = if scroll <= start {
                Side::Before
            } else if scroll > end {
                Side::After
            } else {
                Side::Inside
            };
            for kind in crossings(zone.side, side) {
                events.push(ZoneEvent {
                    zone: zone.id,
                    kind,
                    action: zone.spec.action.clone(),
                });
            }
            zone.side = side;

            if zone.spec.scrub {
                if let Some(p) = zone.progress(scroll) {
                    zone.last_progress = Some(p);
                    events.push(ZoneEvent {
                        zone: zone.id,
                        kind: ZoneEventKind::Progress(p),
                        action: zone.spec.action.clone(),
                    });
                }
            }
        }
        events
    }

    pub fn progress_of(&self, action: &A) -> Option<f32> {
        self.zones
            .iter()
            .find(|z| z.spec.action == *action)
            .and_then(|z| z.last_progress)
    }
}

fn resolve_bounds<A>(spec: &ZoneSpec<A>, layout: &impl Layout, vh: f64) -> Option<(f64, f64)> {
    let trigger = match spec.trigger {
        Some(key) => layout.rect(key)?,
        None => crate::layout::Rect::new(0.0, f64::INFINITY),
    };
    let resolve = |anchor: Anchor| -> f64 {
        match anchor {
            Anchor::Edge { element, viewport } => {
                let on_element = if element == 0.0 {
                    trigger.top
                } else {
                    trigger.top + trigger.height * element
                };
                on_element - vh * viewport
            }
            Anchor::TopOf(key) => layout.rect(key).map(|r| r.top).unwrap_or(vh),
        }
    };
    let start = resolve(spec.start);
    let end = resolve(spec.end.unwrap_or(Anchor::BOTTOM_TOP));
    Some((start, end.max(start)))
}

/// Events for moving between sides of a zone, in the order they occur.
fn crossings(from: Side, to: Side) -> SmallVec<[ZoneEventKind; 2]> {
    use ZoneEventKind::*;
    let mut out = SmallVec::new();
    match (from, to) {
        (Side::Unknown, Side::Inside) | (Side::Before, Side::Inside) => out.push(Enter),
        (Side::Unknown, Side::After) | (Side::Before, Side::After) => {
            out.push(Enter);
            out.push(Leave);
        }
        (Side::Inside, Side::After) => out.push(Leave),
        (Side::After, Side::Inside) => out.push(EnterBack),
        (Side::After, Side::Before) => {
            out.push(EnterBack);
            out.push(LeaveBack);
        }
        (Side::Inside, Side::Before) => out.push(LeaveBack),
        _ => {}
    }
    out
}
