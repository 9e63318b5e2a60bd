// In-memory playback backend and page stage shared by the integration tests.

#![allow(dead_code)]

use advaita_core::audio::{AudioBackend, AudioError, SinkEvent, SinkId};
use advaita_core::director::{SceneCatalog, SceneSpec};
use advaita_core::layout::{ElementKey, Layout, Part, Rect, Stage};
use advaita_core::parallax::{LayerSpec, LayerTransform};
use advaita_core::quake::ShakeTransform;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct FakeSink {
    pub path: String,
    pub looping: bool,
    pub volume: f32,
    pub position: f64,
    pub duration: f64,
    pub paused: bool,
    pub released: bool,
    pub play_requests: u32,
}

/// Backend whose `play` succeeds on the next drain unless `reject` is set.
#[derive(Debug)]
pub struct FakeBackend {
    pub sinks: Vec<FakeSink>,
    pub events: Vec<SinkEvent>,
    pub one_shots: Vec<(String, f32)>,
    pub broken_paths: Vec<String>,
    pub reject: bool,
    pub duration: f64,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            sinks: Vec::new(),
            events: Vec::new(),
            one_shots: Vec::new(),
            broken_paths: Vec::new(),
            reject: false,
            duration: 180.0,
        }
    }
}

impl FakeBackend {
    pub fn sink(&self, id: SinkId) -> &FakeSink {
        &self.sinks[id.0 as usize]
    }

    /// Move every playing sink forward by `secs`.
    pub fn advance(&mut self, secs: f64) {
        for sink in self.sinks.iter_mut().filter(|s| !s.paused && !s.released) {
            sink.position += secs;
        }
    }

    pub fn finish(&mut self, id: SinkId) {
        self.events.push(SinkEvent::Ended(id));
    }

    pub fn playing(&self) -> Vec<&FakeSink> {
        self.sinks
            .iter()
            .filter(|s| !s.paused && !s.released)
            .collect()
    }
}

impl AudioBackend for FakeBackend {
    fn create(&mut self, path: &str, looping: bool) -> Result<SinkId, AudioError> {
        if self.broken_paths.iter().any(|p| p == path) {
            return Err(AudioError::Load {
                path: path.to_string(),
                reason: "404".to_string(),
            });
        }
        self.sinks.push(FakeSink {
            path: path.to_string(),
            looping,
            volume: 1.0,
            duration: self.duration,
            paused: true,
            ..FakeSink::default()
        });
        Ok(SinkId(self.sinks.len() as u32 - 1))
    }

    fn play(&mut self, sink: SinkId) {
        let s = &mut self.sinks[sink.0 as usize];
        s.play_requests += 1;
        if self.reject {
            self.events.push(SinkEvent::Failed(
                sink,
                AudioError::Rejected("NotAllowedError".to_string()),
            ));
        } else {
            s.paused = false;
            self.events.push(SinkEvent::Started(sink));
        }
    }

    fn pause(&mut self, sink: SinkId) {
        self.sinks[sink.0 as usize].paused = true;
    }

    fn release(&mut self, sink: SinkId) {
        let s = &mut self.sinks[sink.0 as usize];
        s.paused = true;
        s.released = true;
    }

    fn set_volume(&mut self, sink: SinkId, volume: f32) {
        self.sinks[sink.0 as usize].volume = volume;
    }

    fn volume(&self, sink: SinkId) -> f32 {
        self.sink(sink).volume
    }

    fn set_position(&mut self, sink: SinkId, secs: f64) {
        self.sinks[sink.0 as usize].position = secs;
    }

    fn position(&self, sink: SinkId) -> f64 {
        self.sink(sink).position
    }

    fn duration(&self, sink: SinkId) -> f64 {
        self.sink(sink).duration
    }

    fn is_paused(&self, sink: SinkId) -> bool {
        self.sink(sink).paused
    }

    fn play_one_shot(&mut self, path: &str, volume: f32) {
        self.one_shots.push((path.to_string(), volume));
    }

    fn drain_events(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }
}

pub const SCENE_ONE: ElementKey = ElementKey(1);
pub const SCENE_TWO: ElementKey = ElementKey(2);
pub const SCENE_THREE: ElementKey = ElementKey(3);
pub const SEAM_ONE_TWO: ElementKey = ElementKey(10);
pub const SEAM_TWO_THREE: ElementKey = ElementKey(11);
pub const SCENE_TWO_LAYER: ElementKey = ElementKey(20);
pub const SCENE_ONE_SHAKE: ElementKey = ElementKey(30);
pub const SCENE_TWO_SHAKE: ElementKey = ElementKey(31);

pub const VIEWPORT: f64 = 800.0;

fn part_height(part: Part) -> f64 {
    match part {
        Part::SceneOne => 1000.0,
        Part::SeamOneTwo | Part::SeamTwoThree => 200.0,
        Part::SceneTwo => 2400.0,
        Part::SceneThree => 1600.0,
        Part::MainContent => 3000.0,
        Part::Navbar | Part::MusicPlayer => 0.0,
    }
}

fn part_of(key: ElementKey) -> Option<Part> {
    match key {
        SCENE_ONE | SCENE_ONE_SHAKE => Some(Part::SceneOne),
        SEAM_ONE_TWO => Some(Part::SeamOneTwo),
        SCENE_TWO | SCENE_TWO_LAYER | SCENE_TWO_SHAKE => Some(Part::SceneTwo),
        SEAM_TWO_THREE => Some(Part::SeamTwoThree),
        SCENE_THREE => Some(Part::SceneThree),
        _ => None,
    }
}

/// Parts stacked top to bottom in declaration order.
#[derive(Debug, Default)]
pub struct FakeStage {
    pub scroll: f64,
    pub mounted: Vec<Part>,
    pub shakes: HashMap<ElementKey, ShakeTransform>,
    pub layers: HashMap<ElementKey, LayerTransform>,
    pub offsets: HashMap<ElementKey, f32>,
    pub portal: bool,
    pub scroll_calls: usize,
}

impl FakeStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self, part: Part) -> bool {
        self.mounted.contains(&part)
    }
}

impl Layout for FakeStage {
    fn rect(&self, key: ElementKey) -> Option<Rect> {
        let part = part_of(key)?;
        if !self.is_mounted(part) {
            return None;
        }
        let top = Part::ALL
            .iter()
            .take_while(|p| **p != part)
            .filter(|p| self.is_mounted(**p))
            .map(|p| part_height(*p))
            .sum();
        Some(Rect::new(top, part_height(part)))
    }

    fn viewport_height(&self) -> f64 {
        VIEWPORT
    }
}

impl Stage for FakeStage {
    fn scroll_y(&self) -> f64 {
        self.scroll
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll = y;
        self.scroll_calls += 1;
    }

    fn set_mounted(&mut self, part: Part, mounted: bool) {
        self.mounted.retain(|p| *p != part);
        if mounted {
            self.mounted.push(part);
        }
    }

    fn is_attached(&self, key: ElementKey) -> bool {
        part_of(key).map_or(false, |p| self.is_mounted(p))
    }

    fn apply_shake(&mut self, key: ElementKey, transform: ShakeTransform) {
        self.shakes.insert(key, transform);
    }

    fn apply_layer(&mut self, key: ElementKey, transform: LayerTransform) {
        self.layers.insert(key, transform);
    }

    fn set_offset_y(&mut self, key: ElementKey, y: f32) {
        self.offsets.insert(key, y);
    }

    fn set_portal_visible(&mut self, visible: bool) {
        self.portal = visible;
    }
}

pub fn catalog() -> SceneCatalog {
    let mut one = SceneSpec::new(SCENE_ONE);
    one.shake.push((SCENE_ONE_SHAKE, 0.5));
    let mut two = SceneSpec::new(SCENE_TWO);
    two.layers
        .push((SCENE_TWO_LAYER, LayerSpec::new(5.0, 120.0, 1.0, 100.0, 4.0, 4.8)));
    two.shake.push((SCENE_TWO_SHAKE, 0.4));
    SceneCatalog {
        scenes: [one, two, SceneSpec::new(SCENE_THREE)],
        seam_one_two: SEAM_ONE_TWO,
        seam_two_three: SEAM_TWO_THREE,
    }
}
