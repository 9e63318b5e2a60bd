//! Intro orchestration.
//!
//! The director owns the intro state and derives everything else from it:
//! which page parts are mounted, which scroll zones exist, which music and
//! ambient loops run. Transitions only ever move forward
//! (`Phase1 → Phase2 → Phase3 → MainSite`). Side effects that need the page
//! (scrolling, layout reads, transforms) are applied from [`Director::frame`]
//! through the host's [`Stage`].

use crate::audio::{AmbientId, AudioBackend, AudioRegistry};
use crate::constants::*;
use crate::layout::{ElementKey, Part, Stage};
use crate::parallax::{LayerSpec, ParallaxDriver};
use crate::quake::QuakeDriver;
use crate::scroll::{Anchor, ScrollTracker, ZoneEvent, ZoneEventKind, ZoneSpec};
use crate::ticker::Tick;
use crate::tween::{ScrollTween, Timers};
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntroState {
    Phase1,
    Phase2,
    Phase3,
    MainSite,
}

impl IntroState {
    pub fn initial(skip_intro: bool) -> Self {
        if skip_intro {
            IntroState::MainSite
        } else {
            IntroState::Phase1
        }
    }

    pub fn phase(self) -> u8 {
        match self {
            IntroState::Phase1 => 1,
            IntroState::Phase2 => 2,
            IntroState::Phase3 | IntroState::MainSite => 3,
        }
    }

    pub fn shows_intro(self) -> bool {
        self != IntroState::MainSite
    }

    /// Scene one was clicked.
    pub fn activate(self) -> Option<Self> {
        match self {
            IntroState::Phase1 => Some(IntroState::Phase2),
            _ => None,
        }
    }

    /// The portal was entered.
    pub fn enter(self) -> Option<Self> {
        match self {
            IntroState::Phase1 | IntroState::Phase2 => Some(IntroState::Phase3),
            _ => None,
        }
    }

    /// The intro is removed and scene three becomes the top of the page.
    pub fn collapse(self) -> Option<Self> {
        match self {
            IntroState::Phase3 => Some(IntroState::MainSite),
            _ => None,
        }
    }

    pub fn parts(self) -> SmallVec<[Part; 8]> {
        use Part::*;
        match self {
            IntroState::Phase1 => SmallVec::from_slice(&[SceneOne]),
            IntroState::Phase2 => SmallVec::from_slice(&[SceneOne, SeamOneTwo, SceneTwo]),
            IntroState::Phase3 => SmallVec::from_slice(&Part::ALL),
            IntroState::MainSite => {
                SmallVec::from_slice(&[SceneThree, MainContent, Navbar, MusicPlayer])
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneId {
    One,
    Two,
    Three,
}

impl SceneId {
    pub const ALL: [SceneId; 3] = [SceneId::One, SceneId::Two, SceneId::Three];

    pub fn part(self) -> Part {
        match self {
            SceneId::One => Part::SceneOne,
            SceneId::Two => Part::SceneTwo,
            SceneId::Three => Part::SceneThree,
        }
    }

    pub fn from_part(part: Part) -> Option<Self> {
        SceneId::ALL.into_iter().find(|s| s.part() == part)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seam {
    OneTwo,
    TwoThree,
}

/// Payload attached to every zone the director creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Music(SceneId),
    CollapseIntro,
    SceneScroll(SceneId),
    Seam(Seam),
}

/// Host-side description of a scene's elements.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    pub root: ElementKey,
    pub layers: Vec<(ElementKey, LayerSpec)>,
    pub shake: Vec<(ElementKey, f32)>,
}

impl SceneSpec {
    pub fn new(root: ElementKey) -> Self {
        Self {
            root,
            layers: Vec::new(),
            shake: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneCatalog {
    pub scenes: [SceneSpec; 3],
    pub seam_one_two: ElementKey,
    pub seam_two_three: ElementKey,
}

impl SceneCatalog {
    pub fn scene(&self, id: SceneId) -> &SceneSpec {
        &self.scenes[id.index()]
    }

    fn seam(&self, seam: Seam) -> ElementKey {
        match seam {
            Seam::OneTwo => self.seam_one_two,
            Seam::TwoThree => self.seam_two_three,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackSpec {
    pub id: &'static str,
    pub path: &'static str,
    pub volume: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectorConfig {
    /// Music bound to scenes one, two and three.
    pub scene_tracks: [TrackSpec; 3],
    pub thunder_path: &'static str,
    pub quake_sfx_path: &'static str,
    pub fade_secs: f64,
    pub layout_delay_secs: f64,
    pub quake_seed: u64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            scene_tracks: [
                TrackSpec {
                    id: "scene1",
                    path: "/audio/music/scene1.mp3",
                    volume: 0.6,
                },
                TrackSpec {
                    id: "scene2",
                    path: "/audio/music/scene2.mp3",
                    volume: 0.6,
                },
                TrackSpec {
                    id: "scene3",
                    path: "/audio/music/Kids.mp3",
                    volume: 0.8,
                },
            ],
            thunder_path: "/audio/sfx/thunder.mp3",
            quake_sfx_path: "/audio/sfx/erathquake.mp3",
            fade_secs: DEFAULT_FADE_SEC,
            layout_delay_secs: LAYOUT_DELAY_SEC,
            quake_seed: 0x00AD_7A17_A026,
        }
    }
}

impl DirectorConfig {
    pub fn track_id(&self, scene: SceneId) -> &'static str {
        self.scene_tracks[scene.index()].id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    SettleQuake,
    ScrollToSceneTwo,
    RevealSceneThree,
    Collapse,
}

pub struct Director<B: AudioBackend> {
    config: DirectorConfig,
    catalog: SceneCatalog,
    state: IntroState,
    audio: AudioRegistry<B>,
    zones: ScrollTracker<Cue>,
    quake: QuakeDriver,
    parallax: FnvHashMap<SceneId, ParallaxDriver>,
    timers: Timers<Deferred>,
    scroll_tween: Option<ScrollTween<Deferred>>,
    thunder: Option<AmbientId>,
    entering: bool,
    intro_removed: bool,
    mounted: SmallVec<[Part; 8]>,
    needs_refresh: bool,
    reset_scroll: bool,
    portal_visible: bool,
    pointer: Vec2,
    now: f64,
}

impl<B: AudioBackend> Director<B> {
    pub fn new(
        config: DirectorConfig,
        catalog: SceneCatalog,
        mut audio: AudioRegistry<B>,
        skip_intro: bool,
    ) -> Self {
        for track in &config.scene_tracks {
            audio.register(track.id, track.path, track.volume);
        }
        let quake = QuakeDriver::new(config.quake_seed);
        let mut director = Self {
            config,
            catalog,
            state: IntroState::initial(skip_intro),
            audio,
            zones: ScrollTracker::new(),
            quake,
            parallax: FnvHashMap::default(),
            timers: Timers::new(),
            scroll_tween: None,
            thunder: None,
            entering: false,
            intro_removed: false,
            mounted: SmallVec::new(),
            needs_refresh: true,
            reset_scroll: false,
            portal_visible: false,
            pointer: Vec2::ZERO,
            now: 0.0,
        };
        log::info!("[director] starting in {:?}", director.state);
        director.reconcile_effects();
        if !director.state.shows_intro() {
            director.enter_main_site();
        }
        director
    }

    // ---------------- queries ----------------

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn phase(&self) -> u8 {
        self.state.phase()
    }

    pub fn shows_intro(&self) -> bool {
        self.state.shows_intro()
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn audio(&self) -> &AudioRegistry<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioRegistry<B> {
        &mut self.audio
    }

    pub fn zones(&self) -> &ScrollTracker<Cue> {
        &self.zones
    }

    pub fn has_zone(&self, cue: Cue) -> bool {
        self.zones.contains(&cue)
    }

    pub fn quake(&self) -> &QuakeDriver {
        &self.quake
    }

    pub fn mounted(&self) -> &[Part] {
        &self.mounted
    }

    pub fn parallax(&self, scene: SceneId) -> Option<&ParallaxDriver> {
        self.parallax.get(&scene)
    }

    pub fn thunder_active(&self) -> bool {
        self.thunder.is_some()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_tween.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn portal_visible(&self) -> bool {
        self.portal_visible
    }

    // ---------------- inputs ----------------

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn register_shake_targets(&mut self, targets: &[(ElementKey, f32)]) {
        self.quake.register_all(targets);
    }

    /// Scene one was clicked: shake, switch to scene-one music and reveal
    /// scene two.
    pub fn activate(&mut self) {
        let Some(next) = self.state.activate() else {
            log::debug!("[director] activate ignored in {:?}", self.state);
            return;
        };
        self.audio.unlock();
        self.audio
            .play_one_shot(self.config.quake_sfx_path, QUAKE_SFX_VOLUME);
        let track = self.config.track_id(SceneId::One);
        self.audio.play(track, self.config.fade_secs);
        self.quake
            .set_levels(QUAKE_SHAKE_AMPLITUDE, QUAKE_SHAKE_FREQUENCY);
        self.transition(next);
        self.timers
            .schedule(self.now + self.config.layout_delay_secs, Deferred::SettleQuake);
    }

    /// The portal was clicked: reveal scene three, scroll to it and drop
    /// the intro once there.
    pub fn enter_website(&mut self) {
        if self.entering {
            return;
        }
        let Some(next) = self.state.enter() else {
            return;
        };
        self.entering = true;
        self.audio.unlock();
        self.transition(next);
        self.timers.schedule(
            self.now + self.config.layout_delay_secs,
            Deferred::RevealSceneThree,
        );
    }

    // ---------------- lifecycle ----------------

    /// Apply the initial mounts, start at the top and lay out the zones.
    pub fn mount<S: Stage>(&mut self, stage: &mut S) {
        self.sync_mounts(stage);
        stage.scroll_to(0.0);
        self.zones.refresh(&*stage);
        self.needs_refresh = false;
    }

    /// Tear down every zone, loop, timer and mounted part.
    pub fn unmount<S: Stage>(&mut self, stage: &mut S) {
        self.zones.clear();
        if let Some(id) = self.thunder.take() {
            self.audio.stop_ambient(id);
        }
        self.timers.clear();
        self.scroll_tween = None;
        for part in std::mem::take(&mut self.mounted) {
            stage.set_mounted(part, false);
        }
        self.parallax.clear();
        log::info!("[director] unmounted");
    }

    pub fn frame<S: Stage>(&mut self, tick: Tick, stage: &mut S) {
        self.now = tick.now;
        let dt = tick.dt as f32;

        for action in self.timers.take_due(tick.now) {
            self.run_deferred(action, stage);
        }
        self.step_scroll_tween(tick.dt, stage);

        self.sync_mounts(stage);
        if self.reset_scroll {
            self.reset_scroll = false;
            stage.scroll_to(0.0);
            self.needs_refresh = true;
        }
        if self.needs_refresh {
            self.needs_refresh = false;
            self.zones.refresh(&*stage);
        }

        let events = self.zones.update(stage.scroll_y());
        for event in events {
            self.handle_zone_event(event, stage);
        }

        self.audio.tick(tick.now);

        let shakes = self.quake.step(dt, |key| stage.is_attached(key));
        for (key, transform) in shakes {
            stage.apply_shake(key, transform);
        }

        for scene in SceneId::ALL {
            if let Some(driver) = self.parallax.get_mut(&scene) {
                driver.set_pointer(self.pointer);
                for (key, transform) in driver.step(dt) {
                    stage.apply_layer(key, transform);
                }
            }
        }
    }

    // ---------------- internals ----------------

    fn transition(&mut self, next: IntroState) {
        debug_assert!(next > self.state, "intro state must move forward");
        log::info!("[director] {:?} -> {:?}", self.state, next);
        self.state = next;
        self.reconcile_effects();
    }

    fn collapse(&mut self) {
        if self.intro_removed {
            return;
        }
        if let Some(next) = self.state.collapse() {
            self.intro_removed = true;
            self.scroll_tween = None;
            self.transition(next);
            self.reset_scroll = true;
            self.enter_main_site();
        }
    }

    fn enter_main_site(&mut self) {
        let track = self.config.track_id(SceneId::Three);
        if self.audio.is_unlocked() && self.audio.active_track_id() != Some(track) {
            self.audio.play(track, self.config.fade_secs);
        }
    }

    fn desired_cues(&self) -> SmallVec<[Cue; 10]> {
        let state = self.state;
        let mut cues = SmallVec::new();
        if state.shows_intro() {
            cues.push(Cue::Music(SceneId::One));
        }
        if state.shows_intro() && state.phase() >= 2 {
            cues.push(Cue::Music(SceneId::Two));
            cues.push(Cue::Seam(Seam::OneTwo));
        }
        if state.phase() >= 3 {
            cues.push(Cue::Music(SceneId::Three));
        }
        if state == IntroState::Phase3 {
            cues.push(Cue::CollapseIntro);
            cues.push(Cue::Seam(Seam::TwoThree));
        }
        for part in state.parts() {
            if let Some(scene) = SceneId::from_part(part) {
                cues.push(Cue::SceneScroll(scene));
            }
        }
        cues
    }

    /// Bring zones and ambient audio in line with the current state.
    fn reconcile_effects(&mut self) {
        let desired = self.desired_cues();
        self.zones.retain(|cue| desired.contains(cue));
        for cue in desired {
            if !self.zones.contains(&cue) {
                let spec = self.zone_spec(cue);
                self.zones.create(spec);
            }
        }
        self.needs_refresh = true;

        let wants_thunder = self.state == IntroState::Phase1;
        match self.thunder {
            None if wants_thunder && self.audio.is_unlocked() => {
                self.thunder =
                    self.audio
                        .start_ambient(self.config.thunder_path, THUNDER_VOLUME, THUNDER_FADE_SEC);
            }
            Some(id) if !wants_thunder => {
                self.audio.stop_ambient(id);
                self.thunder = None;
            }
            _ => {}
        }
    }

    fn zone_spec(&self, cue: Cue) -> ZoneSpec<Cue> {
        let root = |scene: SceneId| Some(self.catalog.scene(scene).root);
        let (trigger, start, end, scrub) = match cue {
            Cue::Music(SceneId::One) => (
                None,
                Anchor::TOP_TOP,
                Some(Anchor::TopOf(self.catalog.scene(SceneId::Two).root)),
                false,
            ),
            Cue::Music(scene) => (
                root(scene),
                Anchor::edge(0.0, 0.6),
                Some(Anchor::edge(1.0, 0.6)),
                false,
            ),
            Cue::CollapseIntro => (root(SceneId::Three), Anchor::TOP_TOP, None, false),
            Cue::Seam(seam) => {
                let scene = match seam {
                    Seam::OneTwo => SceneId::Two,
                    Seam::TwoThree => SceneId::Three,
                };
                (root(scene), Anchor::edge(0.0, 0.9), Some(Anchor::TOP_TOP), true)
            }
            Cue::SceneScroll(scene) => (
                root(scene),
                Anchor::TOP_TOP,
                Some(Anchor::BOTTOM_BOTTOM),
                true,
            ),
        };
        ZoneSpec {
            trigger,
            start,
            end,
            scrub,
            action: cue,
        }
    }

    fn handle_zone_event<S: Stage>(&mut self, event: ZoneEvent<Cue>, stage: &mut S) {
        // A transition earlier in this batch may have retired the zone.
        if !self.zones.contains(&event.action) {
            return;
        }
        match (event.action, event.kind) {
            (Cue::Music(scene), ZoneEventKind::Enter | ZoneEventKind::EnterBack) => {
                let track = self.config.track_id(scene);
                self.audio.play(track, self.config.fade_secs);
            }
            (Cue::CollapseIntro, ZoneEventKind::Enter) => {
                if !self.intro_removed {
                    log::info!("[director] scrolled into scene three; dropping intro");
                    self.collapse();
                }
            }
            (Cue::Seam(seam), ZoneEventKind::Progress(p)) => {
                stage.set_offset_y(self.catalog.seam(seam), SEAM_TRAVEL_PX * p);
            }
            (Cue::SceneScroll(scene), ZoneEventKind::Progress(p)) => {
                if let Some(driver) = self.parallax.get_mut(&scene) {
                    driver.set_scroll_progress(p);
                }
                if scene == SceneId::Two {
                    self.set_portal_visible(p > PORTAL_REVEAL_PROGRESS, stage);
                }
            }
            _ => {}
        }
    }

    fn set_portal_visible<S: Stage>(&mut self, visible: bool, stage: &mut S) {
        if self.portal_visible != visible {
            self.portal_visible = visible;
            stage.set_portal_visible(visible);
        }
    }

    fn run_deferred<S: Stage>(&mut self, action: Deferred, stage: &mut S) {
        match action {
            Deferred::SettleQuake => {
                self.needs_refresh = true;
                self.quake.settle(
                    (QUAKE_SHAKE_AMPLITUDE, QUAKE_SHAKE_FREQUENCY),
                    (QUAKE_BASE_AMPLITUDE, QUAKE_BASE_FREQUENCY),
                    QUAKE_SETTLE_SEC,
                );
                self.timers
                    .schedule(self.now + SCENE_TWO_SCROLL_DELAY_SEC, Deferred::ScrollToSceneTwo);
            }
            Deferred::ScrollToSceneTwo => {
                // The portal may already have been entered.
                if self.state != IntroState::Phase2 {
                    return;
                }
                let root = self.catalog.scene(SceneId::Two).root;
                match stage.rect(root) {
                    Some(rect) => {
                        self.scroll_tween = Some(ScrollTween::new(
                            stage.scroll_y(),
                            rect.top,
                            SCENE_TWO_SCROLL_SEC,
                            None,
                        ));
                    }
                    None => log::warn!("[director] scene two not laid out; skipping scroll"),
                }
            }
            Deferred::RevealSceneThree => {
                // Scrolling may already have dropped the intro.
                if self.state != IntroState::Phase3 {
                    return;
                }
                let track = self.config.track_id(SceneId::Three);
                self.audio.play(track, self.config.fade_secs);
                let root = self.catalog.scene(SceneId::Three).root;
                match stage.rect(root) {
                    Some(rect) => {
                        self.scroll_tween = Some(ScrollTween::new(
                            stage.scroll_y(),
                            rect.top,
                            SCENE_THREE_SCROLL_SEC,
                            Some(Deferred::Collapse),
                        ));
                    }
                    None => {
                        log::warn!("[director] scene three missing; dropping intro in place");
                        self.collapse();
                    }
                }
            }
            Deferred::Collapse => self.collapse(),
        }
    }

    fn step_scroll_tween<S: Stage>(&mut self, dt: f64, stage: &mut S) {
        let Some(scroll) = self.scroll_tween.as_mut() else {
            return;
        };
        stage.scroll_to(scroll.tween.step(dt));
        if scroll.tween.is_done() {
            if let Some(action) = self.scroll_tween.take().and_then(|s| s.on_complete) {
                self.run_deferred(action, stage);
            }
        }
    }

    fn sync_mounts<S: Stage>(&mut self, stage: &mut S) {
        let desired = self.state.parts();
        let mut changed = false;
        for part in Part::ALL {
            let want = desired.contains(&part);
            let have = self.mounted.contains(&part);
            if want == have {
                continue;
            }
            changed = true;
            stage.set_mounted(part, want);
            if want {
                self.mounted.push(part);
                self.on_mount(part);
            } else {
                self.mounted.retain(|p| *p != part);
                self.on_unmount(part, stage);
            }
        }
        if changed {
            self.needs_refresh = true;
        }
    }

    fn on_mount(&mut self, part: Part) {
        let Some(scene) = SceneId::from_part(part) else {
            return;
        };
        let spec = self.catalog.scene(scene);
        self.quake.register_all(&spec.shake);
        self.parallax
            .insert(scene, ParallaxDriver::from_layers(&spec.layers));
        log::debug!(
            "[director] mounted {:?}: {} layers, {} shake targets",
            scene,
            spec.layers.len(),
            spec.shake.len()
        );
    }

    fn on_unmount<S: Stage>(&mut self, part: Part, stage: &mut S) {
        let Some(scene) = SceneId::from_part(part) else {
            return;
        };
        self.parallax.remove(&scene);
        if scene == SceneId::Two {
            self.set_portal_visible(false, stage);
        }
    }
}
