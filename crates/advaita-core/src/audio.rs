//! Track registry with crossfades, ambient loops and one-shot effects.
//!
//! Playback itself is delegated to an [`AudioBackend`]; the registry only
//! decides which sink plays at which volume. Starting playback is
//! asynchronous on every real platform, so a backend reports the outcome
//! later through [`SinkEvent`]s that [`AudioRegistry::tick`] drains.

use crate::constants::DEFAULT_FADE_SEC;
use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AmbientId(u32);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("could not load {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("unknown track {0}")]
    UnknownTrack(String),
}

/// Outcome notifications a backend queues for the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Started(SinkId),
    Failed(SinkId, AudioError),
    Ended(SinkId),
}

/// Platform playback primitives.
pub trait AudioBackend {
    fn create(&mut self, path: &str, looping: bool) -> Result<SinkId, AudioError>;
    /// Request playback; the outcome arrives later as `Started` or `Failed`.
    fn play(&mut self, sink: SinkId);
    fn pause(&mut self, sink: SinkId);
    /// Stop and drop the underlying resource. The id must not be reused.
    fn release(&mut self, sink: SinkId);
    fn set_volume(&mut self, sink: SinkId, volume: f32);
    fn volume(&self, sink: SinkId) -> f32;
    fn set_position(&mut self, sink: SinkId, secs: f64);
    fn position(&self, sink: SinkId) -> f64;
    /// 0 while unknown.
    fn duration(&self, sink: SinkId) -> f64;
    fn is_paused(&self, sink: SinkId) -> bool;
    /// Fire-and-forget, non-looping playback of an unregistered source.
    fn play_one_shot(&mut self, path: &str, volume: f32);
    fn drain_events(&mut self) -> Vec<SinkEvent>;
}

/// Snapshot returned by [`AudioRegistry::state`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackState {
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub volume: f32,
}

#[derive(Clone, Debug)]
struct Track {
    id: String,
    sink: SinkId,
    target_volume: f32,
}

/// What to do once a fade lands on its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDone {
    Nothing,
    PauseAndRewind,
}

#[derive(Clone, Debug)]
struct Fade {
    sink: SinkId,
    from: Option<f32>,
    target: f32,
    duration: f64,
    started_at: Option<f64>,
    then: FadeDone,
}

type EndedCallback<B> = Box<dyn FnMut(&mut AudioRegistry<B>)>;

pub struct AudioRegistry<B: AudioBackend> {
    backend: B,
    tracks: Vec<Track>,
    index: FnvHashMap<String, usize>,
    active: Option<String>,
    unlocked: bool,
    fades: Vec<Fade>,
    pending_fade_in: FnvHashMap<SinkId, (f32, f64)>,
    ambients: FnvHashMap<AmbientId, SinkId>,
    next_ambient: u32,
    ended: FnvHashMap<String, EndedCallback<B>>,
}

impl<B: AudioBackend> AudioRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tracks: Vec::new(),
            index: FnvHashMap::default(),
            active: None,
            unlocked: false,
            fades: Vec::new(),
            pending_fade_in: FnvHashMap::default(),
            ambients: FnvHashMap::default(),
            next_ambient: 0,
            ended: FnvHashMap::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Create a looping track; an existing id is left untouched.
    pub fn register(&mut self, id: &str, path: &str, volume: f32) {
        if self.index.contains_key(id) {
            return;
        }
        let sink = match self.backend.create(path, true) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[audio] register {} failed: {}", id, e);
                return;
            }
        };
        self.backend.set_volume(sink, 0.0);
        self.index.insert(id.to_string(), self.tracks.len());
        self.tracks.push(Track {
            id: id.to_string(),
            sink,
            target_volume: volume,
        });
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn track_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.id.as_str())
    }

    pub fn unlock(&mut self) {
        if !self.unlocked {
            log::info!("[audio] unlocked");
        }
        self.unlocked = true;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn active_track_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn play_default(&mut self, id: &str) {
        self.play(id, DEFAULT_FADE_SEC);
    }

    /// Make `id` the foreground track, crossfading out the previous one.
    pub fn play(&mut self, id: &str, fade_secs: f64) {
        if !self.unlocked {
            log::debug!("[audio] locked; skipping play {}", id);
            return;
        }
        let previous = self.active.replace(id.to_string());
        log::info!("[audio] transitioning to {}", id);

        for i in 0..self.tracks.len() {
            let (sink, target_volume) = (self.tracks[i].sink, self.tracks[i].target_volume);
            let was_active = previous.as_deref() == Some(self.tracks[i].id.as_str());
            if self.tracks[i].id == id {
                self.backend.set_volume(sink, 0.0);
                self.backend.play(sink);
                self.pending_fade_in.insert(sink, (target_volume, fade_secs));
            } else if was_active
                && self.backend.position(sink) > 0.0
                && !self.backend.is_paused(sink)
            {
                self.fade(sink, 0.0, fade_secs, FadeDone::PauseAndRewind);
            } else {
                self.backend.set_volume(sink, 0.0);
                self.backend.pause(sink);
            }
        }
    }

    pub fn play_one_shot(&mut self, path: &str, volume: f32) {
        if !self.unlocked {
            return;
        }
        self.backend.play_one_shot(path, volume);
    }

    pub fn pause(&mut self, id: &str) {
        if let Some(sink) = self.sink_of(id) {
            if !self.backend.is_paused(sink) {
                self.backend.pause(sink);
            }
        }
    }

    pub fn resume(&mut self, id: &str) {
        let Some(track) = self.track(id).cloned() else {
            return;
        };
        if self.backend.is_paused(track.sink) {
            self.backend.play(track.sink);
            if self.backend.volume(track.sink) < track.target_volume {
                self.backend.set_volume(track.sink, track.target_volume);
            }
        }
    }

    /// Pause every track and ambient loop without touching the active pointer.
    pub fn pause_all(&mut self) {
        let sinks: Vec<SinkId> = self
            .tracks
            .iter()
            .map(|t| t.sink)
            .chain(self.ambients.values().copied())
            .collect();
        for sink in sinks {
            if !self.backend.is_paused(sink) {
                self.backend.pause(sink);
            }
        }
    }

    /// Resume the active track and every ambient loop.
    pub fn resume_active(&mut self) {
        if let Some(id) = self.active.clone() {
            self.resume(&id);
        }
        let ambients: Vec<SinkId> = self.ambients.values().copied().collect();
        for sink in ambients {
            if self.backend.is_paused(sink) {
                self.backend.play(sink);
            }
        }
    }

    pub fn set_volume(&mut self, id: &str, volume: f32) {
        if let Some(sink) = self.sink_of(id) {
            self.backend.set_volume(sink, volume);
        }
    }

    pub fn seek(&mut self, id: &str, secs: f64) {
        if let Some(sink) = self.sink_of(id) {
            self.backend.set_position(sink, secs);
        }
    }

    /// Replace the single "track finished" callback for `id`.
    pub fn set_ended_callback(
        &mut self,
        id: &str,
        callback: impl FnMut(&mut AudioRegistry<B>) + 'static,
    ) {
        if self.index.contains_key(id) {
            self.ended.insert(id.to_string(), Box::new(callback));
        }
    }

    pub fn state(&self, id: &str) -> Option<TrackState> {
        let sink = self.sink_of(id)?;
        let duration = self.backend.duration(sink);
        Some(TrackState {
            current_time: self.backend.position(sink),
            duration: if duration.is_finite() { duration } else { 0.0 },
            paused: self.backend.is_paused(sink),
            volume: self.backend.volume(sink),
        })
    }

    pub fn target_volume(&self, id: &str) -> Option<f32> {
        self.track(id).map(|t| t.target_volume)
    }

    /// Start a looping sound outside the track set, fading it in at once.
    pub fn start_ambient(&mut self, path: &str, volume: f32, fade_secs: f64) -> Option<AmbientId> {
        if !self.unlocked {
            return None;
        }
        let sink = match self.backend.create(path, true) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[audio] ambient {} failed: {}", path, e);
                return None;
            }
        };
        self.backend.set_volume(sink, 0.0);
        self.backend.play(sink);
        self.fade(sink, volume, fade_secs, FadeDone::Nothing);
        let id = AmbientId(self.next_ambient);
        self.next_ambient += 1;
        self.ambients.insert(id, sink);
        Some(id)
    }

    pub fn stop_ambient(&mut self, id: AmbientId) {
        if let Some(sink) = self.ambients.remove(&id) {
            self.fades.retain(|f| f.sink != sink);
            self.backend.pause(sink);
            self.backend.release(sink);
        }
    }

    pub fn ambient_count(&self) -> usize {
        self.ambients.len()
    }

    /// Queue a linear volume ramp. Fades already running on the same sink
    /// are not cancelled; the one stepped last in a frame wins.
    pub fn fade(&mut self, sink: SinkId, target: f32, duration: f64, then: FadeDone) {
        self.fades.push(Fade {
            sink,
            from: None,
            target,
            duration,
            started_at: None,
            then,
        });
    }

    pub fn fades_in_flight(&self) -> usize {
        self.fades.len()
    }

    pub fn sink_of(&self, id: &str) -> Option<SinkId> {
        self.track(id).map(|t| t.sink)
    }

    /// Advance playback bookkeeping to `now` (seconds, monotonic).
    pub fn tick(&mut self, now: f64) {
        for event in self.backend.drain_events() {
            match event {
                SinkEvent::Started(sink) => {
                    if let Some((target, secs)) = self.pending_fade_in.remove(&sink) {
                        log::debug!("[audio] sink {:?} started", sink);
                        self.fade(sink, target, secs, FadeDone::Nothing);
                    }
                }
                SinkEvent::Failed(sink, err) => {
                    self.pending_fade_in.remove(&sink);
                    log::error!("[audio] play failed on {:?}: {}", sink, err);
                }
                SinkEvent::Ended(sink) => self.dispatch_ended(sink),
            }
        }
        self.step_fades(now);
    }

    fn step_fades(&mut self, now: f64) {
        let mut finished = Vec::new();
        for (i, fade) in self.fades.iter_mut().enumerate() {
            let from = match fade.from {
                Some(v) => v,
                None => {
                    let v = self.backend.volume(fade.sink);
                    fade.from = Some(v);
                    v
                }
            };
            let started_at = *fade.started_at.get_or_insert(now);
            let elapsed = now - started_at;
            if fade.duration <= 0.0 || elapsed >= fade.duration {
                self.backend.set_volume(fade.sink, fade.target);
                finished.push(i);
            } else {
                let t = (elapsed / fade.duration) as f32;
                self.backend
                    .set_volume(fade.sink, from + (fade.target - from) * t);
            }
        }
        for i in finished.into_iter().rev() {
            let fade = self.fades.remove(i);
            if fade.then == FadeDone::PauseAndRewind {
                self.backend.pause(fade.sink);
                self.backend.set_position(fade.sink, 0.0);
            }
        }
    }

    fn dispatch_ended(&mut self, sink: SinkId) {
        let Some(id) = self.tracks.iter().find(|t| t.sink == sink).map(|t| t.id.clone()) else {
            return;
        };
        if let Some(mut callback) = self.ended.remove(&id) {
            callback(self);
            // Keep the callback unless it was replaced while running.
            self.ended.entry(id).or_insert(callback);
        }
    }

    fn track(&self, id: &str) -> Option<&Track> {
        self.index.get(id).map(|&i| &self.tracks[i])
    }
}
