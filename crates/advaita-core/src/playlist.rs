//! Model behind the floating cassette player.

use crate::audio::{AudioBackend, AudioError, AudioRegistry};
use crate::constants::{DEFAULT_FADE_SEC, PLAYLIST_VOLUME};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub path: &'static str,
}

/// The first entry is the scene-three track, registered by the director.
pub const PLAYLIST: &[PlaylistEntry] = &[
    PlaylistEntry {
        id: "scene3",
        title: "Kids",
        artist: "Stranger Things Score",
        path: "/audio/music/Kids.mp3",
    },
    PlaylistEntry {
        id: "track2",
        title: "End Of Beginning",
        artist: "Djo",
        path: "/audio/music/End of Beginning.mp3",
    },
    PlaylistEntry {
        id: "track3",
        title: "Running Up That Hill",
        artist: "Kate Bush",
        path: "/audio/music/Running Up That Hill.mp3",
    },
    PlaylistEntry {
        id: "track4",
        title: "Every Breath You Take",
        artist: "The Police",
        path: "/audio/music/Every Breath You Take.mp3",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Wrapping step through `len` entries.
#[inline]
pub fn step_index(index: usize, len: usize, dir: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    match dir {
        Direction::Next => (index + 1) % len,
        Direction::Prev => (index + len - 1) % len,
    }
}

/// `mm:ss`, or `00:00` for non-finite input.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Everything the widget renders.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub label: String,
    pub title: &'static str,
    pub artist: &'static str,
    pub time: String,
    pub progress_percent: f64,
    pub playing: bool,
}

#[derive(Clone, Debug)]
pub struct Playlist {
    entries: &'static [PlaylistEntry],
    index: usize,
    playing: bool,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(PLAYLIST)
    }
}

impl Playlist {
    pub fn new(entries: &'static [PlaylistEntry]) -> Self {
        Self {
            entries,
            index: 0,
            playing: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current(&self) -> Option<&PlaylistEntry> {
        self.entries.get(self.index)
    }

    /// Register every entry except the first (owned by the scenes) and make
    /// each track advance to the next one when it ends.
    pub fn register_all<B: AudioBackend + 'static>(&self, registry: &mut AudioRegistry<B>) {
        let entries = self.entries;
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                registry.register(entry.id, entry.path, PLAYLIST_VOLUME);
            }
            registry.set_ended_callback(entry.id, move |reg: &mut AudioRegistry<B>| {
                let next = &entries[step_index(i, entries.len(), Direction::Next)];
                log::info!("[player] {} ended, advancing to {}", entries[i].id, next.id);
                reg.play(next.id, DEFAULT_FADE_SEC);
            });
        }
    }

    pub fn change<B: AudioBackend>(&mut self, registry: &mut AudioRegistry<B>, dir: Direction) {
        if self.entries.is_empty() {
            return;
        }
        self.index = step_index(self.index, self.entries.len(), dir);
        registry.play(self.entries[self.index].id, DEFAULT_FADE_SEC);
        self.playing = true;
    }

    pub fn toggle<B: AudioBackend>(&mut self, registry: &mut AudioRegistry<B>) {
        let Some(entry) = self.current() else {
            return;
        };
        let id = entry.id;
        if self.playing {
            registry.pause(id);
            self.playing = false;
        } else {
            registry.resume(id);
            self.playing = true;
        }
    }

    /// Seek to `fraction` of the current track. Returns the new position.
    pub fn scrub<B: AudioBackend>(
        &mut self,
        registry: &mut AudioRegistry<B>,
        fraction: f64,
    ) -> Result<f64, AudioError> {
        let id = self.current().map(|e| e.id).unwrap_or_default();
        let state = registry
            .state(id)
            .ok_or_else(|| AudioError::UnknownTrack(id.to_string()))?;
        if state.duration <= 0.0 {
            return Ok(state.current_time);
        }
        let secs = fraction.clamp(0.0, 1.0) * state.duration;
        registry.seek(id, secs);
        Ok(secs)
    }

    /// Follow the registry: paused flag of the current entry and whichever
    /// entry is active.
    pub fn sync<B: AudioBackend>(&mut self, registry: &AudioRegistry<B>) {
        if let Some(state) = self.current().and_then(|e| registry.state(e.id)) {
            self.playing = !state.paused;
        }
        if let Some(active) = registry.active_track_id() {
            if let Some(found) = self.entries.iter().position(|e| e.id == active) {
                self.index = found;
            }
        }
    }

    pub fn view<B: AudioBackend>(&self, registry: &AudioRegistry<B>) -> Option<PlayerView> {
        let entry = self.current()?;
        let state = registry.state(entry.id);
        let (time, progress) = match state {
            Some(s) if s.duration > 0.0 => (s.current_time, s.current_time / s.duration * 100.0),
            Some(s) => (s.current_time, 0.0),
            None => (0.0, 0.0),
        };
        Some(PlayerView {
            label: format!("TAPE_0{}", self.index + 1),
            title: entry.title,
            artist: entry.artist,
            time: format_time(time),
            progress_percent: if progress.is_finite() { progress } else { 0.0 },
            playing: self.playing,
        })
    }
}
