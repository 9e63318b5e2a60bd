mod common;

use advaita_core::audio::{AudioRegistry, FadeDone};
use common::FakeBackend;

fn registry() -> AudioRegistry<FakeBackend> {
    let mut reg = AudioRegistry::new(FakeBackend::default());
    reg.register("scene1", "/audio/music/scene1.mp3", 0.6);
    reg.register("scene2", "/audio/music/scene2.mp3", 0.37);
    reg.register("scene3", "/audio/music/Kids.mp3", 0.8);
    reg
}

fn volume(reg: &AudioRegistry<FakeBackend>, id: &str) -> f32 {
    reg.state(id).map(|s| s.volume).unwrap_or(-1.0)
}

#[test]
fn register_with_repeated_id_keeps_first_track() {
    let mut reg = registry();
    let sink = reg.sink_of("scene1");
    let before = reg.state("scene1");
    reg.register("scene1", "/elsewhere.mp3", 0.1);
    assert_eq!(reg.sink_of("scene1"), sink);
    assert_eq!(reg.state("scene1"), before);
    assert_eq!(reg.target_volume("scene1"), Some(0.6));
    assert_eq!(reg.backend().sinks.len(), 3);
}

#[test]
fn registered_tracks_loop_and_start_silent() {
    let reg = registry();
    for sink in &reg.backend().sinks {
        assert!(sink.looping);
        assert_eq!(sink.volume, 0.0);
    }
    let ids: Vec<&str> = reg.track_ids().collect();
    assert_eq!(ids, ["scene1", "scene2", "scene3"]);
}

#[test]
fn failed_sink_creation_leaves_id_unregistered() {
    let mut backend = FakeBackend::default();
    backend.broken_paths.push("/missing.mp3".to_string());
    let mut reg = AudioRegistry::new(backend);
    reg.register("ghost", "/missing.mp3", 0.5);
    assert!(!reg.is_registered("ghost"));
    assert!(reg.state("ghost").is_none());
}

#[test]
fn play_while_locked_changes_nothing() {
    let mut reg = registry();
    reg.play_default("scene1");
    reg.tick(0.0);
    assert_eq!(reg.active_track_id(), None);
    assert!(reg.backend().sinks.iter().all(|s| s.play_requests == 0));
    assert!(reg.backend().playing().is_empty());
}

#[test]
fn active_track_updates_before_fade_completes() {
    let mut reg = registry();
    reg.unlock();
    reg.play_default("scene2");
    assert_eq!(reg.active_track_id(), Some("scene2"));
    assert_eq!(volume(&reg, "scene2"), 0.0);
}

#[test]
fn fade_in_lands_exactly_on_target() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene2", 1.5);
    reg.tick(10.0);
    assert_eq!(volume(&reg, "scene2"), 0.0);
    reg.tick(10.7);
    let mid = volume(&reg, "scene2");
    assert!(mid > 0.0 && mid < 0.37, "mid-fade volume {mid}");
    reg.tick(11.6);
    assert_eq!(volume(&reg, "scene2"), 0.37);
    assert_eq!(reg.fades_in_flight(), 0);
}

#[test]
fn zero_duration_fade_snaps() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene3", 0.0);
    reg.tick(0.0);
    assert_eq!(volume(&reg, "scene3"), 0.8);
}

#[test]
fn previous_track_fades_out_then_pauses_and_rewinds() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene1", 1.0);
    reg.tick(0.0);
    reg.tick(1.0);
    reg.backend_mut().advance(12.0);

    reg.play("scene2", 1.0);
    let scene1 = reg.sink_of("scene1").unwrap();
    assert!(!reg.backend().sink(scene1).paused, "outgoing track keeps playing");
    reg.tick(2.0);
    reg.tick(2.5);
    let fading = volume(&reg, "scene1");
    assert!(fading > 0.0 && fading < 0.6);
    reg.tick(3.0);
    let sink = reg.backend().sink(scene1);
    assert!(sink.paused);
    assert_eq!(sink.position, 0.0);
    assert_eq!(sink.volume, 0.0);
    assert_eq!(volume(&reg, "scene2"), 0.37);
}

#[test]
fn inactive_tracks_pause_immediately() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene1", 1.0);
    reg.tick(0.0);
    reg.play("scene2", 1.0);
    // scene1 never advanced, so it is not audibly playing
    let scene1 = reg.sink_of("scene1").unwrap();
    let scene3 = reg.sink_of("scene3").unwrap();
    assert!(reg.backend().sink(scene1).paused);
    assert!(reg.backend().sink(scene3).paused);
    assert_eq!(reg.backend().sink(scene3).volume, 0.0);
}

#[test]
fn rejected_play_keeps_pointer_but_never_fades_in() {
    let mut reg = registry();
    reg.backend_mut().reject = true;
    reg.unlock();
    reg.play("scene1", 1.0);
    reg.tick(0.0);
    reg.tick(2.0);
    assert_eq!(reg.active_track_id(), Some("scene1"));
    assert_eq!(volume(&reg, "scene1"), 0.0);
    assert_eq!(reg.fades_in_flight(), 0);
}

#[test]
fn overlapping_fades_race_with_last_writer_winning() {
    let mut reg = registry();
    let sink = reg.sink_of("scene1").unwrap();
    reg.set_volume("scene1", 0.5);
    reg.fade(sink, 1.0, 2.0, FadeDone::Nothing);
    reg.fade(sink, 0.0, 1.0, FadeDone::Nothing);
    reg.tick(0.0);
    reg.tick(1.0);
    assert_eq!(volume(&reg, "scene1"), 0.0);
    reg.tick(1.5);
    assert!((volume(&reg, "scene1") - 0.875).abs() < 1e-5);
    reg.tick(2.0);
    assert_eq!(volume(&reg, "scene1"), 1.0);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene3", 0.5);
    reg.tick(0.0);
    reg.tick(0.1);
    reg.pause("scene3");
    reg.pause("scene3");
    assert!(reg.state("scene3").unwrap().paused);
    reg.resume("scene3");
    let requests = reg.backend().sinks[2].play_requests;
    reg.resume("scene3");
    assert_eq!(reg.backend().sinks[2].play_requests, requests);
    // resume restores the target volume when the fade was interrupted
    assert_eq!(volume(&reg, "scene3"), 0.8);
}

#[test]
fn pause_all_then_resume_active() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene2", 0.0);
    reg.tick(0.0);
    reg.pause_all();
    assert!(reg.backend().playing().is_empty());
    assert_eq!(reg.active_track_id(), Some("scene2"));
    reg.resume_active();
    let playing = reg.backend().playing();
    assert_eq!(playing.len(), 1);
    assert_eq!(playing[0].path, "/audio/music/scene2.mp3");
}

#[test]
fn pause_all_covers_ambient_loops() {
    let mut reg = registry();
    reg.unlock();
    reg.play("scene1", 0.0);
    let id = reg.start_ambient("/audio/sfx/thunder.mp3", 0.3, 0.0).unwrap();
    reg.tick(0.0);
    assert_eq!(reg.backend().playing().len(), 2);

    reg.pause_all();
    assert!(reg.backend().playing().is_empty());

    reg.resume_active();
    let paths: Vec<&str> = reg.backend().playing().iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, ["/audio/music/scene1.mp3", "/audio/sfx/thunder.mp3"]);

    // stopped loops stay silent on resume
    reg.stop_ambient(id);
    reg.pause_all();
    reg.resume_active();
    assert_eq!(reg.backend().playing().len(), 1);
}

#[test]
fn ended_callback_can_switch_tracks() {
    let mut reg = registry();
    reg.unlock();
    reg.set_ended_callback("scene1", |reg| reg.play("scene2", 0.0));
    reg.play("scene1", 0.0);
    reg.tick(0.0);
    let sink = reg.sink_of("scene1").unwrap();
    reg.backend_mut().finish(sink);
    reg.tick(1.0);
    assert_eq!(reg.active_track_id(), Some("scene2"));

    // the callback survives its own dispatch
    reg.play("scene1", 0.0);
    reg.tick(2.0);
    reg.backend_mut().finish(sink);
    reg.tick(3.0);
    assert_eq!(reg.active_track_id(), Some("scene2"));
}

#[test]
fn ambient_loop_needs_unlock_and_stops_cleanly() {
    let mut reg = registry();
    assert!(reg.start_ambient("/audio/sfx/thunder.mp3", 0.3, 2.0).is_none());

    reg.unlock();
    let id = reg.start_ambient("/audio/sfx/thunder.mp3", 0.3, 2.0).unwrap();
    assert_eq!(reg.ambient_count(), 1);
    reg.tick(0.0);
    reg.tick(2.0);
    let thunder = reg.backend().sinks.last().unwrap();
    assert!(thunder.looping);
    assert_eq!(thunder.volume, 0.3);
    // ambient loops never take the foreground pointer
    assert_eq!(reg.active_track_id(), None);

    reg.stop_ambient(id);
    assert_eq!(reg.ambient_count(), 0);
    assert!(reg.backend().sinks.last().unwrap().released);
}

#[test]
fn one_shot_requires_unlock() {
    let mut reg = registry();
    reg.play_one_shot("/audio/sfx/erathquake.mp3", 0.6);
    assert!(reg.backend().one_shots.is_empty());
    reg.unlock();
    reg.play_one_shot("/audio/sfx/erathquake.mp3", 0.6);
    assert_eq!(reg.backend().one_shots.len(), 1);
}

#[test]
fn seek_and_state_report_sink_position() {
    let mut reg = registry();
    reg.seek("scene3", 42.5);
    let state = reg.state("scene3").unwrap();
    assert_eq!(state.current_time, 42.5);
    assert_eq!(state.duration, 180.0);
    assert!(reg.state("nope").is_none());
}
