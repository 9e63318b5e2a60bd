use advaita_core::{AudioBackend, AudioError, SinkEvent, SinkId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

type EventQueue = Rc<RefCell<Vec<SinkEvent>>>;

struct Sink {
    el: web::HtmlAudioElement,
    // Keeps the `ended` listener alive for the element's lifetime.
    _on_ended: Closure<dyn FnMut()>,
}

/// Playback through `<audio>` elements. `play()` resolves asynchronously;
/// its outcome lands in a queue the registry drains every frame.
#[derive(Default)]
pub struct HtmlAudioBackend {
    sinks: Vec<Option<Sink>>,
    events: EventQueue,
}

impl HtmlAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn el(&self, sink: SinkId) -> Option<&web::HtmlAudioElement> {
        self.sinks
            .get(sink.0 as usize)
            .and_then(|s| s.as_ref())
            .map(|s| &s.el)
    }
}

fn load_error(path: &str, e: wasm_bindgen::JsValue) -> AudioError {
    AudioError::Load {
        path: path.to_string(),
        reason: format!("{:?}", e),
    }
}

fn start(el: &web::HtmlAudioElement, on_done: impl FnOnce(Result<(), AudioError>) + 'static) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| AudioError::Rejected(format!("{:?}", e)));
            on_done(result);
        }),
        Err(e) => on_done(Err(AudioError::Rejected(format!("{:?}", e)))),
    }
}

impl AudioBackend for HtmlAudioBackend {
    fn create(&mut self, path: &str, looping: bool) -> Result<SinkId, AudioError> {
        let el = web::HtmlAudioElement::new_with_src(path).map_err(|e| load_error(path, e))?;
        el.set_loop(looping);
        el.set_preload("auto");
        let id = SinkId(self.sinks.len() as u32);

        let events = self.events.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            events.borrow_mut().push(SinkEvent::Ended(id));
        }) as Box<dyn FnMut()>);
        el.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())
            .map_err(|e| load_error(path, e))?;

        self.sinks.push(Some(Sink {
            el,
            _on_ended: on_ended,
        }));
        Ok(id)
    }

    fn play(&mut self, sink: SinkId) {
        let Some(el) = self.el(sink) else {
            return;
        };
        let events = self.events.clone();
        start(el, move |result| {
            let event = match result {
                Ok(()) => SinkEvent::Started(sink),
                Err(e) => SinkEvent::Failed(sink, e),
            };
            events.borrow_mut().push(event);
        });
    }

    fn pause(&mut self, sink: SinkId) {
        if let Some(el) = self.el(sink) {
            _ = el.pause();
        }
    }

    fn release(&mut self, sink: SinkId) {
        if let Some(slot) = self.sinks.get_mut(sink.0 as usize) {
            if let Some(s) = slot.take() {
                _ = s.el.pause();
                s.el.remove_attribute("src").ok();
                s.el.load();
            }
        }
    }

    fn set_volume(&mut self, sink: SinkId, volume: f32) {
        if let Some(el) = self.el(sink) {
            // The media element throws outside [0, 1].
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }

    fn volume(&self, sink: SinkId) -> f32 {
        self.el(sink).map_or(0.0, |el| el.volume() as f32)
    }

    fn set_position(&mut self, sink: SinkId, secs: f64) {
        if let Some(el) = self.el(sink) {
            el.set_current_time(secs);
        }
    }

    fn position(&self, sink: SinkId) -> f64 {
        self.el(sink).map_or(0.0, |el| el.current_time())
    }

    fn duration(&self, sink: SinkId) -> f64 {
        self.el(sink)
            .map(|el| el.duration())
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
    }

    fn is_paused(&self, sink: SinkId) -> bool {
        self.el(sink).map_or(true, |el| el.paused())
    }

    fn play_one_shot(&mut self, path: &str, volume: f32) {
        let el = match web::HtmlAudioElement::new_with_src(path) {
            Ok(el) => el,
            Err(e) => {
                log::error!("[audio] {}", load_error(path, e));
                return;
            }
        };
        el.set_volume(volume.clamp(0.0, 1.0) as f64);
        let path = path.to_string();
        start(&el, move |result| {
            if let Err(e) = result {
                log::warn!("[audio] one-shot {} failed: {}", path, e);
            }
        });
    }

    fn drain_events(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}
