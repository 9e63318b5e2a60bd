use crate::audio::HtmlAudioBackend;
use crate::constants::PLAYER_SYNC_SEC;
use crate::dom::DomStage;
use crate::overlay;
use advaita_core::{Director, Part, Playlist, Tick, Ticker};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything a frame touches, shared with the event listeners.
pub struct FrameContext {
    pub director: Director<HtmlAudioBackend>,
    pub stage: DomStage,
    pub playlist: Playlist,
    pub document: web::Document,
    last_player_sync: f64,
}

impl FrameContext {
    pub fn new(
        director: Director<HtmlAudioBackend>,
        stage: DomStage,
        playlist: Playlist,
        document: web::Document,
    ) -> Self {
        Self {
            director,
            stage,
            playlist,
            document,
            last_player_sync: f64::NEG_INFINITY,
        }
    }

    pub fn frame(&mut self, tick: Tick) {
        self.director.frame(tick, &mut self.stage);

        if tick.now - self.last_player_sync >= PLAYER_SYNC_SEC {
            self.last_player_sync = tick.now;
            self.sync_player();
        }
    }

    pub fn sync_player(&mut self) {
        self.playlist.sync(self.director.audio());
        if !self.stage.is_mounted(Part::MusicPlayer) {
            return;
        }
        if let Some(view) = self.playlist.view(self.director.audio()) {
            overlay::render_player(&self.document, &view);
        }
    }
}

/// Drive `ticker` from `requestAnimationFrame` until the page goes away.
pub fn start_loop(ticker: Rc<Ticker>) {
    let origin = Instant::now();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ticker.tick(origin.elapsed().as_secs_f64());
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
