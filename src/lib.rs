#![cfg(target_arch = "wasm32")]
use advaita_core::{should_skip_intro, AudioRegistry, Director, DirectorConfig, Playlist, Ticker};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod style;

use constants::{GATE_ENTER_ID, GATE_SKIP_ID};

fn device_skips_intro(window: &web::Window) -> bool {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let query = window.location().search().unwrap_or_default();
    should_skip_intro(width, &user_agent, &query)
}

/// Build the director behind the gate. Runs once; the gate click is the
/// gesture that unlocks audio.
fn boot(skip_intro: bool) -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    overlay::hide(&document);

    let mut stage = dom::DomStage::new(window.clone(), &document);
    let catalog = stage.catalog()?;

    let mut registry = AudioRegistry::new(audio::HtmlAudioBackend::new());
    registry.unlock();
    let mut director = Director::new(DirectorConfig::default(), catalog, registry, skip_intro);
    let playlist = Playlist::default();
    playlist.register_all(director.audio_mut());
    director.mount(&mut stage);
    log::info!("[app] booted in {:?}", director.state());

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        director,
        stage,
        playlist,
        document.clone(),
    )));
    events::wire_all(&ctx, &document);

    let ticker = Rc::new(Ticker::new());
    let frame_ctx = ctx.clone();
    ticker.add(move |tick| frame_ctx.borrow_mut().frame(tick));
    ticker.start();
    frame::start_loop(ticker);
    Ok(())
}

fn wire_gate_buttons(document: &web::Document, device_skip: bool) {
    dom::add_click_listener(document, GATE_ENTER_ID, move || {
        if let Err(e) = boot(device_skip) {
            log::error!("boot error: {:?}", e);
        }
    });
    dom::add_click_listener(document, GATE_SKIP_ID, move || {
        if let Err(e) = boot(true) {
            log::error!("boot error: {:?}", e);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("advaita-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Always start at the top; the intro depends on it.
    if let Ok(history) = window.history() {
        _ = history.set_scroll_restoration(web::ScrollRestoration::Manual);
    }
    window.scroll_to_with_x_and_y(0.0, 0.0);

    let device_skip = device_skips_intro(&window);
    log::info!("[app] device skips intro: {}", device_skip);
    overlay::show(&document);
    wire_gate_buttons(&document, device_skip);
    Ok(())
}
