use super::Shared;
use crate::constants::{PART_IDS, PORTAL_ID};
use crate::dom;
use advaita_core::Part;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Scene one wakes the intro; the portal in scene two enters the site.
pub fn wire_scene_clicks(ctx: &Shared, document: &web::Document) {
    let scene_one = PART_IDS
        .iter()
        .find(|(part, _)| *part == Part::SceneOne)
        .map(|(_, id)| *id);
    if let Some(id) = scene_one {
        let ctx = ctx.clone();
        dom::add_click_listener(document, id, move || {
            ctx.borrow_mut().director.activate();
        });
    }

    let ctx = ctx.clone();
    dom::add_click_listener(document, PORTAL_ID, move || {
        ctx.borrow_mut().director.enter_website();
    });
}

/// Hidden tabs go quiet; the active track resumes when the page returns.
pub fn wire_visibility(ctx: &Shared, document: &web::Document) {
    let ctx = ctx.clone();
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let mut ctx = ctx.borrow_mut();
        let audio = ctx.director.audio_mut();
        if doc.hidden() {
            log::info!("[page] hidden; pausing audio");
            audio.pause_all();
        } else {
            audio.resume_active();
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
