use super::Shared;
use crate::constants::*;
use crate::dom;
use crate::style::bar_fraction;
use advaita_core::Direction;
use web_sys as web;

pub fn wire_player_controls(ctx: &Shared, document: &web::Document) {
    for (id, dir) in [
        (PLAYER_PREV_ID, Direction::Prev),
        (PLAYER_NEXT_ID, Direction::Next),
    ] {
        let ctx = ctx.clone();
        dom::add_click_listener(document, id, move || {
            let mut guard = ctx.borrow_mut();
            let ctx = &mut *guard;
            ctx.playlist.change(ctx.director.audio_mut(), dir);
            ctx.sync_player();
        });
    }

    let toggle_ctx = ctx.clone();
    dom::add_click_listener(document, PLAYER_TOGGLE_ID, move || {
        let mut guard = toggle_ctx.borrow_mut();
        let ctx = &mut *guard;
        ctx.playlist.toggle(ctx.director.audio_mut());
        ctx.sync_player();
    });

    let scrub_ctx = ctx.clone();
    let doc = document.clone();
    dom::add_mouse_listener(document, PLAYER_PROGRESS_ID, move |ev| {
        let Some(bar) = doc.get_element_by_id(PLAYER_PROGRESS_ID) else {
            return;
        };
        let rect = bar.get_bounding_client_rect();
        let fraction = bar_fraction(ev.client_x() as f64, rect.left(), rect.width());
        let mut guard = scrub_ctx.borrow_mut();
        let ctx = &mut *guard;
        match ctx.playlist.scrub(ctx.director.audio_mut(), fraction) {
            Ok(secs) => log::debug!("[player] seek {:.1}s", secs),
            Err(e) => log::warn!("[player] {}", e),
        }
        ctx.sync_player();
    });
}
