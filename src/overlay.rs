use crate::constants::*;
use crate::dom;
use advaita_core::PlayerView;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(GATE_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(GATE_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Push the player model into the floating widget.
pub fn render_player(document: &web::Document, view: &PlayerView) {
    dom::set_text(document, PLAYER_LABEL_ID, &view.label);
    dom::set_text(document, PLAYER_TITLE_ID, view.title);
    dom::set_text(document, PLAYER_ARTIST_ID, view.artist);
    dom::set_text(document, PLAYER_TIME_ID, &view.time);
    dom::set_text(
        document,
        PLAYER_TOGGLE_ID,
        if view.playing { "PAUSE" } else { "PLAY" },
    );
    if let Some(bar) = document.get_element_by_id(PLAYER_BAR_ID) {
        _ = bar.set_attribute("style", &format!("width:{:.1}%", view.progress_percent));
    }
}
