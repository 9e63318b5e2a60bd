pub mod page;
pub mod player;
pub mod pointer;

use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;

pub type Shared = Rc<RefCell<FrameContext>>;

pub fn wire_all(ctx: &Shared, document: &web_sys::Document) {
    pointer::wire_pointermove(ctx);
    page::wire_scene_clicks(ctx, document);
    page::wire_visibility(ctx, document);
    player::wire_player_controls(ctx, document);
}
