use super::Shared;
use advaita_core::normalize_pointer;
use wasm_bindgen::JsCast;
use web_sys as web;

fn viewport(window: &web::Window) -> (f32, f32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

pub fn wire_pointermove(ctx: &Shared) {
    let Some(window) = web::window() else {
        return;
    };
    let ctx = ctx.clone();
    let win = window.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (w, h) = viewport(&win);
        let pointer = normalize_pointer(ev.client_x() as f32, ev.client_y() as f32, w, h);
        if let Ok(mut ctx) = ctx.try_borrow_mut() {
            ctx.director.set_pointer(pointer);
        }
    }) as Box<dyn FnMut(web::PointerEvent)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}
