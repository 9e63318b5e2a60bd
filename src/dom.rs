use crate::constants::*;
use crate::style::{self, ElementMotion};
use advaita_core::{
    ElementKey, LayerTransform, Layout, Part, Rect, SceneCatalog, SceneId, SceneSpec,
    ShakeTransform, Stage,
};
use anyhow::anyhow;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    add_mouse_listener(document, element_id, move |_| handler());
}

pub fn add_mouse_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(web::MouseEvent)>
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] #{} missing; click not wired", element_id);
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

fn html(el: web::Element) -> Option<web::HtmlElement> {
    el.dyn_into::<web::HtmlElement>().ok()
}

fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

struct Entry {
    el: web::HtmlElement,
    part: Part,
    motion: ElementMotion,
}

/// The live document seen through [`Stage`]. Every part ships in the markup
/// and is shown or hidden on mount; keys index an arena of elements.
pub struct DomStage {
    window: web::Window,
    entries: Vec<Entry>,
    parts: FnvHashMap<Part, web::HtmlElement>,
    mounted: SmallVec<[Part; 8]>,
    portal: Option<web::HtmlElement>,
}

impl DomStage {
    pub fn new(window: web::Window, document: &web::Document) -> Self {
        let mut parts = FnvHashMap::default();
        for (part, id) in PART_IDS {
            match document.get_element_by_id(id).and_then(html) {
                Some(el) => {
                    set_class(&el, HIDDEN_CLASS, true);
                    parts.insert(part, el);
                }
                None => log::warn!("[dom] #{} missing", id),
            }
        }
        let portal = document.get_element_by_id(PORTAL_ID).and_then(html);
        Self {
            window,
            entries: Vec::new(),
            parts,
            mounted: SmallVec::new(),
            portal,
        }
    }

    pub fn is_mounted(&self, part: Part) -> bool {
        self.mounted.contains(&part)
    }

    /// Key for `el`; the same element always gets the same key.
    pub fn key_for(&mut self, el: web::HtmlElement, part: Part) -> ElementKey {
        if let Some(i) = self.entries.iter().position(|e| e.el == el) {
            return ElementKey(i as u32);
        }
        self.entries.push(Entry {
            el,
            part,
            motion: ElementMotion::default(),
        });
        ElementKey(self.entries.len() as u32 - 1)
    }

    fn part_key(&mut self, part: Part) -> anyhow::Result<ElementKey> {
        let el = self
            .parts
            .get(&part)
            .cloned()
            .ok_or_else(|| anyhow!("page part {:?} missing", part))?;
        Ok(self.key_for(el, part))
    }

    /// Resolve every scene's root, parallax layers and shake targets.
    pub fn catalog(&mut self) -> anyhow::Result<SceneCatalog> {
        let one = self.scene_spec(SceneId::One, &[])?;
        let two = self.scene_spec(SceneId::Two, &SCENE_TWO_LAYERS)?;
        let three = self.scene_spec(SceneId::Three, &[])?;
        Ok(SceneCatalog {
            scenes: [one, two, three],
            seam_one_two: self.part_key(Part::SeamOneTwo)?,
            seam_two_three: self.part_key(Part::SeamTwoThree)?,
        })
    }

    fn scene_spec(
        &mut self,
        scene: SceneId,
        layers: &[(&str, advaita_core::LayerSpec)],
    ) -> anyhow::Result<SceneSpec> {
        let part = scene.part();
        let root = self.part_key(part)?;
        let root_el = self.entries[root.0 as usize].el.clone();
        let mut spec = SceneSpec::new(root);

        for &(selector, layer) in layers {
            match root_el.query_selector(selector).ok().flatten().and_then(html) {
                Some(el) => spec.layers.push((self.key_for(el, part), layer)),
                None => log::debug!("[dom] {:?} has no {}", scene, selector),
            }
        }

        let nodes = root_el
            .query_selector_all(SHAKE_SELECTOR)
            .map_err(|e| anyhow!("{:?}", e))?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
                continue;
            };
            let strength = style::parse_strength(el.get_attribute(SHAKE_STRENGTH_ATTR).as_deref());
            spec.shake.push((self.key_for(el, part), strength));
        }
        log::info!(
            "[dom] {:?}: {} layers, {} shake targets",
            scene,
            spec.layers.len(),
            spec.shake.len()
        );
        Ok(spec)
    }

    fn entry(&self, key: ElementKey) -> Option<&Entry> {
        self.entries.get(key.0 as usize)
    }

    fn write_motion(&mut self, key: ElementKey, update: impl FnOnce(&mut ElementMotion)) {
        if let Some(entry) = self.entries.get_mut(key.0 as usize) {
            update(&mut entry.motion);
            _ = entry
                .el
                .style()
                .set_property("transform", &entry.motion.to_css());
        }
    }
}

impl Layout for DomStage {
    fn rect(&self, key: ElementKey) -> Option<Rect> {
        let entry = self.entry(key)?;
        if !self.is_mounted(entry.part) {
            return None;
        }
        let r = entry.el.get_bounding_client_rect();
        if r.width() == 0.0 && r.height() == 0.0 {
            return None;
        }
        Some(Rect::new(r.top() + self.scroll_y(), r.height()))
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

impl Stage for DomStage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn set_mounted(&mut self, part: Part, mounted: bool) {
        if let Some(el) = self.parts.get(&part) {
            set_class(el, HIDDEN_CLASS, !mounted);
        }
        self.mounted.retain(|p| *p != part);
        if mounted {
            self.mounted.push(part);
        }
        log::debug!("[dom] {:?} {}", part, if mounted { "shown" } else { "hidden" });
    }

    fn is_attached(&self, key: ElementKey) -> bool {
        self.entry(key)
            .map_or(false, |e| e.el.is_connected() && self.is_mounted(e.part))
    }

    fn apply_shake(&mut self, key: ElementKey, transform: ShakeTransform) {
        self.write_motion(key, |m| m.shake = transform);
    }

    fn apply_layer(&mut self, key: ElementKey, transform: LayerTransform) {
        self.write_motion(key, |m| m.layer = transform);
    }

    fn set_offset_y(&mut self, key: ElementKey, y: f32) {
        self.write_motion(key, |m| m.offset_y = y);
    }

    fn set_portal_visible(&mut self, visible: bool) {
        if let Some(portal) = &self.portal {
            set_class(portal, PORTAL_VISIBLE_CLASS, visible);
        }
    }
}
