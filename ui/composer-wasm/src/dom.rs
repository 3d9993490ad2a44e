//! DOM container bindings and helpers.
//!
//! Containers are resolved once at startup. The sidebar and home panel
//! are optional: layouts without them simply skip the affected stages.

use sw_engine::content::ContentRef;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// Attribute on the content container holding the currently displayed
/// content ref (the DOM-visible half of display state).
const CURRENT_ATTR: &str = "data-current";

/// Fixed-header height compensated when scrolling to swapped content.
const HEADER_OFFSET_PX: f64 = 80.0;

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(nl) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(node) = nl.item(i) {
            if let Ok(el) = node.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

/// Smooth-scroll the window so `el` sits just below the fixed header.
pub fn scroll_to_element(el: &Element) {
    let rect = el.get_bounding_client_rect();
    let top = window().page_y_offset().unwrap_or(0.0) + rect.top() - HEADER_OFFSET_PX;
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(top.max(0.0));
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&opts);
}

// ── Elements struct ──

/// All page containers the composer writes into. Cheap to clone; every
/// field is a JS handle.
#[derive(Clone)]
pub struct Elements {
    pub header_slot: Element,
    pub top_menu: Element,
    /// Absent on layouts without a sidebar; the stage is skipped.
    pub side_menu: Option<Element>,
    pub content: Element,
    /// Static home panel, present only on the root page.
    pub home: Option<Element>,
    pub footer_slot: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all containers. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            header_slot: get_el!("site-header"),
            top_menu: get_el!("top-menu"),
            side_menu: by_id("side-menu"),
            content: get_el!("main-content"),
            home: by_id("home-panel"),
            footer_slot: get_el!("site-footer"),
        })
    }

    /// Record the currently displayed content ref on the container.
    pub fn set_current_ref(&self, content: &ContentRef) {
        let _ = self.content.set_attribute(CURRENT_ATTR, content.as_str());
    }

    pub fn current_ref(&self) -> Option<ContentRef> {
        let raw = self.content.get_attribute(CURRENT_ATTR)?;
        let content = ContentRef::normalize(&raw);
        (!content.is_empty()).then_some(content)
    }
}
