//! Script revival for fetched fragments.
//!
//! Markup assigned via `innerHTML` never executes embedded `<script>`
//! tags. Each one is rebuilt as a fresh node (external `src` or inline
//! body, plus any `type` marker) and appended at document scope, then
//! the inert original is removed. No-op on containers without scripts.

use crate::dom;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub fn revive(container: &web_sys::Element) {
    for node in dom::query_all_within(container, "script") {
        let Ok(old) = node.dyn_into::<HtmlScriptElement>() else {
            continue;
        };
        let Ok(fresh) = dom::create_element("script").dyn_into::<HtmlScriptElement>() else {
            continue;
        };

        let src = old.src();
        if !src.is_empty() {
            fresh.set_src(&src);
        } else {
            fresh.set_text_content(old.text_content().as_deref());
        }
        let ty = old.type_();
        if !ty.is_empty() {
            fresh.set_type(&ty);
        }

        if let Some(body) = dom::document().body() {
            let _ = body.append_child(&fresh);
        }
        old.remove();
    }
}
