//! Event wiring with explicit listener guards.
//!
//! A `Listener` owns its JS closure and detaches the DOM listener when
//! dropped, so rebinding a reloaded menu fragment can never stack
//! handlers. Clicks are delegated from the menu containers: entries
//! carrying `data-content` swap the content body, entries carrying
//! `data-section` compose a new section and push a history entry.

use crate::dom::Elements;
use crate::{compose, history};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget};

/// Guard owning an attached DOM listener. Dropping it removes the
/// listener and releases the closure.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: Box<dyn FnMut(Event)>,
    ) -> Listener {
        let closure = Closure::wrap(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Listener {
            target: target.clone(),
            event,
            closure,
        }
    }

    /// Leak the guard, keeping the listener attached for the lifetime of
    /// the page. Used for window-scope listeners that are never rebound.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Delegated click handler installed on a freshly loaded top menu.
pub fn bind_top_menu(els: &Elements) -> Listener {
    let els2 = els.clone();
    Listener::attach(
        &els.top_menu,
        "click",
        Box::new(move |e: Event| on_menu_click(&els2, e)),
    )
}

/// Same handler for the sidebar; `None` when the layout has no sidebar.
pub fn bind_side_menu(els: &Elements) -> Option<Listener> {
    let side = els.side_menu.as_ref()?;
    let els2 = els.clone();
    Some(Listener::attach(
        side,
        "click",
        Box::new(move |e: Event| on_menu_click(&els2, e)),
    ))
}

fn on_menu_click(els: &Elements, e: Event) {
    let Some(target) = e.target() else {
        return;
    };
    let Some(el) = target.dyn_ref::<Element>() else {
        return;
    };

    if let Ok(Some(link)) = el.closest("a[data-content]") {
        e.prevent_default();
        let raw = link.get_attribute("data-content").unwrap_or_default();
        if raw.trim().is_empty() {
            return;
        }
        let els2 = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            compose::swap_content(&els2, &raw, true).await;
        });
        return;
    }

    if let Ok(Some(link)) = el.closest("a[data-section]") {
        e.prevent_default();
        let key = link.get_attribute("data-section").unwrap_or_default();
        if key.trim().is_empty() {
            return;
        }
        let els2 = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            history::navigate_to_section(&els2, &key).await;
        });
    }
}
