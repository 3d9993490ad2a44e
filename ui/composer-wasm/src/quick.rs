//! Floating quick-menu.
//!
//! Some content fragments ship a `#quick` panel that trails the scroll
//! position instead of being position-fixed. The follow loop runs on
//! animation frames with a small easing step toward `scrollY` plus the
//! panel's initial CSS offset. It stops by itself once the element
//! leaves the document (the content was replaced), so the next
//! insertion can start a fresh loop. Whether a loop is running is
//! tracked in session state, not with marker attributes on the node.

use crate::{dom, state};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Offset used when the panel has no parsable `top` in computed style.
const DEFAULT_TOP_PX: f64 = 150.0;
const EASING: f64 = 0.15;

/// One easing step of the follow animation.
fn follow_step(current: f64, target: f64) -> f64 {
    current + (target - current) * EASING
}

/// Start the follow loop if the freshly inserted content carries a
/// `#quick` element and no loop is already running.
pub fn init() {
    if state::quick_menu_active() {
        return;
    }
    let Some(el) = dom::by_id("quick") else {
        return;
    };
    let Ok(panel) = el.dyn_into::<HtmlElement>() else {
        return;
    };

    let initial_top = css_top(&panel).unwrap_or(DEFAULT_TOP_PX);
    state::set_quick_menu_active(true);

    let current = Cell::new(initial_top);
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !panel.is_connected() {
            // The content was swapped out under us; stop without
            // rescheduling. Re-init immediately in case the new
            // content brought its own panel while we were running.
            state::set_quick_menu_active(false);
            init();
            return;
        }
        let scroll_y = dom::window().page_y_offset().unwrap_or(0.0);
        let next = follow_step(current.get(), scroll_y + initial_top);
        current.set(next);
        let _ = panel.style().set_property("top", &format!("{next}px"));
        if let Some(cb) = handle.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = frame.borrow().as_ref() {
        request_frame(cb);
    }
}

fn css_top(el: &HtmlElement) -> Option<f64> {
    let style = dom::window().get_computed_style(el).ok()??;
    let top = style.get_property_value("top").ok()?;
    top.trim_end_matches("px").trim().parse::<f64>().ok()
}

fn request_frame(cb: &Closure<dyn FnMut()>) {
    let _ = dom::window().request_animation_frame(cb.as_ref().unchecked_ref());
}

#[cfg(test)]
mod tests {
    use super::follow_step;

    #[test]
    fn follow_step_eases_toward_the_target() {
        let next = follow_step(150.0, 250.0);
        assert!(next > 150.0 && next < 250.0);
    }

    #[test]
    fn follow_step_converges_on_the_target() {
        let mut pos = 150.0;
        for _ in 0..60 {
            pos = follow_step(pos, 250.0);
        }
        assert!((pos - 250.0).abs() < 0.5);
        assert_eq!(follow_step(250.0, 250.0), 250.0);
    }
}
