//! Menu active-state application.
//!
//! DOM half of the synchronizer: entry refs are read from
//! `a[data-content]`, match planning happens in the engine, and
//! applying a plan always clears the whole menu first so exactly one
//! entry per menu can be active.

use crate::dom::{self, Elements};
use sw_engine::content::ContentRef;
use sw_engine::menu::ActivePlan;
use sw_engine::resolve::MenuSnapshot;
use web_sys::Element;

const ACTIVE_CLASS: &str = "active";

fn entries(container: &Element) -> Vec<Element> {
    dom::query_all_within(container, "a[data-content]")
}

fn entry_refs(items: &[Element]) -> Vec<ContentRef> {
    items
        .iter()
        .map(|a| ContentRef::normalize(&a.get_attribute("data-content").unwrap_or_default()))
        .collect()
}

fn apply_plan(items: &[Element], plan: ActivePlan) -> bool {
    for item in items {
        dom::remove_class(item, ACTIVE_CLASS);
    }
    match plan {
        ActivePlan::Activate(index) => match items.get(index) {
            Some(item) => {
                dom::add_class(item, ACTIVE_CLASS);
                true
            }
            None => false,
        },
        ActivePlan::NoMatch => false,
    }
}

pub fn set_top_active(els: &Elements, shown: &ContentRef) -> bool {
    let items = entries(&els.top_menu);
    apply_plan(&items, ActivePlan::for_content(&entry_refs(&items), shown))
}

pub fn set_side_active(els: &Elements, shown: &ContentRef) -> bool {
    let Some(side) = &els.side_menu else {
        return false;
    };
    let items = entries(side);
    apply_plan(&items, ActivePlan::for_content(&entry_refs(&items), shown))
}

pub fn clear_top_active(els: &Elements) {
    for item in entries(&els.top_menu) {
        dom::remove_class(&item, ACTIVE_CLASS);
    }
}

pub fn clear_side_active(els: &Elements) {
    let Some(side) = &els.side_menu else {
        return;
    };
    for item in entries(side) {
        dom::remove_class(&item, ACTIVE_CLASS);
    }
}

/// Safety net for when nothing matched: the top menu is never left with
/// zero active entries outside of the pinned-notice state.
pub fn ensure_top_default_active(els: &Elements) {
    let items = entries(&els.top_menu);
    if items.iter().any(|item| dom::has_class(item, ACTIVE_CLASS)) {
        return;
    }
    if let Some(first) = items.first() {
        dom::add_class(first, ACTIVE_CLASS);
    }
}

/// First entry of each menu as currently in the DOM, for the
/// default-content priority chain.
pub fn snapshot(els: &Elements) -> MenuSnapshot {
    let first_of = |container: &Element| {
        entry_refs(&entries(container))
            .into_iter()
            .find(|r| !r.is_empty())
    };
    MenuSnapshot {
        first_top: first_of(&els.top_menu),
        first_side: els.side_menu.as_ref().and_then(|side| first_of(side)),
    }
}
