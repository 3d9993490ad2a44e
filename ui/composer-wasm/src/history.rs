//! Mode and browser-history handling.
//!
//! The URL is the single source of truth for navigation state. Mode and
//! section are re-derived from the current URL on startup, on every
//! section-change click (after pushState), and on every popstate — the
//! transition never depends on how the state was reached.

use crate::compose::INLINE_ERROR;
use crate::dom::{self, Elements};
use crate::{api, compose, events, menu, scripts, state};
use gloo_console::warn;
use sw_engine::config::{SiteConfig, canon_section};
use sw_engine::nav::{self, Mode};
use wasm_bindgen::JsValue;

const HIDDEN_CLASS: &str = "hidden";

/// Derive the mode from the current URL: non-root pages carry their
/// section in the filename, the root page in its query string.
pub fn current_mode(cfg: &SiteConfig) -> Mode {
    let loc = dom::window().location();
    let path = loc.pathname().unwrap_or_default();
    if let Some(section) = nav::section_from_page(&path) {
        return Mode::App { section };
    }
    let query = loc.search().unwrap_or_default();
    Mode::from_query(&query, cfg)
}

/// Apply a mode transition to the page.
pub async fn apply_mode(els: &Elements, mode: &Mode) {
    match mode {
        Mode::Home => show_home(els).await,
        Mode::App { section } => {
            if let Some(home) = &els.home {
                dom::add_class(home, HIDDEN_CLASS);
            }
            dom::remove_class(&els.content, HIDDEN_CLASS);
            dom::remove_class(&els.top_menu, HIDDEN_CLASS);
            if let Some(side) = &els.side_menu {
                dom::remove_class(side, HIDDEN_CLASS);
            }
            compose::compose(els, section).await;
        }
    }
}

/// Section-change entry: push a history entry encoding the new state,
/// then run the same transition popstate would.
pub async fn navigate_to_section(els: &Elements, section: &str) {
    let mode = Mode::App {
        section: canon_section(section),
    };
    push_mode(&mode);
    apply_mode(els, &mode).await;
}

fn push_mode(mode: &Mode) {
    // The pushed URL targets the directory index; pushing a bare query
    // onto a section page like camera.html would let the filename
    // shadow the query on the next re-derivation.
    if let Ok(history) = dom::window().history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&mode.to_href()));
    }
}

/// React to back/forward navigation by re-deriving the mode from the
/// now-current URL. Installed once for the page lifetime.
pub fn bind_popstate(els: &Elements) {
    let els2 = els.clone();
    events::Listener::attach(
        &dom::window(),
        "popstate",
        Box::new(move |_| {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mode = current_mode(&state::config());
                apply_mode(&els3, &mode).await;
            });
        }),
    )
    .forget();
}

/// Home mode: the static home panel plus the special home menu; the
/// app containers go inactive.
async fn show_home(els: &Elements) {
    // Supersede any composition or swap still in flight.
    let epoch = state::begin_nav();
    let cfg = state::config();
    state::set_section("home");
    state::set_displayed(None);

    match api::fetch_fragment(&cfg.top_menu_url("home")).await {
        Ok(html) => {
            if !state::is_current_epoch(epoch) {
                return;
            }
            state::set_top_menu_listener(None);
            dom::set_inner_html(&els.top_menu, &html);
            scripts::revive(&els.top_menu);
            state::set_top_menu_listener(Some(events::bind_top_menu(els)));
        }
        Err(e) => {
            if !state::is_current_epoch(epoch) {
                return;
            }
            warn!(format!("home menu load failed: {e}"));
            dom::set_inner_html(&els.top_menu, INLINE_ERROR);
        }
    }

    if let Some(home) = &els.home {
        dom::remove_class(home, HIDDEN_CLASS);
        // Populate the panel once; later Home transitions just reveal it.
        if home.inner_html().trim().is_empty() {
            match api::fetch_fragment(cfg.home_content_url().as_str()).await {
                Ok(html) => {
                    if !state::is_current_epoch(epoch) {
                        return;
                    }
                    dom::set_inner_html(home, &html);
                    scripts::revive(home);
                }
                Err(e) => {
                    if !state::is_current_epoch(epoch) {
                        return;
                    }
                    warn!(format!("home content load failed: {e}"));
                    dom::set_inner_html(home, INLINE_ERROR);
                }
            }
        }
    }

    dom::add_class(&els.content, HIDDEN_CLASS);
    if let Some(side) = &els.side_menu {
        dom::add_class(side, HIDDEN_CLASS);
    }
    menu::clear_top_active(els);
}
