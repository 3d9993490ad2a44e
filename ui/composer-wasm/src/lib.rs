//! Siteweave composer WASM frontend.
//!
//! Composes a multi-page static site from reusable HTML fragments at
//! runtime: header, top menu, sidebar, and content per section, with
//! menu highlighting, per-section last-viewed persistence, and
//! back/forward handling. Each concern lives in its own module; the
//! DOM-free decision logic is in the `sw-engine` crate.

pub mod api;
pub mod compose;
pub mod dom;
pub mod events;
pub mod history;
pub mod menu;
pub mod prefs;
pub mod quick;
pub mod scripts;
pub mod state;

use gloo_console::warn;
use sw_engine::config::SiteConfig;
use wasm_bindgen::prelude::*;

/// Entry point, invoked by the wasm loader once the page has the module.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Panics surface in the console instead of an opaque trap.
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    // Fragments can only be fetched from a network-capable origin.
    if is_file_origin() {
        show_serve_notice();
        return Ok(());
    }

    let els = dom::Elements::bind()?;

    let cfg = load_site_config().await;
    state::set_config(cfg.clone());

    // Repair preference keys written by the old interpolation bug.
    prefs::store().migrate_legacy_keys(&cfg.sections);

    // The footer is global and loaded exactly once.
    load_footer(&els, &cfg).await;

    let mode = history::current_mode(&cfg);
    history::apply_mode(&els, &mode).await;
    history::bind_popstate(&els);

    Ok(())
}

fn is_file_origin() -> bool {
    dom::window()
        .location()
        .protocol()
        .map(|p| p == "file:")
        .unwrap_or(false)
}

/// Opening the page straight from disk cannot work: replace the whole
/// body with an instructional message instead of degrading piecemeal.
fn show_serve_notice() {
    if let Some(body) = dom::document().body() {
        body.set_inner_html(
            "<main class=\"serve-notice\">\
             <h1>This site must be served over HTTP</h1>\
             <p>Fragment loading does not work from a <code>file://</code> origin. \
             Start a local web server in the site directory and open it from there.</p>\
             </main>",
        );
    }
}

async fn load_site_config() -> SiteConfig {
    match api::fetch_fragment("./site-config.json").await {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(format!("site-config.json is invalid, using defaults: {e}"));
                SiteConfig::default()
            }
        },
        Err(_) => SiteConfig::default(),
    }
}

async fn load_footer(els: &dom::Elements, cfg: &SiteConfig) {
    match api::fetch_fragment(cfg.footer_url()).await {
        Ok(html) => {
            dom::set_inner_html(&els.footer_slot, &html);
            scripts::revive(&els.footer_slot);
        }
        Err(e) => warn!(format!("footer load failed: {e}")),
    }
}
