//! Section composition and content swapping.
//!
//! `compose` loads header → top menu → sidebar → content strictly in
//! order (later stages read DOM inserted by earlier ones), then settles
//! the menu active state. Every fragment failure degrades to an inline
//! error in its own container and never blocks later stages. Each run
//! takes a fresh epoch; a run that has been superseded by a newer one
//! abandons itself before any further DOM commit.

use crate::dom::{self, Elements};
use crate::{api, events, menu, prefs, quick, scripts, state};
use gloo_console::{error, warn};
use sw_engine::composer::select_content;
use sw_engine::config::canon_section;
use sw_engine::content::ContentRef;

/// Short inline fragment left in a container whose load failed.
pub const INLINE_ERROR: &str = r#"<p class="load-error">This content could not be loaded.</p>"#;

/// Compose all fragments for a section.
pub async fn compose(els: &Elements, section: &str) {
    let epoch = state::begin_nav();
    let cfg = state::config();
    let section = canon_section(section);
    state::set_section(&section);
    state::set_displayed(None);

    // 1. Header: section-specific, then the default header, then keep
    // whatever header was already there.
    load_header(els, &section, epoch).await;
    if !state::is_current_epoch(epoch) {
        return;
    }

    // 2. Top menu, rebound through a fresh listener guard.
    match api::fetch_fragment(&cfg.top_menu_url(&section)).await {
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
            warn!(format!("top menu load failed: {e}"));
            dom::set_inner_html(&els.top_menu, INLINE_ERROR);
        }
    }

    // 3. Sidebar. An absent container is normal, not a failure.
    if let Some(side) = els.side_menu.clone() {
        match api::fetch_fragment(&cfg.sidebar_url(&section)).await {
            Ok(html) => {
                if !state::is_current_epoch(epoch) {
                    return;
                }
                state::set_side_menu_listener(None);
                dom::set_inner_html(&side, &html);
                scripts::revive(&side);
                state::set_side_menu_listener(events::bind_side_menu(els));
            }
            Err(e) => {
                if !state::is_current_epoch(epoch) {
                    return;
                }
                warn!(format!("sidebar load failed: {e}"));
                dom::set_inner_html(&side, INLINE_ERROR);
            }
        }
    }

    // 4–5. Content, with the single pinned-notice fallback retry. No
    // scroll animation during initial composition.
    let snapshot = menu::snapshot(els);
    let outcome = select_content(&cfg, &prefs::store(), &snapshot, &section, &api::BrowserSource).await;
    if !state::is_current_epoch(epoch) {
        return;
    }

    els.set_current_ref(&outcome.attempted);
    state::set_displayed(Some(outcome.attempted.clone()));
    match &outcome.html {
        Some(html) => {
            dom::set_inner_html(&els.content, html);
            scripts::revive(&els.content);
            quick::init();
        }
        None => {
            if let Some(e) = &outcome.error {
                error!(format!("content load failed: {e}"));
            }
            dom::set_inner_html(&els.content, INLINE_ERROR);
        }
    }

    // 6. A successfully shown pinned notice is not a selectable menu
    // destination: both menus go inactive.
    if outcome.pinned_shown {
        menu::clear_top_active(els);
        menu::clear_side_active(els);
        return;
    }

    // 7. Settle active state against whatever was attempted.
    let matched = menu::set_top_active(els, &outcome.attempted);
    menu::set_side_active(els, &outcome.attempted);
    if !matched {
        menu::ensure_top_default_active(els);
    }
}

async fn load_header(els: &Elements, section: &str, epoch: u64) {
    let cfg = state::config();
    let html = match api::fetch_fragment(&cfg.header_url(section)).await {
        Ok(html) => Some(html),
        Err(_) => match api::fetch_fragment(&cfg.default_header_url()).await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!(format!("header load failed: {e}"));
                None
            }
        },
    };
    if !state::is_current_epoch(epoch) {
        return;
    }
    // On double failure the previous header stays untouched.
    if let Some(html) = html {
        dom::set_inner_html(&els.header_slot, &html);
        scripts::revive(&els.header_slot);
    }
}

/// Content-only swap from a menu or sidebar click. On success the ref
/// is persisted as the section's preference and the menu active state
/// is re-run against it.
pub async fn swap_content(els: &Elements, raw: &str, smooth: bool) {
    let target = ContentRef::normalize(raw);
    if target.is_empty() {
        return;
    }

    // Snapshot before the suspension point: a section change landing
    // while the fetch is pending supersedes this swap, and the
    // preference must be keyed by the section the click happened in,
    // not whatever section is current once the fetch resolves.
    let epoch = state::begin_nav();
    let cfg = state::config();
    let section = state::section();

    match api::fetch_fragment(target.as_str()).await {
        Ok(html) => {
            if !state::is_current_epoch(epoch) {
                return;
            }
            dom::set_inner_html(&els.content, &html);
            scripts::revive(&els.content);
            quick::init();
            if smooth {
                dom::scroll_to_element(&els.content);
            }

            let pinned = cfg.is_pinned(&section, &target);
            // Notices are not user destinations, so they are never
            // persisted as a preference.
            if !pinned {
                prefs::store().save(&section, &target);
            }
            els.set_current_ref(&target);
            state::set_displayed(Some(target.clone()));

            if pinned {
                menu::clear_top_active(els);
                menu::clear_side_active(els);
            } else {
                let matched = menu::set_top_active(els, &target);
                menu::set_side_active(els, &target);
                if !matched {
                    menu::ensure_top_default_active(els);
                }
            }
        }
        Err(e) => {
            if !state::is_current_epoch(epoch) {
                return;
            }
            error!(format!("content load failed: {e}"));
            dom::set_inner_html(&els.content, INLINE_ERROR);
        }
    }
}
