//! Session state.
//!
//! One `thread_local!` `RefCell` is enough on the single-threaded WASM
//! target. Holds the loaded site config, the active section, the
//! displayed content ref, the navigation epoch used to discard
//! superseded operations, and the live menu listener guards.

use crate::events::Listener;
use std::cell::RefCell;
use sw_engine::composer::NavEpoch;
use sw_engine::config::SiteConfig;
use sw_engine::content::ContentRef;

#[derive(Default)]
pub struct Session {
    pub config: SiteConfig,
    pub section: String,
    pub displayed: Option<ContentRef>,
    pub nav_epoch: NavEpoch,
    pub quick_menu_active: bool,
    pub top_menu_listener: Option<Listener>,
    pub side_menu_listener: Option<Listener>,
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn config() -> SiteConfig {
    with(|s| s.config.clone())
}

pub fn set_config(cfg: SiteConfig) {
    with_mut(|s| s.config = cfg);
}

pub fn section() -> String {
    with(|s| s.section.clone())
}

pub fn set_section(section: &str) {
    with_mut(|s| s.section = section.to_string());
}

pub fn displayed() -> Option<ContentRef> {
    with(|s| s.displayed.clone())
}

pub fn set_displayed(content: Option<ContentRef>) {
    with_mut(|s| s.displayed = content);
}

/// Start a new navigation operation (composition or content swap),
/// superseding any operation still in flight.
pub fn begin_nav() -> u64 {
    with(|s| s.nav_epoch.begin())
}

/// Whether an operation is still the latest one. Stale operations must
/// not commit DOM mutations or persist preferences.
pub fn is_current_epoch(epoch: u64) -> bool {
    with(|s| s.nav_epoch.is_current(epoch))
}

/// Whether the quick-menu follow loop is currently running.
pub fn quick_menu_active() -> bool {
    with(|s| s.quick_menu_active)
}

pub fn set_quick_menu_active(active: bool) {
    with_mut(|s| s.quick_menu_active = active);
}

/// Replace the top-menu listener guard; dropping the previous guard
/// detaches its DOM listener before the fragment is rebound.
pub fn set_top_menu_listener(listener: Option<Listener>) {
    let old = with_mut(|s| std::mem::replace(&mut s.top_menu_listener, listener));
    drop(old);
}

pub fn set_side_menu_listener(listener: Option<Listener>) {
    let old = with_mut(|s| std::mem::replace(&mut s.side_menu_listener, listener));
    drop(old);
}
