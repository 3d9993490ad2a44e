//! Default-content resolution.
//!
//! Decides which content URL a section shows when it first loads. The
//! pinned notice is mandatory viewing only until the user has picked
//! content of their own: a stored preference suppresses it on later
//! compositions.

use crate::config::SiteConfig;
use crate::content::ContentRef;
use crate::prefs::{KvStore, PreferenceStore};

/// First entry of each menu as currently present in the DOM, captured
/// by the frontend right before content resolution. Either side may be
/// absent (fragment not loaded, or the layout has no sidebar).
#[derive(Clone, Debug, Default)]
pub struct MenuSnapshot {
    pub first_top: Option<ContentRef>,
    pub first_side: Option<ContentRef>,
}

/// Strict priority chain: pinned notice (only while no preference is
/// stored) → stored preference → first top-menu entry → first sidebar
/// entry → computed `content-<section>.html`. Never empty.
pub fn resolve_default<S: KvStore>(
    cfg: &SiteConfig,
    store: &PreferenceStore<S>,
    snapshot: &MenuSnapshot,
    section: &str,
) -> ContentRef {
    if store.load(section).is_none() {
        if let Some(pinned) = cfg.pinned_ref(section) {
            return pinned;
        }
    }
    resolve_fallback(cfg, store, snapshot, section)
}

/// Same chain without the pinned-notice step. Used after a pinned
/// notice fails to load, so the broken URL is not retried.
pub fn resolve_fallback<S: KvStore>(
    cfg: &SiteConfig,
    store: &PreferenceStore<S>,
    snapshot: &MenuSnapshot,
    section: &str,
) -> ContentRef {
    store
        .load(section)
        .or_else(|| snapshot.first_top.clone())
        .or_else(|| snapshot.first_side.clone())
        .unwrap_or_else(|| cfg.computed_content_url(section))
}
