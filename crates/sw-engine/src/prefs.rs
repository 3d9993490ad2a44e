//! Per-section last-viewed-content persistence.
//!
//! The store is generic over a key-value backend so the browser's
//! localStorage and an in-memory map both fit. Keys are namespaced to
//! avoid collision with unrelated persisted data.

use crate::config::canon_section;
use crate::content::ContentRef;
use std::cell::RefCell;
use std::collections::HashMap;

const KEY_NS: &str = "siteweave.last-content:";

/// Minimal key-value backend. Mutation through a shared reference so a
/// browser storage handle qualifies.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `RefCell`-backed map store, used by engine tests and host tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Persists, per navigation section, the last content the user viewed.
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KvStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key_for(section: &str) -> String {
        format!("{KEY_NS}{}", canon_section(section))
    }

    /// Key shape written by an old string-interpolation bug: a stray `$`
    /// marker landed between the namespace and the section.
    fn legacy_key_for(section: &str) -> String {
        format!("{KEY_NS}${}", canon_section(section))
    }

    pub fn save(&self, section: &str, content: &ContentRef) {
        if content.is_empty() || canon_section(section).is_empty() {
            return;
        }
        self.store.set(&Self::key_for(section), content.as_str());
    }

    pub fn load(&self, section: &str) -> Option<ContentRef> {
        let raw = self.store.get(&Self::key_for(section))?;
        let content = ContentRef::normalize(&raw);
        (!content.is_empty()).then_some(content)
    }

    /// One-time repair of keys written with the legacy marker. For each
    /// known section, the legacy value is copied to the canonical key if
    /// and only if the canonical key is empty. Idempotent, and never
    /// destructive: legacy keys stay in place.
    pub fn migrate_legacy_keys(&self, sections: &[String]) {
        for section in sections {
            let canonical = Self::key_for(section);
            if self.store.get(&canonical).is_some() {
                continue;
            }
            if let Some(value) = self.store.get(&Self::legacy_key_for(section)) {
                self.store.set(&canonical, &value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PreferenceStore<MemoryStore> {
        PreferenceStore::new(MemoryStore::default())
    }

    #[test]
    fn save_then_load_round_trips_normalized() {
        let prefs = store();
        prefs.save("camera", &ContentRef::normalize("content-camera-iso.html"));
        assert_eq!(
            prefs.load("camera").unwrap().as_str(),
            "./content/content-camera-iso.html"
        );
    }

    #[test]
    fn section_keys_are_canonicalized() {
        let prefs = store();
        prefs.save("  Camera ", &ContentRef::normalize("content-camera-iso.html"));
        assert!(prefs.load("camera").is_some());
        assert!(prefs.load("CAMERA").is_some());
    }

    #[test]
    fn missing_section_loads_nothing() {
        assert_eq!(store().load("lens"), None);
    }

    #[test]
    fn empty_refs_are_not_persisted() {
        let prefs = store();
        prefs.save("camera", &ContentRef::normalize(""));
        assert_eq!(prefs.load("camera"), None);
    }

    #[test]
    fn migration_copies_legacy_value_once() {
        let backend = MemoryStore::default();
        backend.set("siteweave.last-content:$camera", "content-camera-iso.html");
        let prefs = PreferenceStore::new(backend);

        let sections = vec!["camera".to_string(), "lens".to_string()];
        prefs.migrate_legacy_keys(&sections);

        assert_eq!(
            prefs.load("camera").unwrap().as_str(),
            "./content/content-camera-iso.html"
        );
        assert_eq!(prefs.load("lens"), None);
        // Legacy key is left in place.
        assert_eq!(
            prefs.store.get("siteweave.last-content:$camera").as_deref(),
            Some("content-camera-iso.html")
        );
    }

    #[test]
    fn migration_never_overwrites_canonical_value() {
        let backend = MemoryStore::default();
        backend.set("siteweave.last-content:camera", "content-camera-aperture.html");
        backend.set("siteweave.last-content:$camera", "content-camera-iso.html");
        let prefs = PreferenceStore::new(backend);

        prefs.migrate_legacy_keys(&["camera".to_string()]);
        prefs.migrate_legacy_keys(&["camera".to_string()]); // idempotent

        assert_eq!(
            prefs.load("camera").unwrap().as_str(),
            "./content/content-camera-aperture.html"
        );
    }
}
