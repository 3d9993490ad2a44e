//! localStorage glue for the preference store.

use sw_engine::prefs::{KvStore, PreferenceStore};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `KvStore` over browser-local persistent storage. Raw string values;
/// key namespacing lives in the engine.
#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = storage() {
            let _ = s.set_item(key, value);
        }
    }
}

pub fn store() -> PreferenceStore<LocalStore> {
    PreferenceStore::new(LocalStore)
}
