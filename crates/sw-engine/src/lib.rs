//! Fragment-composition and navigation-state engine.
//!
//! DOM-free core shared by the wasm frontend: content-reference
//! normalization, site configuration, per-section preference storage,
//! default-content resolution, menu match planning, navigation-mode
//! parsing, and the composer's content-selection state machine.
//! Everything here is host-testable; browser glue lives in
//! `composer-wasm`.

pub mod composer;
pub mod config;
pub mod content;
pub mod error;
pub mod menu;
pub mod nav;
pub mod prefs;
pub mod resolve;

pub use composer::{ContentOutcome, FragmentSource, select_content};
pub use config::SiteConfig;
pub use content::ContentRef;
pub use error::FragmentError;
pub use nav::Mode;
