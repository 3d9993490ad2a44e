//! Site configuration and pinned-notice resolution.
//!
//! One explicit value carries everything that used to be ambient
//! globals: fragment directory layout, the known section keys, and the
//! per-section pinned-notice table. The frontend fetches this from
//! `site-config.json` at startup and falls back to the compiled-in
//! default on any failure.

use crate::content::ContentRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical form of a section key: trimmed and lower-cased.
pub fn canon_section(section: &str) -> String {
    section.trim().to_ascii_lowercase()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding header fragments (`header.html`, `header-<section>.html`).
    pub header_dir: String,
    /// Directory holding top-menu and sidebar fragments.
    pub menu_dir: String,
    /// The global footer fragment, loaded once at startup.
    pub footer: String,
    /// Known section keys, in menu order. Unknown keys are still valid
    /// at runtime (they just 404 downstream); this list drives
    /// preference-key migration and the app-mode fallback section.
    pub sections: Vec<String>,
    /// Section key → pinned-notice filename. Sections without an entry
    /// never have a pinned notice. Immutable for the session.
    pub pinned: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            header_dir: "./common/".to_string(),
            menu_dir: "./menu/".to_string(),
            footer: "./common/footer.html".to_string(),
            sections: ["camera", "lens", "lighting", "editing", "about"]
                .map(String::from)
                .to_vec(),
            pinned: HashMap::from([("camera".to_string(), "camera-notice.html".to_string())]),
        }
    }
}

impl SiteConfig {
    /// The mandatory notice fragment for a section, if one is configured.
    pub fn pinned_ref(&self, section: &str) -> Option<ContentRef> {
        self.pinned
            .get(&canon_section(section))
            .map(|file| ContentRef::normalize(file))
    }

    /// Whether `candidate` is the section's pinned notice, compared in
    /// normalized form.
    pub fn is_pinned(&self, section: &str, candidate: &ContentRef) -> bool {
        self.pinned_ref(section)
            .is_some_and(|pinned| pinned.same_content(candidate))
    }

    pub fn header_url(&self, section: &str) -> String {
        format!("{}header-{}.html", self.header_dir, canon_section(section))
    }

    pub fn default_header_url(&self) -> String {
        format!("{}header.html", self.header_dir)
    }

    /// Top-menu fragment for a section. The `home` key selects the
    /// special home menu.
    pub fn top_menu_url(&self, section: &str) -> String {
        format!("{}menu-{}.html", self.menu_dir, canon_section(section))
    }

    pub fn sidebar_url(&self, section: &str) -> String {
        format!("{}side-{}.html", self.menu_dir, canon_section(section))
    }

    /// Deterministic last-resort content path for a section.
    pub fn computed_content_url(&self, section: &str) -> ContentRef {
        ContentRef::normalize(&format!("content-{}.html", canon_section(section)))
    }

    /// The special home content fragment.
    pub fn home_content_url(&self) -> ContentRef {
        ContentRef::normalize("content-home.html")
    }

    pub fn footer_url(&self) -> &str {
        &self.footer
    }

    /// Fallback section when app mode is requested without a usable key.
    pub fn first_section(&self) -> &str {
        self.sections.first().map(String::as_str).unwrap_or("home")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_lookup_is_normalized() {
        let cfg = SiteConfig::default();
        let pinned = cfg.pinned_ref("camera").expect("camera has a notice");
        assert_eq!(pinned.as_str(), "./content/camera-notice.html");
        assert_eq!(cfg.pinned_ref(" CAMERA "), Some(pinned));
    }

    #[test]
    fn sections_without_entry_are_never_pinned() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.pinned_ref("lens"), None);
        assert!(!cfg.is_pinned("lens", &ContentRef::normalize("camera-notice.html")));
    }

    #[test]
    fn is_pinned_tolerates_path_prefix_variants() {
        let cfg = SiteConfig::default();
        for written in [
            "camera-notice.html",
            "content/camera-notice.html",
            "./content/camera-notice.html",
        ] {
            assert!(cfg.is_pinned("camera", &ContentRef::normalize(written)));
        }
        assert!(!cfg.is_pinned("camera", &ContentRef::normalize("content-camera.html")));
    }

    #[test]
    fn fragment_paths_follow_site_layout() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.header_url("Camera"), "./common/header-camera.html");
        assert_eq!(cfg.default_header_url(), "./common/header.html");
        assert_eq!(cfg.top_menu_url("camera"), "./menu/menu-camera.html");
        assert_eq!(cfg.top_menu_url("home"), "./menu/menu-home.html");
        assert_eq!(cfg.sidebar_url("camera"), "./menu/side-camera.html");
        assert_eq!(
            cfg.computed_content_url("camera").as_str(),
            "./content/content-camera.html"
        );
    }

    #[test]
    fn config_deserializes_with_defaults_for_missing_fields() {
        let cfg: SiteConfig = serde_json::from_str(r#"{"sections": ["camera"]}"#).unwrap();
        assert_eq!(cfg.sections, vec!["camera".to_string()]);
        assert_eq!(cfg.menu_dir, "./menu/");
    }
}
