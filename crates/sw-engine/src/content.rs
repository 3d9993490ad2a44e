//! Canonical content references.
//!
//! Authored fragments are inconsistent about content paths: some menu
//! entries carry a bare filename, some `content/<file>.html`, some a
//! `./`-prefixed variant. Every comparison in the engine goes through
//! `ContentRef`, which canonicalizes once and compares by file name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory all content fragments live under. The canonical reference
/// shape is `./content/<file>.html`.
pub const CONTENT_DIR: &str = "./content/";

/// A normalized content URL. Produced only by [`ContentRef::normalize`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Canonicalize a content identifier.
    ///
    /// Strips a leading `./`, then re-roots the final path segment under
    /// [`CONTENT_DIR`]; any directory the author wrote is discarded.
    /// Idempotent. Empty input yields an empty ref, which callers treat
    /// as "no content" — there is no error path.
    pub fn normalize(input: &str) -> ContentRef {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ContentRef(String::new());
        }
        let path = trimmed.strip_prefix("./").unwrap_or(trimmed);
        let file = path.rsplit('/').next().unwrap_or(path);
        if file.is_empty() {
            return ContentRef(String::new());
        }
        ContentRef(format!("{CONTENT_DIR}{file}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final path segment, the unit of comparison everywhere.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// File-name comparison, tolerant of path-prefix variation across
    /// authored fragments. Empty refs never match anything.
    pub fn same_content(&self, other: &ContentRef) -> bool {
        !self.is_empty() && !other.is_empty() && self.file_name() == other.file_name()
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_filename_gains_content_dir() {
        let r = ContentRef::normalize("content-camera-iso.html");
        assert_eq!(r.as_str(), "./content/content-camera-iso.html");
    }

    #[test]
    fn leading_dot_slash_is_stripped() {
        let r = ContentRef::normalize("./content/content-lens.html");
        assert_eq!(r.as_str(), "./content/content-lens.html");
    }

    #[test]
    fn foreign_directory_is_rerooted() {
        let r = ContentRef::normalize("menu/content-about.html");
        assert_eq!(r.as_str(), "./content/content-about.html");

        let nested = ContentRef::normalize("./assets/extra/content-about.html");
        assert_eq!(nested.as_str(), "./content/content-about.html");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "content-camera-iso.html",
            "content/content-camera-iso.html",
            "./content/content-camera-iso.html",
            "some/other/dir/file.html",
            "",
            "   ",
        ] {
            let once = ContentRef::normalize(input);
            let twice = ContentRef::normalize(once.as_str());
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn empty_input_yields_empty_ref() {
        assert!(ContentRef::normalize("").is_empty());
        assert!(ContentRef::normalize("  ").is_empty());
        assert!(ContentRef::normalize("./content/").is_empty());
    }

    #[test]
    fn same_content_ignores_path_prefix() {
        let a = ContentRef::normalize("content-camera-iso.html");
        let b = ContentRef::normalize("content/content-camera-iso.html");
        assert!(a.same_content(&b));

        let c = ContentRef::normalize("content-camera-aperture.html");
        assert!(!a.same_content(&c));
    }

    #[test]
    fn empty_refs_never_match() {
        let empty = ContentRef::normalize("");
        assert!(!empty.same_content(&empty));
        assert!(!empty.same_content(&ContentRef::normalize("x.html")));
    }
}
