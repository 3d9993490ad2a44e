//! Content selection for a section composition.
//!
//! The composer's stages 4–6 distilled to a state machine over an
//! abstract fragment source: attempt the default URL, retry once with
//! the fallback chain when a pinned notice fails, and report whichever
//! URL was ultimately attempted so the frontend can record display
//! state regardless of success.

use crate::config::SiteConfig;
use crate::content::ContentRef;
use crate::error::FragmentError;
use crate::prefs::{KvStore, PreferenceStore};
use crate::resolve::{MenuSnapshot, resolve_default, resolve_fallback};
use async_trait::async_trait;
use std::cell::Cell;

/// Monotonic navigation-operation counter. Every composition and every
/// content swap begins a new epoch before its first suspension point;
/// an operation whose epoch is no longer current has been superseded by
/// a later one and must not commit DOM state or persist a preference.
#[derive(Debug, Default)]
pub struct NavEpoch(Cell<u64>);

impl NavEpoch {
    /// Start a new operation, superseding all earlier in-flight ones.
    pub fn begin(&self) -> u64 {
        self.0.set(self.0.get() + 1);
        self.0.get()
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.0.get() == epoch
    }
}

/// Retrieves a URL as text, failing on non-success HTTP status. No
/// retry; callers decide fallback. `?Send` because the browser-backed
/// implementation awaits JS futures.
#[async_trait(?Send)]
pub trait FragmentSource {
    async fn fetch(&self, url: &str) -> Result<String, FragmentError>;
}

#[derive(Clone, Debug)]
pub struct ContentOutcome {
    /// The URL finally attempted, successful or not. Recorded as the
    /// current display state either way.
    pub attempted: ContentRef,
    /// Fragment body on success.
    pub html: Option<String>,
    /// True only when the section's pinned notice itself loaded; drives
    /// clearing of both menus (notices are not selectable destinations).
    pub pinned_shown: bool,
    /// The last load failure, for logging.
    pub error: Option<FragmentError>,
}

impl ContentOutcome {
    pub fn loaded(&self) -> bool {
        self.html.is_some()
    }
}

/// Resolve and load the content for a fresh composition of `section`.
/// Bounded to a single retry: a pinned notice that fails is replaced by
/// the fallback chain once, and a second failure is surfaced as-is.
pub async fn select_content<S, F>(
    cfg: &SiteConfig,
    store: &PreferenceStore<S>,
    snapshot: &MenuSnapshot,
    section: &str,
    source: &F,
) -> ContentOutcome
where
    S: KvStore,
    F: FragmentSource + ?Sized,
{
    let default_url = resolve_default(cfg, store, snapshot, section);
    match source.fetch(default_url.as_str()).await {
        Ok(html) => {
            let pinned_shown = cfg.is_pinned(section, &default_url);
            ContentOutcome {
                attempted: default_url,
                html: Some(html),
                pinned_shown,
                error: None,
            }
        }
        Err(err) if cfg.is_pinned(section, &default_url) => {
            let retry = resolve_fallback(cfg, store, snapshot, section);
            match source.fetch(retry.as_str()).await {
                Ok(html) => ContentOutcome {
                    attempted: retry,
                    html: Some(html),
                    pinned_shown: false,
                    error: Some(err),
                },
                Err(retry_err) => ContentOutcome {
                    attempted: retry,
                    html: None,
                    pinned_shown: false,
                    error: Some(retry_err),
                },
            }
        }
        Err(err) => ContentOutcome {
            attempted: default_url,
            html: None,
            pinned_shown: false,
            error: Some(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory fragment source that records every URL it is asked for.
    struct MapSource {
        pages: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl MapSource {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl FragmentSource for MapSource {
        async fn fetch(&self, url: &str) -> Result<String, FragmentError> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or(FragmentError::Http {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn store() -> PreferenceStore<MemoryStore> {
        PreferenceStore::new(MemoryStore::default())
    }

    #[test]
    fn a_newer_operation_supersedes_an_in_flight_one() {
        let epochs = NavEpoch::default();
        let swap = epochs.begin();
        assert!(epochs.is_current(swap));

        // A section change lands while the swap's fetch is still
        // pending: the swap must not commit its content or persist a
        // preference under the new section.
        let section_change = epochs.begin();
        assert!(!epochs.is_current(swap));
        assert!(epochs.is_current(section_change));
    }

    #[test]
    fn epochs_increase_monotonically() {
        let epochs = NavEpoch::default();
        let a = epochs.begin();
        let b = epochs.begin();
        assert!(b > a);
    }

    #[tokio::test]
    async fn first_visit_shows_the_pinned_notice() {
        let cfg = SiteConfig::default();
        let source = MapSource::new(&[
            ("./content/camera-notice.html", "<h1>notice</h1>"),
            ("./content/content-camera.html", "<h1>camera</h1>"),
        ]);
        let snapshot = MenuSnapshot {
            first_top: Some(ContentRef::normalize("content-camera.html")),
            first_side: None,
        };

        let outcome = select_content(&cfg, &store(), &snapshot, "camera", &source).await;

        assert_eq!(outcome.attempted.as_str(), "./content/camera-notice.html");
        assert!(outcome.loaded());
        assert!(outcome.pinned_shown);
    }

    #[tokio::test]
    async fn stored_preference_skips_the_notice_on_reload() {
        let cfg = SiteConfig::default();
        let prefs = store();
        prefs.save("camera", &ContentRef::normalize("content-camera-iso.html"));
        let source = MapSource::new(&[
            ("./content/camera-notice.html", "<h1>notice</h1>"),
            ("./content/content-camera-iso.html", "<h1>iso</h1>"),
        ]);

        let outcome =
            select_content(&cfg, &prefs, &MenuSnapshot::default(), "camera", &source).await;

        assert_eq!(outcome.attempted.as_str(), "./content/content-camera-iso.html");
        assert!(!outcome.pinned_shown);
        assert_eq!(source.requested(), vec!["./content/content-camera-iso.html"]);
    }

    #[tokio::test]
    async fn broken_pinned_notice_falls_back_once() {
        let cfg = SiteConfig::default();
        let source = MapSource::new(&[("./content/content-camera.html", "<h1>camera</h1>")]);
        let snapshot = MenuSnapshot {
            first_top: Some(ContentRef::normalize("content-camera.html")),
            first_side: None,
        };

        let outcome = select_content(&cfg, &store(), &snapshot, "camera", &source).await;

        assert_eq!(outcome.attempted.as_str(), "./content/content-camera.html");
        assert!(outcome.loaded());
        assert!(!outcome.pinned_shown);
        assert_eq!(
            source.requested(),
            vec!["./content/camera-notice.html", "./content/content-camera.html"]
        );
    }

    #[tokio::test]
    async fn second_failure_is_surfaced_not_retried() {
        let cfg = SiteConfig::default();
        let source = MapSource::new(&[]);
        let snapshot = MenuSnapshot {
            first_top: Some(ContentRef::normalize("content-camera.html")),
            first_side: None,
        };

        let outcome = select_content(&cfg, &store(), &snapshot, "camera", &source).await;

        // Display state still records the attempted fallback URL.
        assert_eq!(outcome.attempted.as_str(), "./content/content-camera.html");
        assert!(!outcome.loaded());
        assert_eq!(source.requested().len(), 2);
        assert!(matches!(
            outcome.error,
            Some(FragmentError::Http { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn non_pinned_failure_is_not_retried() {
        let cfg = SiteConfig::default();
        let source = MapSource::new(&[]);

        let outcome =
            select_content(&cfg, &store(), &MenuSnapshot::default(), "lens", &source).await;

        assert_eq!(outcome.attempted.as_str(), "./content/content-lens.html");
        assert!(!outcome.loaded());
        assert_eq!(source.requested().len(), 1);
    }
}
