//! Navigation-mode model.
//!
//! The URL is the single source of truth for navigation state: mode and
//! section are re-derived from query parameters (or the page filename)
//! on every transition, so back/forward replay is a pure recomputation
//! with no history-entry payloads.

use crate::config::{SiteConfig, canon_section};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Root page showing the static home container; no app containers active.
    Home,
    /// App mode composing header/menu/sidebar/content for one section.
    App { section: String },
}

impl Mode {
    /// Parse a query string (`?` prefix optional). `mode=home` is the
    /// default; `mode=app` without a usable `menu` key falls back to the
    /// first known section.
    pub fn from_query(query: &str, cfg: &SiteConfig) -> Mode {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut mode = None;
        let mut menu = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "mode" => mode = Some(value),
                "menu" => menu = Some(value),
                _ => {}
            }
        }
        match mode {
            Some("app") => {
                let section = match menu.map(canon_section) {
                    Some(s) if !s.is_empty() => s,
                    _ => cfg.first_section().to_string(),
                };
                Mode::App { section }
            }
            _ => Mode::Home,
        }
    }

    /// Canonical query string for pushState.
    pub fn to_query(&self) -> String {
        match self {
            Mode::Home => "?mode=home".to_string(),
            Mode::App { section } => format!("?mode=app&menu={section}"),
        }
    }

    /// Pushable URL for a mode transition. Re-roots to the directory
    /// index so that on a non-root page the pushed query is not
    /// shadowed by the page's own filename-derived section.
    pub fn to_href(&self) -> String {
        format!("./{}", self.to_query())
    }
}

/// Section key derived from a non-root page filename: `camera.html` →
/// `camera`. Root and index pages yield `None` (their mode comes from
/// the query string instead).
pub fn section_from_page(path: &str) -> Option<String> {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(".html")?;
    if stem.is_empty() || stem.eq_ignore_ascii_case("index") {
        return None;
    }
    Some(canon_section(stem))
}
