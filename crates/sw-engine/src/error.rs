use thiserror::Error;

/// Fragment-load failures. A missing optional DOM container is normal
/// absence, not an error, so it has no variant here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("fragment request for {url} returned status {status}")]
    Http { status: u16, url: String },

    #[error("network failure for {url}: {reason}")]
    Network { url: String, reason: String },
}

impl FragmentError {
    pub fn url(&self) -> &str {
        match self {
            FragmentError::Http { url, .. } => url,
            FragmentError::Network { url, .. } => url,
        }
    }
}
