//! Upstream list retrieval.
//!
//! Every operation re-fetches its document: there is no caching and no
//! retry. A failed or timed-out fetch surfaces as an upstream-class error.

use ahash::AHashMap;
use std::time::Duration;

use crate::{Error, Result};

/// Source of upstream list documents.
pub trait DocumentSource {
    /// Fetch the document at `url` as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches documents over HTTP with a fixed timeout.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpSource {
    /// Create a source with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("streamrule/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        log::info!("Fetching {}", url);

        let response = self.client.get(url).send().map_err(|e| {
            log::warn!("Failed to fetch {}: {}", url, e);
            Error::Upstream(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Upstream {} returned {}", url, status);
            return Err(Error::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text()?;
        log::info!("Fetched {} ({} bytes)", url, text.len());
        Ok(text)
    }
}

/// In-memory documents keyed by URL.
///
/// Unknown URLs answer like a missing page.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: AHashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a URL.
    pub fn with_document(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(url.into(), text.into());
        self
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self, url: &str) -> Result<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| Error::UpstreamStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}
