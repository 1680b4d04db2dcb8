//! Detail fetcher for matched book keys.
//!
//! One GET per key against the works API. Keys that fail (non-200, transport
//! errors, bad JSON) are logged and dropped; there is no retry.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::OpenLibraryConfig;
use crate::error::Result;

/// Client for the OpenLibrary works detail endpoint.
pub struct DetailClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl DetailClient {
    pub fn new(config: &OpenLibraryConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the detail document for each key, best-effort.
    ///
    /// A key like `/books/OL1M` or a full URL resolves to its last path
    /// segment; the endpoint is `{base}/works/{id}.json`.
    pub fn fetch_details(&self, keys: &[String]) -> Vec<serde_json::Value> {
        let mut details = Vec::new();
        for key in keys {
            match self.fetch_one(key) {
                Ok(Some(detail)) => details.push(detail),
                Ok(None) => {
                    debug!(target: "openlibrary", key, "lookup dropped (non-success status)");
                }
                Err(err) => {
                    warn!(target: "openlibrary", key, %err, "lookup failed");
                }
            }
        }
        details
    }

    fn fetch_one(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let id = key.rsplit('/').next().unwrap_or(key);
        let url = format!("{}/works/{id}.json", self.base_url);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.json()?))
    }
}
