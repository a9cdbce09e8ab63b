//! RapNet API client module.
//!
//! Covers the four endpoints the exporter needs: saved-search names, a saved
//! search's stored filter, the aggregate diamond count for a filter body and
//! the listing search itself.

mod diamond_search;
mod saved_searches;

pub use saved_searches::SavedSearch;

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::Result;

/// Per-request timeout. A hung request fails that unit of work instead of
/// blocking the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// RapNet API client. One instance per run, bearer token on every request.
pub struct RapNetApi {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl RapNetApi {
    /// Creates a new RapNet API client from the loaded config.
    pub fn new(config: &Config) -> Result<Self> {
        log::debug!("Creating RapNet API client for {}", config.base_url);
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            token: config.token.clone(),
            base_url: config.base_url.clone(),
        })
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
