//! Diamond search operations: aggregate count and the listing search.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExportError, Result};

use super::RapNetApi;

/// The search always requests the first page of 250 records. Listings
/// beyond the first 250 per combination are not retrieved.
const SEARCH_PAGE_START: u32 = 1;
const SEARCH_PAGE_SIZE: u32 = 250;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationsResponse {
    data: AggregationsData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationsData {
    total_diamond_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    data: SearchData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    diamonds: Vec<Value>,
}

impl RapNetApi {
    /// Total diamond count for a search body. Zero matches is `Ok(0)`,
    /// distinct from a failed request.
    pub async fn aggregate_count(&self, body: &Value) -> Result<u64> {
        let url = format!("{}/diamondsearch/aggregations", self.base_url);
        log::debug!("Aggregating diamond count at: {url}");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExportError::HttpStatus(response.status()));
        }

        let parsed: AggregationsResponse = response.json().await?;
        Ok(parsed.data.total_diamond_count)
    }

    /// Fetch the first page of listings matching a search body.
    pub async fn search(&self, body: &Value) -> Result<Vec<Value>> {
        let url = format!("{}/diamondsearch/search", self.base_url);
        log::debug!("Searching diamonds at: {url}");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .query(&[("start", SEARCH_PAGE_START), ("size", SEARCH_PAGE_SIZE)])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExportError::HttpStatus(response.status()));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.data.diamonds)
    }
}
