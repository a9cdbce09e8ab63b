//! Saved-search catalog operations: name listing and stored-filter lookup.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExportError, Result};

use super::RapNetApi;

/// One saved search as listed by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamesResponse {
    data: NamesData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamesData {
    names_list: Vec<SavedSearch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedSearchListResponse {
    data: SavedSearchListData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedSearchListData {
    saved_search_list: Vec<SavedSearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SavedSearchEntry {
    filter: Value,
}

impl RapNetApi {
    /// Retrieve the list of saved searches stored on the server.
    pub async fn list_saved_searches(&self) -> Result<Vec<SavedSearch>> {
        let url = format!("{}/savesearch/names", self.base_url);
        log::debug!("Fetching saved search names from: {url}");

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExportError::HttpStatus(response.status()));
        }

        let body: NamesResponse = response.json().await?;
        log::info!("Fetched {} saved search name(s)", body.data.names_list.len());
        Ok(body.data.names_list)
    }

    /// Fetch the stored filter of one saved search.
    pub async fn fetch_filter(&self, saved_search_id: u64) -> Result<Value> {
        let url = format!("{}/savesearch/list", self.base_url);
        log::debug!("Fetching filter for saved search {saved_search_id} from: {url}");

        let payload = serde_json::json!({
            "pageNumber": 1,
            "recordsPerPage": 1,
            "savedSearchIDs": [saved_search_id],
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExportError::HttpStatus(response.status()));
        }

        let body: SavedSearchListResponse = response.json().await?;
        body.data
            .saved_search_list
            .into_iter()
            .next()
            .map(|entry| entry.filter)
            .ok_or(ExportError::UnexpectedShape {
                endpoint: "/savesearch/list",
                field: "data.savedSearchList[0]",
            })
    }
}
