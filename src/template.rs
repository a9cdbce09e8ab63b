//! Search-body template handling.
//!
//! The template JSON file carries the static skeleton of the search request
//! body (pagination defaults, sort order). It is read fresh per combination
//! and only its `filter` key is replaced with the built filter criteria.

use std::path::Path;

use serde_json::Value;

use crate::error::{ExportError, Result};

/// Load the template at `path` and substitute `filter` into it.
pub fn load_search_body(path: &Path, filter: Value) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let mut body: Value = serde_json::from_str(&content)?;

    match body.as_object_mut() {
        Some(obj) => {
            obj.insert("filter".to_string(), filter);
            Ok(body)
        }
        None => Err(ExportError::Config(format!(
            "filter template {} is not a JSON object",
            path.display()
        ))),
    }
}
