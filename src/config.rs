//! Operator configuration loaded from a flat key=value file.
//!
//! The file carries the API token and the combination space to export:
//! saved-search names, carat size ranges, colors and clarities. All list
//! values are comma-separated. Size ranges are validated here so a malformed
//! entry fails the run up front instead of producing a split error mid-fetch.

use crate::error::{ExportError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default API host; can be overridden with the optional `base_url` key.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Default search-body template path; `filter_template` key overrides it.
pub const DEFAULT_FILTER_TEMPLATE: &str = "filter.json";

/// One carat size range, parsed from a `"from:to"` config entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeRange {
    pub from: String,
    pub to: String,
}

impl SizeRange {
    /// Parse a `"from:to"` entry, trimming whitespace around both bounds.
    ///
    /// Both bounds must be positive decimals.
    pub fn parse(raw: &str) -> Result<Self> {
        let (from, to) = raw.split_once(':').ok_or_else(|| {
            ExportError::Config(format!(
                "size_range entry '{}' is not of the form 'from:to'",
                raw
            ))
        })?;
        let from = from.trim();
        let to = to.trim();
        for bound in [from, to] {
            match bound.parse::<f64>() {
                Ok(v) if v > 0.0 => {}
                _ => {
                    return Err(ExportError::Config(format!(
                        "size_range entry '{}' has invalid bound '{}'",
                        raw, bound
                    )))
                }
            }
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// The range as the API and sheet header display it: `"from - to"`.
    pub fn grid_label(&self) -> String {
        format!("{} - {}", self.from, self.to)
    }

    /// The range as written in the config: `"from:to"`.
    pub fn raw(&self) -> String {
        format!("{}:{}", self.from, self.to)
    }
}

/// Operator settings for one export run. Constructed once and passed to the
/// components that need it; never global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub saved_searches: Vec<String>,
    pub size_ranges: Vec<SizeRange>,
    pub colors: Vec<String>,
    pub clarities: Vec<String>,
    pub base_url: String,
    pub filter_template: PathBuf,
}

impl Config {
    /// Load and validate the config file at `path`.
    ///
    /// Lines are `key=value` pairs; blank lines and `#` comments are ignored.
    /// A missing file or a missing/empty required key is a fatal error.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;

        let mut values: HashMap<&str, &str> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim(), value.trim());
            }
        }

        let token = required(&values, "token")?.to_string();
        let saved_searches = required_list(&values, "load_saved_search")?;
        let colors = required_list(&values, "colors")?;
        let clarities = required_list(&values, "clarities")?;

        let size_ranges = required_list(&values, "size_range")?
            .iter()
            .map(|raw| SizeRange::parse(raw))
            .collect::<Result<Vec<_>>>()?;

        let base_url = values
            .get("base_url")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let filter_template = values
            .get("filter_template")
            .map(|v| PathBuf::from(*v))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILTER_TEMPLATE));

        log::info!(
            "Config: {} saved search(es), {} size range(s), {} color(s), {} clarity grade(s)",
            saved_searches.len(),
            size_ranges.len(),
            colors.len(),
            clarities.len()
        );

        Ok(Self {
            token,
            saved_searches,
            size_ranges,
            colors,
            clarities,
            base_url,
            filter_template,
        })
    }
}

fn required<'a>(values: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str> {
    match values.get(key) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(ExportError::Config(format!("key '{}' is empty", key))),
        None => Err(ExportError::Config(format!("missing required key '{}'", key))),
    }
}

/// Split a required comma-separated value into trimmed, non-empty entries.
fn required_list(values: &HashMap<&str, &str>, key: &str) -> Result<Vec<String>> {
    let entries: Vec<String> = required(values, key)?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() {
        return Err(ExportError::Config(format!("key '{}' has no entries", key)));
    }
    Ok(entries)
}
