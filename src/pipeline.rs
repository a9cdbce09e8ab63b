//! The sequential fetch loop: saved searches × size ranges × colors ×
//! clarities, one combination at a time.
//!
//! Failure policy: each fallible step isolates its failure to the smallest
//! unit of work — a failed filter fetch, aggregate or search is logged and
//! that combination is skipped; the loop continues.

use std::path::Path;

use crate::config::{Config, SizeRange};
use crate::filter::{apply_overrides, summarize};
use crate::flatten::flatten;
use crate::rapnet::{RapNetApi, SavedSearch};
use crate::results::{CombinationKey, ResultSet};
use crate::template::load_search_body;

/// Fetch listings for every requested combination. Never fails as a whole;
/// a run where everything failed returns an empty result set.
pub async fn fetch_listings(api: &RapNetApi, config: &Config) -> ResultSet {
    let mut results = ResultSet::default();

    let names = match api.list_saved_searches().await {
        Ok(names) => names,
        Err(e) => {
            log::error!("Failed to fetch saved search names: {e}");
            return results;
        }
    };

    for wanted in &config.saved_searches {
        if !names.iter().any(|s| &s.name == wanted) {
            log::warn!("Saved search '{wanted}' not found on server, skipping");
        }
    }

    for saved in names.iter().filter(|s| config.saved_searches.contains(&s.name)) {
        log::info!("Processing saved search '{}' (id {})", saved.name, saved.id);
        for size in &config.size_ranges {
            for color in &config.colors {
                for clarity in &config.clarities {
                    let template = config.filter_template.as_path();
                    fetch_combination(api, template, &mut results, saved, size, color, clarity)
                        .await;
                }
            }
        }
    }

    log::info!(
        "Fetched {} listing(s) across {} combination(s)",
        results.listing_count(),
        results.combination_count()
    );
    results
}

/// Process one saved-search × size × color × clarity combination.
async fn fetch_combination(
    api: &RapNetApi,
    template: &Path,
    results: &mut ResultSet,
    saved: &SavedSearch,
    size: &SizeRange,
    color: &str,
    clarity: &str,
) {
    let key = CombinationKey::new(&saved.name, &size.raw(), color, clarity);

    let stored = match api.fetch_filter(saved.id).await {
        Ok(filter) => filter,
        Err(e) => {
            log::error!("Failed to fetch filter for {key}: {e}");
            return;
        }
    };

    let filter = apply_overrides(stored, Some(size), color, clarity);
    let summary = summarize(&filter, Some(size), color, clarity);
    // recorded before any count/search attempt, so a failed fetch still
    // leaves the combination's summary sheet
    results.record_attributes(key.clone(), summary);

    let body = match load_search_body(template, filter) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to load filter template for {key}: {e}");
            return;
        }
    };

    match api.aggregate_count(&body).await {
        Ok(0) => {
            log::info!("No diamonds match {key}, skipping");
            return;
        }
        Ok(count) => {
            log::info!("{count} diamond(s) match {key}");
        }
        Err(e) => {
            log::error!("Failed to aggregate count for {key}: {e}");
            return;
        }
    }

    let diamonds = match api.search(&body).await {
        Ok(diamonds) => diamonds,
        Err(e) => {
            log::error!("Failed to search diamonds for {key}: {e}");
            return;
        }
    };

    log::info!("Fetched {} listing(s) for {key}", diamonds.len());
    let records = diamonds.iter().map(flatten).collect();
    results.add_listings(&key, records);
}
