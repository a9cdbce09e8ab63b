//! Accumulated run results, keyed by filter combination.

use std::collections::BTreeMap;

use crate::filter::AttributeSummary;
use crate::flatten::ListingRecord;

/// Excel's hard limit on sheet name length.
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Identifies one output sheet: saved search name, size-range label
/// (`"from:to"`), color and clarity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CombinationKey {
    pub search: String,
    pub size: String,
    pub color: String,
    pub clarity: String,
}

impl CombinationKey {
    pub fn new(search: &str, size: &str, color: &str, clarity: &str) -> Self {
        Self {
            search: search.to_string(),
            size: size.to_string(),
            color: color.to_string(),
            clarity: clarity.to_string(),
        }
    }

    /// Sheet name: search + color + clarity, truncated to Excel's limit.
    pub fn sheet_name(&self) -> String {
        let full = format!("{}{}{}", self.search, self.color, self.clarity);
        full.chars().take(MAX_SHEET_NAME_CHARS).collect()
    }
}

impl std::fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.search, self.size, self.color, self.clarity
        )
    }
}

/// Everything one run accumulates before export. The attributes entry for a
/// key is always recorded before any listings for that key, so every key in
/// the listings map also appears in the attributes map.
#[derive(Debug, Default)]
pub struct ResultSet {
    listings: BTreeMap<CombinationKey, Vec<ListingRecord>>,
    attributes: BTreeMap<CombinationKey, AttributeSummary>,
}

impl ResultSet {
    /// Record the attribute summary for a combination. Called as soon as the
    /// combination's filter is built, even if no listings are ever fetched.
    pub fn record_attributes(&mut self, key: CombinationKey, summary: AttributeSummary) {
        self.attributes.insert(key, summary);
    }

    /// Append fetched listings for a combination.
    pub fn add_listings(&mut self, key: &CombinationKey, records: Vec<ListingRecord>) {
        self.listings.entry(key.clone()).or_default().extend(records);
    }

    pub fn attributes(&self, key: &CombinationKey) -> Option<&AttributeSummary> {
        self.attributes.get(key)
    }

    /// Listing rows for a combination; empty when none were fetched.
    pub fn listings(&self, key: &CombinationKey) -> &[ListingRecord] {
        self.listings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct (search, size) pairs with at least one recorded combination,
    /// in key order. Each pair becomes one workbook.
    pub fn search_size_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for key in self.attributes.keys() {
            let pair = (key.search.clone(), key.size.clone());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    }

    /// Combination keys under one (search, size) pair, in key order.
    pub fn keys_for(&self, search: &str, size: &str) -> Vec<&CombinationKey> {
        self.attributes
            .keys()
            .filter(|k| k.search == search && k.size == size)
            .collect()
    }

    /// Number of combinations with a recorded summary.
    pub fn combination_count(&self) -> usize {
        self.attributes.len()
    }

    /// Total listing rows across all combinations.
    pub fn listing_count(&self) -> usize {
        self.listings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
