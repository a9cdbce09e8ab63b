//! Flattening of raw listing records into tabular rows.
//!
//! Each listing column is addressed by a dotted path into the raw JSON
//! record. A missing key anywhere along the path means the field is absent
//! for that listing, never an error; optional grading attributes (shade,
//! fluorescence, lab comments) are routinely missing.

use serde_json::Value;

/// One export column: dotted path into the raw record and the short header
/// code used in the sheet.
#[derive(Debug, Clone, Copy)]
pub struct ListingColumn {
    pub path: &'static str,
    pub header: &'static str,
}

/// The fixed set of fields extracted from every raw listing, in sheet
/// column order. Paths use the API's own field names (including its
/// spelling of `displayMeasurments`).
pub const LISTING_COLUMNS: [ListingColumn; 22] = [
    ListingColumn { path: "seller.companyName", header: "SELLER" },
    ListingColumn { path: "location.countryCode", header: "CTY" },
    ListingColumn { path: "shape", header: "SHAPE" },
    ListingColumn { path: "displaySize", header: "SIZE" },
    ListingColumn { path: "color", header: "COL" },
    ListingColumn { path: "clarity", header: "CLA" },
    ListingColumn { path: "cut", header: "CUT" },
    ListingColumn { path: "polish", header: "POL" },
    ListingColumn { path: "symmetry", header: "SYM" },
    ListingColumn { path: "displayFluorescence", header: "FLU" },
    ListingColumn { path: "displayPrice.displayPricePerCarat", header: "$/CT" },
    ListingColumn { path: "displayPrice.displayListDiscount", header: "%RAP" },
    ListingColumn { path: "displayPrice.displayTotalPrice", header: "AMT" },
    ListingColumn { path: "displayDepthPercent", header: "TD" },
    ListingColumn { path: "displayTablePercent", header: "TB" },
    ListingColumn { path: "displayMeasurments", header: "MEASUREMENTS" },
    ListingColumn { path: "shade", header: "SHADE" },
    ListingColumn { path: "displayInclusions", header: "INCLUSION" },
    ListingColumn { path: "displayLabComment", header: "Lab Comment" },
    ListingColumn { path: "displayKeyToSymbols", header: "KEY TO SYMBOLS" },
    ListingColumn { path: "memberComment", header: "MEMBER COMMENTS" },
    ListingColumn { path: "sellerID", header: "ID" },
];

/// One flattened listing, values aligned with [`LISTING_COLUMNS`].
#[derive(Debug, Clone)]
pub struct ListingRecord {
    values: Vec<Option<String>>,
}

impl ListingRecord {
    /// Cell values in column order.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Look up a value by the last segment of its column path
    /// (e.g. `companyName` for `seller.companyName`).
    pub fn get(&self, field: &str) -> Option<&str> {
        LISTING_COLUMNS
            .iter()
            .position(|c| c.path.rsplit('.').next() == Some(field))
            .and_then(|i| self.values[i].as_deref())
    }
}

/// Walk `root` by successive object-key lookups along a dotted path.
/// Returns `None` on the first missing key or non-object step.
pub fn extract_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Render a JSON leaf as a display string. `null` and missing are absent.
pub(crate) fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Flatten one raw listing into a row of optional display strings.
pub fn flatten(raw: &Value) -> ListingRecord {
    let values = LISTING_COLUMNS
        .iter()
        .map(|column| extract_path(raw, column.path).and_then(display_string))
        .collect();
    ListingRecord { values }
}
