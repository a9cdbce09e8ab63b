//! Filter building: merges a saved search's stored filter with the
//! operator-requested size/color/clarity, and derives the human-readable
//! attribute summary used as the sheet header.

use serde_json::{json, Map, Value};

use crate::config::SizeRange;
use crate::flatten::display_string;

/// Display summary of one filter combination, rendered at the top of its
/// sheet. Fields read back out of the filter default to empty strings; a
/// missing range renders as `" - "`.
#[derive(Debug, Clone)]
pub struct AttributeSummary {
    pub shape: String,
    pub color: String,
    pub size: String,
    pub clarity: String,
    pub fluorescence: String,
    pub depth: String,
    pub table: String,
    pub labs: String,
    pub cut: String,
    pub polish: String,
    pub symmetry: String,
    pub crown_height: String,
    pub crown_angle: String,
    pub pavilion_angle: String,
}

impl AttributeSummary {
    /// Short column codes, in sheet order.
    pub const HEADERS: [&'static str; 14] = [
        "SHAPE", "COL", "SIZE", "CLA", "FLU", "TD", "TB", "LAB", "CUT", "POL", "SYM", "CH",
        "CA", "PA",
    ];

    /// Values aligned with [`AttributeSummary::HEADERS`].
    pub fn values(&self) -> [&str; 14] {
        [
            &self.shape,
            &self.color,
            &self.size,
            &self.clarity,
            &self.fluorescence,
            &self.depth,
            &self.table,
            &self.labs,
            &self.cut,
            &self.polish,
            &self.symmetry,
            &self.crown_height,
            &self.crown_angle,
            &self.pavilion_angle,
        ]
    }
}

/// Overwrite the size/color/clarity sub-objects of a stored filter with the
/// requested combination. Everything else in the filter is left as stored.
pub fn apply_overrides(
    filter: Value,
    size: Option<&SizeRange>,
    color: &str,
    clarity: &str,
) -> Value {
    let mut map = match filter {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if let Some(range) = size {
        map.insert(
            "size".to_string(),
            json!({
                "isSpecificSize": true,
                "sizeGrids": [range.grid_label()],
                "sizeFrom": range.from,
                "sizeTo": range.to,
            }),
        );
    }
    map.insert(
        "color".to_string(),
        json!({
            "isWhiteColor": true,
            "colorFrom": color,
            "colorTo": color,
        }),
    );
    map.insert(
        "clarity".to_string(),
        json!({
            "clarityFrom": clarity,
            "clarityTo": clarity,
        }),
    );

    Value::Object(map)
}

/// Derive the attribute summary for a combination from its filter.
pub fn summarize(
    filter: &Value,
    size: Option<&SizeRange>,
    color: &str,
    clarity: &str,
) -> AttributeSummary {
    AttributeSummary {
        shape: first_list_item(filter, "shape", "shapes"),
        color: color.to_string(),
        size: size.map(SizeRange::grid_label).unwrap_or_default(),
        clarity: clarity.to_string(),
        fluorescence: joined_list(filter, "fluorescence", "fluorescenceIntensities"),
        depth: range_label(filter, "depth", "depthPercentFrom", "depthPercentTo"),
        table: range_label(filter, "table", "tablePercentFrom", "tablePercentTo"),
        labs: joined_top_level_list(filter, "labs"),
        cut: range_label(filter, "finish", "cutFrom", "cutTo"),
        polish: range_label(filter, "finish", "polishFrom", "polishTo"),
        symmetry: range_label(filter, "finish", "symmetryFrom", "symmetryTo"),
        crown_height: range_label(filter, "crown", "crownHeightFrom", "crownHeightTo"),
        crown_angle: range_label(filter, "crown", "crownAngleFrom", "crownAngleTo"),
        pavilion_angle: range_label(filter, "pavilion", "pavilionAngleFrom", "pavilionAngleTo"),
    }
}

/// `"{from} - {to}"` for a pair of keys under `section`; each side empty
/// when missing.
fn range_label(filter: &Value, section: &str, from_key: &str, to_key: &str) -> String {
    format!(
        "{} - {}",
        field_string(filter, section, from_key),
        field_string(filter, section, to_key)
    )
}

fn field_string(filter: &Value, section: &str, key: &str) -> String {
    filter
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(display_string)
        .unwrap_or_default()
}

/// First string of a list under `filter[section][key]`, or empty.
fn first_list_item(filter: &Value, section: &str, key: &str) -> String {
    filter
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(display_string)
        .unwrap_or_default()
}

/// Comma-join a list under `filter[section][key]`.
fn joined_list(filter: &Value, section: &str, key: &str) -> String {
    filter
        .get(section)
        .and_then(|s| s.get(key))
        .map(join_items)
        .unwrap_or_default()
}

/// Comma-join a list directly under `filter[key]`.
fn joined_top_level_list(filter: &Value, key: &str) -> String {
    filter.get(key).map(join_items).unwrap_or_default()
}

fn join_items(value: &Value) -> String {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(display_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
