//! Excel export: one workbook per (search, size range), one sheet per
//! (color, clarity) combination.
//!
//! Sheet layout: attribute summary codes in row 0, summary values in row 1,
//! a blank row, then the listing table. Combinations that recorded a summary
//! but no listings still get their summary rows.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::error::{ExportError, Result};
use crate::filter::AttributeSummary;
use crate::flatten::LISTING_COLUMNS;
use crate::results::ResultSet;

/// Row offset of the listing header below the two summary rows.
const LISTING_HEADER_ROW: u32 = 3;

/// Write one workbook per (search, size range) pair into `output_dir`.
///
/// A workbook that fails (sheet-name collision, I/O) is logged and skipped;
/// the remaining workbooks still export. Returns the paths written.
pub fn write_workbooks(results: &ResultSet, output_dir: &Path, timestamp: &str) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for (search, size) in results.search_size_pairs() {
        match write_workbook(results, &search, &size, output_dir, timestamp) {
            Ok(path) => {
                log::info!("Saved: {}", path.display());
                written.push(path);
            }
            Err(e) => {
                log::error!("Failed to write workbook for '{search}' {size}: {e}");
            }
        }
    }
    written
}

fn write_workbook(
    results: &ResultSet,
    search: &str,
    size: &str,
    output_dir: &Path,
    timestamp: &str,
) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for key in results.keys_for(search, size) {
        let sheet_name = key.sheet_name();
        // Excel treats sheet names case-insensitively
        if !used_names.insert(sheet_name.to_lowercase()) {
            return Err(ExportError::SheetNameCollision(sheet_name));
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        if let Some(summary) = results.attributes(key) {
            write_summary(worksheet, summary)?;
        }

        let rows = results.listings(key);
        if !rows.is_empty() {
            for (col, column) in LISTING_COLUMNS.iter().enumerate() {
                worksheet.write_string(LISTING_HEADER_ROW, col as u16, column.header)?;
            }
            for (row_idx, record) in rows.iter().enumerate() {
                let row = LISTING_HEADER_ROW + 1 + row_idx as u32;
                for (col, value) in record.values().iter().enumerate() {
                    if let Some(value) = value {
                        worksheet.write_string(row, col as u16, value)?;
                    }
                }
            }
        }
    }

    let path = output_dir.join(workbook_file_name(search, size, timestamp));
    workbook.save(&path)?;
    Ok(path)
}

fn write_summary(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    summary: &AttributeSummary,
) -> Result<()> {
    for (col, header) in AttributeSummary::HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (col, value) in summary.values().iter().enumerate() {
        worksheet.write_string(1, col as u16, *value)?;
    }
    Ok(())
}

/// Workbook file name: search name, the size-range label reduced to its
/// alphanumeric characters, and the run-start timestamp.
/// `("MyList", "1.00:1.49", ts)` becomes `MyList100149_<ts>.xlsx`.
pub fn workbook_file_name(search: &str, size_label: &str, timestamp: &str) -> String {
    let size_digits: String = size_label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    format!("{search}{size_digits}_{timestamp}.xlsx")
}
