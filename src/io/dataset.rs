//! Loading the name column from a tabular source file.
//!
//! CSV files and Excel-family workbooks are supported. Only the configured
//! column is read. Bad values never abort a load: CSV fields that are not
//! valid UTF-8 are decoded lossily, and workbook cells holding numbers, dates
//! or booleans are kept for display but excluded from matching.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info, warn};

use crate::entity::RawName;
use crate::TARGET_IO;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Read every value of `column` from the file at `path`, in row order.
pub fn load_names(path: &Path, column: &str) -> Result<Vec<RawName>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let names = if extension == "csv" {
        load_csv_column(path, column)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook_column(path, column)?
    } else {
        bail!(
            "Unsupported input format '{}' for {} (expected csv, xlsx, xls, xlsb or ods)",
            extension,
            path.display()
        );
    };

    info!(
        target: TARGET_IO,
        "Loaded {} rows from {}", names.len(), path.display()
    );
    Ok(names)
}

fn load_csv_column(path: &Path, column: &str) -> Result<Vec<RawName>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader
        .byte_headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?;
    let index = headers
        .iter()
        .position(|header| {
            String::from_utf8_lossy(header).trim_start_matches('\u{feff}') == column
        })
        .ok_or_else(|| missing_column(path, column))?;
    debug!(target: TARGET_IO, "Column '{}' found at index {}", column, index);

    let mut names = Vec::new();
    let mut invalid_utf8 = 0;
    for (i, result) in reader.byte_records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error at data row {}", i + 1))?;
        let value = match record.get(index).filter(|field| !field.is_empty()) {
            Some(field) => match std::str::from_utf8(field) {
                Ok(text) => RawName::Text(text.to_string()),
                Err(_) => {
                    invalid_utf8 += 1;
                    RawName::Text(String::from_utf8_lossy(field).into_owned())
                }
            },
            None => RawName::Missing,
        };
        names.push(value);
    }

    if invalid_utf8 > 0 {
        warn!(
            target: TARGET_IO,
            "{} values in column '{}' were not valid UTF-8 and were decoded lossily",
            invalid_utf8,
            column
        );
    }

    Ok(names)
}

fn load_workbook_column(path: &Path, column: &str) -> Result<Vec<RawName>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook {} has no sheets", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let mut rows = range.rows();
    let headers = rows.next().ok_or_else(|| missing_column(path, column))?;
    let index = headers
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s == column))
        .ok_or_else(|| missing_column(path, column))?;
    debug!(
        target: TARGET_IO,
        "Column '{}' found at index {} of sheet '{}'", column, index, sheet_name
    );

    let names: Vec<RawName> = rows.map(|row| workbook_cell(row.get(index))).collect();

    let non_text = names
        .iter()
        .filter(|name| matches!(name, RawName::Other(_)))
        .count();
    if non_text > 0 {
        debug!(
            target: TARGET_IO,
            "{} cells in column '{}' are not text and are excluded from matching",
            non_text,
            column
        );
    }

    Ok(names)
}

fn workbook_cell(cell: Option<&Data>) -> RawName {
    match cell {
        Some(Data::String(s)) if !s.is_empty() => RawName::Text(s.clone()),
        None | Some(Data::Empty) | Some(Data::String(_)) | Some(Data::Error(_)) => {
            RawName::Missing
        }
        Some(other) => RawName::Other(other.to_string()),
    }
}

fn missing_column(path: &Path, column: &str) -> anyhow::Error {
    anyhow!(
        "Required column '{}' not found in {}",
        column,
        path.display()
    )
}
