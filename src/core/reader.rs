use crate::domain::model::{RawCell, RawRow, SourceTable};
use crate::utils::error::{ImportError, Result};
use chrono::NaiveDate;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

fn parse_cell(raw: &str) -> RawCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return RawCell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => RawCell::Number(n),
        Err(_) => RawCell::Text(trimmed.to_string()),
    }
}

fn parse_album_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Reads the delimited source file into an ordered table of raw rows.
///
/// Encoding is detected from the raw bytes (BOM, then UTF-8 validity, then
/// Windows-1252 fallback), header names are lowercased and trimmed, and
/// every present `album_date` value must parse as a calendar date or the
/// whole read fails.
pub fn read_songs(path: &Path) -> Result<SourceTable> {
    let bytes = fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    tracing::info!("Detected encoding: {}", encoding.name());

    let (decoded, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ImportError::SourceError {
            message: format!(
                "File {} could not be decoded as {}",
                path.display(),
                encoding.name()
            ),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(decoded.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let date_column = columns.iter().position(|c| c == "album_date");

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let mut cells = HashMap::new();

        for (col_index, column) in columns.iter().enumerate() {
            let raw = record.get(col_index).unwrap_or("");
            let mut cell = parse_cell(raw);

            if Some(col_index) == date_column {
                // an unknown date stays unknown; anything present must parse
                if !cell.is_missing() {
                    let text = cell.as_text();
                    let date = parse_album_date(&text).ok_or_else(|| {
                        ImportError::SourceError {
                            message: format!(
                                "Row {}: album_date '{}' is not a parseable calendar date",
                                index + 1,
                                text
                            ),
                        }
                    })?;
                    cell = RawCell::Text(date.format("%Y-%m-%d").to_string());
                }
            }

            cells.insert(column.clone(), cell);
        }

        rows.push(RawRow { cells });
    }

    if let Some(first) = rows.first() {
        tracing::debug!("First row sample: {:?}", first.cells);
    }
    tracing::info!("CSV read successfully, {} records found", rows.len());

    Ok(SourceTable { columns, rows })
}
