use crate::domain::model::{NormalizedRecord, RawCell, RawRow};
use crate::utils::error::{ImportError, Result};
use serde_json::Value;

/// Columns a song record is built from. `album_date` is passed through as
/// text; `youtube_views` gets integer cleaning; the rest go through
/// `clean_scalar`.
pub const SONG_FIELDS: [&str; 17] = [
    "title",
    "artist",
    "average_score",
    "score_2024_10",
    "score_2024_q3",
    "score_2024_q2",
    "score_2024_q1",
    "score_2023",
    "album_date",
    "language",
    "genre",
    "playlists_name",
    "energy",
    "youtube_url",
    "youtube_views",
    "spotify_url",
    "album_name",
];

const VIEW_COUNT_FIELD: &str = "youtube_views";

/// Cleans a numeric cell: strips thousands-separator commas and interior
/// spaces from text, parses, and truncates to an integer. A present but
/// unparseable value degrades to None with a warning, never an error.
pub fn clean_number(cell: &RawCell) -> Option<i64> {
    match cell {
        RawCell::Missing => None,
        RawCell::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        RawCell::Number(_) => None,
        RawCell::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && *c != ' ').collect();
            match cleaned.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n.trunc() as i64),
                _ => {
                    tracing::warn!("Could not convert value '{}' to a number", s);
                    None
                }
            }
        }
    }
}

/// Cleans one cell into a JSON-safe value, or None for anything that cannot
/// be confidently interpreted. Total over its input: never errors.
pub fn clean_scalar(cell: &RawCell, field_name: &str) -> Option<Value> {
    match cell {
        RawCell::Missing => None,
        RawCell::Text(s) if s.trim().is_empty() => None,
        _ if field_name == VIEW_COUNT_FIELD => clean_number(cell).map(Value::from),
        RawCell::Number(n) if !n.is_finite() => None,
        RawCell::Number(n) => {
            if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                Some(Value::from(*n as i64))
            } else {
                Some(Value::from(*n))
            }
        }
        RawCell::Text(s) => Some(Value::String(s.trim().to_string())),
    }
}

/// Builds the insert payload for one row. Null-cleaned fields are dropped so
/// the record never carries an explicit null; a column absent from the row
/// entirely is a schema mismatch and aborts the batch.
pub fn build_record(row: &RawRow) -> Result<NormalizedRecord> {
    let mut record = NormalizedRecord::new();

    for field in SONG_FIELDS {
        let cell = row.get(field).ok_or_else(|| ImportError::SchemaError {
            column: field.to_string(),
        })?;

        // album_date arrives already date-validated by the reader
        let value = if field == "album_date" {
            if cell.is_missing() {
                None
            } else {
                Some(Value::String(cell.as_text()))
            }
        } else {
            clean_scalar(cell, field)
        };

        if let Some(value) = value {
            record.insert(field.to_string(), value);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row_with_all_fields() -> RawRow {
        let mut cells = HashMap::new();
        for field in SONG_FIELDS {
            cells.insert(field.to_string(), RawCell::Missing);
        }
        cells.insert("title".to_string(), RawCell::Text("Song A".to_string()));
        cells.insert("artist".to_string(), RawCell::Text("Artist A".to_string()));
        RawRow { cells }
    }

    #[test]
    fn test_clean_number_strips_thousands_separators() {
        let cell = RawCell::Text("1,234,567".to_string());
        assert_eq!(clean_number(&cell), Some(1234567));
    }

    #[test]
    fn test_clean_number_strips_interior_spaces() {
        let cell = RawCell::Text("2 000".to_string());
        assert_eq!(clean_number(&cell), Some(2000));
    }

    #[test]
    fn test_clean_number_truncates_decimals() {
        assert_eq!(clean_number(&RawCell::Text("123.9".to_string())), Some(123));
        assert_eq!(clean_number(&RawCell::Number(45.7)), Some(45));
    }

    #[test]
    fn test_clean_number_unparseable_returns_none() {
        assert_eq!(clean_number(&RawCell::Text("abc".to_string())), None);
        assert_eq!(clean_number(&RawCell::Text("12x34".to_string())), None);
    }

    #[test]
    fn test_clean_number_missing_returns_none() {
        assert_eq!(clean_number(&RawCell::Missing), None);
    }

    #[test]
    fn test_clean_scalar_null_markers_return_none() {
        assert_eq!(clean_scalar(&RawCell::Missing, "title"), None);
        assert_eq!(clean_scalar(&RawCell::Text("".to_string()), "title"), None);
        assert_eq!(clean_scalar(&RawCell::Text("   ".to_string()), "title"), None);
        assert_eq!(clean_scalar(&RawCell::Number(f64::NAN), "energy"), None);
    }

    #[test]
    fn test_clean_scalar_trims_text() {
        assert_eq!(
            clean_scalar(&RawCell::Text("  hello  ".to_string()), "title"),
            Some(Value::String("hello".to_string()))
        );
    }

    #[test]
    fn test_clean_scalar_integral_number_becomes_integer() {
        assert_eq!(
            clean_scalar(&RawCell::Number(42.0), "score_2023"),
            Some(Value::from(42i64))
        );
    }

    #[test]
    fn test_clean_scalar_fractional_number_stays_float() {
        assert_eq!(
            clean_scalar(&RawCell::Number(3.5), "average_score"),
            Some(Value::from(3.5))
        );
    }

    #[test]
    fn test_clean_scalar_view_count_gets_numeric_cleaning() {
        assert_eq!(
            clean_scalar(&RawCell::Text("2,000".to_string()), "youtube_views"),
            Some(Value::from(2000i64))
        );
    }

    #[test]
    fn test_clean_scalar_idempotent_on_clean_values() {
        let text = RawCell::Text("Song A".to_string());
        let once = clean_scalar(&text, "title").unwrap();
        let again = clean_scalar(
            &RawCell::Text(once.as_str().unwrap().to_string()),
            "title",
        )
        .unwrap();
        assert_eq!(once, again);

        let views = RawCell::Text("2000".to_string());
        let once = clean_scalar(&views, "youtube_views").unwrap();
        let again = clean_scalar(
            &RawCell::Number(once.as_i64().unwrap() as f64),
            "youtube_views",
        )
        .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_build_record_drops_null_fields() {
        let row = row_with_all_fields();
        let record = build_record(&row).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record["title"], Value::String("Song A".to_string()));
        assert!(!record.contains_key("album_date"));
        assert!(!record.values().any(|v| v.is_null()));
    }

    #[test]
    fn test_build_record_passes_album_date_through() {
        let mut row = row_with_all_fields();
        row.cells.insert(
            "album_date".to_string(),
            RawCell::Text("2024-03-15".to_string()),
        );
        let record = build_record(&row).unwrap();
        assert_eq!(record["album_date"], Value::String("2024-03-15".to_string()));
    }

    #[test]
    fn test_build_record_missing_column_is_schema_error() {
        let mut row = row_with_all_fields();
        row.cells.remove("title");

        let err = build_record(&row).unwrap_err();
        assert!(matches!(
            err,
            ImportError::SchemaError { column } if column == "title"
        ));
    }

    #[test]
    fn test_build_record_cleans_view_count_text() {
        let mut row = row_with_all_fields();
        row.cells.insert(
            "youtube_views".to_string(),
            RawCell::Text("1,500,000".to_string()),
        );
        let record = build_record(&row).unwrap();
        assert_eq!(record["youtube_views"], Value::from(1500000i64));
    }
}
