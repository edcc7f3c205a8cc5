use crate::domain::model::FailedRecord;
use crate::utils::error::Result;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Persists rows that could not be imported, as both semicolon CSV (UTF-8
/// with BOM, spreadsheet-friendly) and pretty JSON, sharing one run
/// timestamp for correlation.
pub struct FailureRecorder {
    out_dir: PathBuf,
}

impl FailureRecorder {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn flush(&self, columns: &[String], failed: &[FailedRecord]) -> Result<()> {
        if failed.is_empty() {
            tracing::info!("No failed records to save");
            return Ok(());
        }

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        fs::create_dir_all(&self.out_dir)?;

        let csv_path = self.out_dir.join(format!("failed_records_{}.csv", timestamp));
        let json_path = self
            .out_dir
            .join(format!("failed_records_{}.json", timestamp));

        fs::write(&csv_path, self.render_csv(columns, failed)?)?;
        fs::write(&json_path, self.render_json(columns, failed)?)?;

        tracing::info!(
            "Failed records saved to {} and {} ({} records)",
            csv_path.display(),
            json_path.display(),
            failed.len()
        );
        Ok(())
    }

    fn render_csv(&self, columns: &[String], failed: &[FailedRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(UTF8_BOM.to_vec());

        let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
        header.push("error_message");
        header.push("error_time");
        writer.write_record(&header)?;

        for record in failed {
            let mut fields: Vec<String> = columns
                .iter()
                .map(|col| {
                    record
                        .row
                        .get(col)
                        .map(|cell| cell.as_text())
                        .unwrap_or_default()
                })
                .collect();
            fields.push(record.error_message.clone());
            fields.push(record.error_time.clone());
            writer.write_record(&fields)?;
        }

        Ok(writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?)
    }

    fn render_json(&self, columns: &[String], failed: &[FailedRecord]) -> Result<String> {
        let entries: Vec<Value> = failed
            .iter()
            .map(|record| {
                let mut object = serde_json::Map::new();
                for col in columns {
                    let value = record
                        .row
                        .get(col)
                        .map(|cell| cell.to_json())
                        .unwrap_or(Value::Null);
                    object.insert(col.clone(), value);
                }
                object.insert(
                    "error_message".to_string(),
                    Value::String(record.error_message.clone()),
                );
                object.insert(
                    "error_time".to_string(),
                    Value::String(record.error_time.clone()),
                );
                Value::Object(object)
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }
}
