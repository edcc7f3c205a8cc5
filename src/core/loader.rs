use crate::core::normalize::build_record;
use crate::core::recorder::FailureRecorder;
use crate::domain::model::{FailedRecord, ImportSummary, SourceTable};
use crate::domain::ports::SongSink;
use crate::utils::error::Result;

const SONGS_TABLE: &str = "songs";

/// Runs the batch: one insert per row in source order, per-row failure
/// isolation, and a guaranteed flush of accumulated failures on every exit
/// path.
pub struct Importer<S: SongSink> {
    sink: S,
    recorder: FailureRecorder,
    failed: Vec<FailedRecord>,
}

impl<S: SongSink> Importer<S> {
    pub fn new(sink: S, recorder: FailureRecorder) -> Self {
        Self {
            sink,
            recorder,
            failed: Vec::new(),
        }
    }

    pub async fn import_songs(&mut self, table: &SourceTable) -> Result<ImportSummary> {
        let mut summary = ImportSummary {
            total: table.rows.len(),
            ..Default::default()
        };

        let outcome = self.run_rows(table, &mut summary).await;

        // Flush and summary run whether the loop completed or aborted.
        self.recorder.flush(&table.columns, &self.failed)?;
        tracing::info!(
            "Import summary: {} processed, {} succeeded, {} failed",
            summary.total,
            summary.succeeded,
            summary.failed
        );

        outcome.map(|_| summary)
    }

    async fn run_rows(&mut self, table: &SourceTable, summary: &mut ImportSummary) -> Result<()> {
        for (index, row) in table.rows.iter().enumerate() {
            // A missing column is systemic and recurs for every remaining
            // row, so it aborts the batch instead of becoming a FailedRecord.
            let record = build_record(row)?;

            let title = record
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or("<untitled>")
                .to_string();
            tracing::info!(
                "Inserting song ({}/{}): {}",
                index + 1,
                summary.total,
                title
            );

            match self.sink.insert(SONGS_TABLE, &record).await {
                Ok(()) => {
                    tracing::info!("Song '{}' imported successfully", title);
                    summary.succeeded += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to import song {}: {}", index + 1, e);
                    self.failed.push(FailedRecord::new(row.clone(), e.to_string()));
                    summary.failed += 1;
                }
            }
        }

        Ok(())
    }
}
