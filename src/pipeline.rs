use crate::error::Result;
use crate::sink::RowSink;
use crate::types::MovieSource;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub source: String,
    pub total_records: usize,
    pub written_rows: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub output: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Run the complete pipeline for a given source: fetch every year in
    /// the range, normalize each record into a typed row, and hand the
    /// rows to the sink. Record-level failures are accumulated, not fatal;
    /// a fetch failure aborts the run.
    #[instrument(skip(source, sink), fields(source_name = %source.source_name()))]
    pub async fn run_for_source(
        source: Box<dyn MovieSource>,
        years: RangeInclusive<i32>,
        delay: Duration,
        sink: Arc<dyn RowSink>,
    ) -> Result<PipelineResult> {
        let source_name = source.source_name().to_string();
        info!("🚀 Starting pipeline for {}", source_name);
        println!("🚀 Starting pipeline for {}", source_name);

        let mut rows = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut total_records = 0usize;
        let last_year = *years.end();

        for year in years {
            info!("📡 Fetching {} records for {}...", source_name, year);
            println!("📡 Fetching {} records for {}...", source_name, year);
            let raw_records = source.fetch_year(year).await?;
            total_records += raw_records.len();

            for (i, raw_record) in raw_records.iter().enumerate() {
                match source.extract_row(year, raw_record) {
                    Ok(extracted) => {
                        for warning in &extracted.warnings {
                            warn!("Normalization warning: {}", warning);
                        }
                        warnings.extend(extracted.warnings);
                        rows.push(extracted.row);
                    }
                    Err(e) => {
                        let error_msg = format!("{source_name} {year} record {i}: {e}");
                        warn!("Failed to extract record {}: {}", i, e);
                        errors.push(error_msg);
                    }
                }
            }
            debug!("Accumulated {} rows after {}", rows.len(), year);

            if year != last_year && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!(
            "✅ Normalized {} rows ({} record errors, {} field warnings)",
            rows.len(),
            errors.len(),
            warnings.len()
        );
        println!(
            "✅ Normalized {} rows ({} record errors, {} field warnings)",
            rows.len(),
            errors.len(),
            warnings.len()
        );

        let output = sink.write_rows(&source_name, &rows).await?;
        info!("💾 Saved rows to {}", output);
        println!("💾 Saved rows to {}", output);

        Ok(PipelineResult {
            source: source_name,
            total_records,
            written_rows: rows.len(),
            errors,
            warnings,
            output,
        })
    }
}
