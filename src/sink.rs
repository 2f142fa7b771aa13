use crate::error::Result;
use crate::types::Row;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Sink for the typed rows a pipeline run produces
#[async_trait]
pub trait RowSink: Send + Sync {
    /// Write one source's rows; returns a description of where they went.
    async fn write_rows(&self, name: &str, rows: &[Row]) -> Result<String>;
}

/// Writes rows as `{output_dir}/{name}.csv`, headers from the row fields.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl RowSink for CsvSink {
    async fn write_rows(&self, name: &str, rows: &[Row]) -> Result<String> {
        // Ensure output directory exists
        fs::create_dir_all(&self.output_dir)?;

        let filepath = self.output_dir.join(format!("{name}.csv"));
        let mut writer = csv::Writer::from_path(&filepath)?;
        for row in rows {
            // Serialize the inner struct so headers come from its fields
            match row {
                Row::Movie(movie) => writer.serialize(movie)?,
                Row::Gross(gross) => writer.serialize(gross)?,
                Row::BoxOffice(box_office) => writer.serialize(box_office)?,
            }
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", rows.len(), filepath.display());
        Ok(filepath.to_string_lossy().to_string())
    }
}

/// In-memory sink implementation for development/testing
pub struct InMemorySink {
    rows: Mutex<HashMap<String, Vec<Row>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }

    pub fn rows_for(&self, name: &str) -> Vec<Row> {
        let rows = self.rows.lock().unwrap();
        rows.get(name).cloned().unwrap_or_default()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowSink for InMemorySink {
    async fn write_rows(&self, name: &str, rows: &[Row]) -> Result<String> {
        let mut stored = self.rows.lock().unwrap();
        stored
            .entry(name.to_string())
            .or_default()
            .extend(rows.iter().cloned());

        debug!("Stored {} rows in memory under {}", rows.len(), name);
        Ok(format!("memory://{name}"))
    }
}
