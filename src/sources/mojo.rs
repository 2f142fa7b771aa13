use crate::config::HttpConfig;
use crate::constants::{mojo_year_url, BOX_OFFICE_MOJO_SOURCE};
use crate::error::{Result, ScraperError};
use crate::normalize::{self, GrossUnit};
use crate::sources::element_text;
use crate::types::{BoxOfficeRow, ExtractedRow, MovieSource, RawRecord, Row};
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{info, instrument};

/// Scrapes the Box Office Mojo worldwide-gross table, one page per year.
/// Cells are full comma-grouped dollar figures; a bare integer is literal
/// dollars, and missing figures render as `-`.
pub struct MojoSource {
    client: reqwest::Client,
}

impl MojoSource {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    /// Parse the first table on the page, header row skipped.
    pub fn parse_page(html: &str) -> Result<Vec<RawRecord>> {
        let document = Html::parse_document(html);
        let table_selector = Selector::parse("table").unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let table = document.select(&table_selector).next().ok_or_else(|| {
            ScraperError::Source {
                message: "No table found".to_string(),
            }
        })?;

        let mut records = Vec::new();
        // Skip the header row
        for row in table.select(&row_selector).skip(1) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| element_text(&cell))
                .collect();
            if cells.len() < 5 {
                continue;
            }

            let mut record = Map::new();
            record.insert("rank".to_string(), Value::String(cells[0].clone()));
            record.insert("title".to_string(), Value::String(cells[1].clone()));
            record.insert("worldwide".to_string(), Value::String(cells[2].clone()));
            record.insert("domestic".to_string(), Value::String(cells[3].clone()));
            record.insert("overseas".to_string(), Value::String(cells[4].clone()));
            records.push(Value::Object(record));
        }

        Ok(records)
    }

    fn gross_cell(
        raw: &RawRecord,
        field: &str,
        title: &str,
        warnings: &mut Vec<String>,
    ) -> Option<i64> {
        let value = raw.get(field)?;
        // Mojo renders a missing figure as a dash
        if value.as_str() == Some("-") {
            return None;
        }
        match normalize::convert_gross_to_numeric(value, GrossUnit::Dollars) {
            Ok(amount) => Some(amount),
            Err(e) => {
                warnings.push(format!("{title} {field}: {e}"));
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl MovieSource for MojoSource {
    fn source_name(&self) -> &'static str {
        BOX_OFFICE_MOJO_SOURCE
    }

    #[instrument(skip(self))]
    async fn fetch_year(&self, year: i32) -> Result<Vec<RawRecord>> {
        let url = mojo_year_url(year);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Source {
                message: format!("Failed to get data. HTTP status code: {}", status.as_u16()),
            });
        }

        let body = response.text().await?;
        let records = Self::parse_page(&body)?;
        info!(
            "Fetched {} box office rows from Box Office Mojo for {}",
            records.len(),
            year
        );
        Ok(records)
    }

    fn extract_row(&self, year: i32, raw: &RawRecord) -> Result<ExtractedRow> {
        let title = raw["title"]
            .as_str()
            .ok_or_else(|| ScraperError::MissingField("title not found".into()))?;
        let rank = raw
            .get("rank")
            .map(normalize::currency_to_number)
            .transpose()?
            .ok_or_else(|| ScraperError::MissingField("rank not found".into()))?;

        let mut warnings = Vec::new();
        let worldwide = Self::gross_cell(raw, "worldwide", title, &mut warnings);
        let domestic = Self::gross_cell(raw, "domestic", title, &mut warnings);
        let overseas = Self::gross_cell(raw, "overseas", title, &mut warnings);

        Ok(ExtractedRow {
            row: Row::BoxOffice(BoxOfficeRow {
                rank,
                title: title.trim().to_string(),
                year,
                worldwide,
                domestic,
                overseas,
            }),
            warnings,
        })
    }
}
