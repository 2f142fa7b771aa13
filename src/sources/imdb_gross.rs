use crate::config::HttpConfig;
use crate::constants::{imdb_gross_url, IMDB_GROSS_SOURCE, IMDB_PAGE_SIZE};
use crate::error::{Result, ScraperError};
use crate::normalize::{self, GrossUnit};
use crate::sources::element_text;
use crate::types::{ExtractedRow, GrossRow, MovieSource, RawRecord, Row};
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Scrapes IMDb listing pages sorted by US gross. The gross column
/// abbreviates figures as `$16.46M`; a bare number in it is in millions.
pub struct ImdbGrossSource {
    client: reqwest::Client,
    end_index: Option<usize>,
}

impl ImdbGrossSource {
    pub fn new(http: &HttpConfig, end_index: Option<usize>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()?;
        Ok(Self { client, end_index })
    }

    /// Parse one gross listing page into raw records plus whether a next
    /// page link is present.
    pub fn parse_page(html: &str) -> (Vec<RawRecord>, bool) {
        let document = Html::parse_document(html);
        let container_selector = Selector::parse("div.lister-item-content").unwrap();
        let title_selector = Selector::parse("a").unwrap();
        let gross_selector = Selector::parse("span[name=\"nv\"]").unwrap();
        let next_selector = Selector::parse("a.lister-page-next.next-page").unwrap();

        let mut records = Vec::new();
        for container in document.select(&container_selector) {
            let mut record = Map::new();

            if let Some(title) = container.select(&title_selector).next() {
                record.insert("title".to_string(), Value::String(element_text(&title)));
            }
            if let Some(gross) = container.select(&gross_selector).next() {
                record.insert("gross".to_string(), Value::String(element_text(&gross)));
            }

            records.push(Value::Object(record));
        }

        let has_next = document.select(&next_selector).next().is_some();
        (records, has_next)
    }
}

#[async_trait::async_trait]
impl MovieSource for ImdbGrossSource {
    fn source_name(&self) -> &'static str {
        IMDB_GROSS_SOURCE
    }

    #[instrument(skip(self))]
    async fn fetch_year(&self, year: i32) -> Result<Vec<RawRecord>> {
        let base_url = imdb_gross_url(year);
        let mut all_records = Vec::new();
        let mut start_index = 1usize;

        loop {
            let url = format!("{base_url}&start={start_index}");
            debug!("Fetching gross listing page at index {}", start_index);
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                warn!(
                    "Gross listing page at index {} returned status {}",
                    start_index,
                    response.status().as_u16()
                );
                break;
            }

            let body = response.text().await?;
            let (records, has_next) = Self::parse_page(&body);
            if records.is_empty() {
                debug!("No more movies found at index {}", start_index);
                break;
            }
            all_records.extend(records);

            if !has_next {
                debug!("Reached the last gross listing page");
                break;
            }
            start_index += IMDB_PAGE_SIZE;
            if let Some(end_index) = self.end_index {
                if end_index <= start_index {
                    break;
                }
            }
        }

        info!(
            "Fetched {} movies from IMDb gross listings for {}",
            all_records.len(),
            year
        );
        Ok(all_records)
    }

    fn extract_row(&self, year: i32, raw: &RawRecord) -> Result<ExtractedRow> {
        let title = raw["title"]
            .as_str()
            .ok_or_else(|| ScraperError::MissingField("title not found".into()))?;

        let mut warnings = Vec::new();
        let gross = match raw.get("gross") {
            Some(value) => match normalize::convert_gross_to_numeric(value, GrossUnit::Millions) {
                Ok(amount) => Some(amount),
                Err(e) => {
                    warnings.push(format!("{title}: {e}"));
                    None
                }
            },
            None => None,
        };

        Ok(ExtractedRow {
            row: Row::Gross(GrossRow {
                title: title.trim().to_string(),
                year,
                gross,
            }),
            warnings,
        })
    }
}
