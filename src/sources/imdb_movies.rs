use crate::config::HttpConfig;
use crate::constants::{imdb_movies_url, IMDB_MOVIES_SOURCE, IMDB_PAGE_SIZE};
use crate::error::{Result, ScraperError};
use crate::normalize;
use crate::sources::element_text;
use crate::types::{ExtractedRow, MovieRow, MovieSource, RawRecord, Row};
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Scrapes IMDb advanced-search listing pages, most-voted first.
pub struct ImdbMoviesSource {
    client: reqwest::Client,
    end_index: Option<usize>,
}

impl ImdbMoviesSource {
    pub fn new(http: &HttpConfig, end_index: Option<usize>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()?;
        Ok(Self { client, end_index })
    }

    /// Parse one listing page into raw records plus whether a next page
    /// link is present.
    pub fn parse_page(html: &str) -> (Vec<RawRecord>, bool) {
        let document = Html::parse_document(html);
        let container_selector = Selector::parse("div.lister-item.mode-advanced").unwrap();
        let title_selector = Selector::parse("h3 a").unwrap();
        let rating_selector = Selector::parse("strong").unwrap();
        let genre_selector = Selector::parse("span.genre").unwrap();
        let metascore_selector = Selector::parse("span.metascore").unwrap();
        let runtime_selector = Selector::parse("span.runtime").unwrap();
        let votes_selector = Selector::parse("span[name=\"nv\"]").unwrap();
        let next_selector = Selector::parse("a.lister-page-next.next-page").unwrap();

        let mut records = Vec::new();
        for container in document.select(&container_selector) {
            let mut record = Map::new();

            if let Some(title) = container.select(&title_selector).next() {
                record.insert(
                    "title".to_string(),
                    Value::String(element_text(&title)),
                );
            }
            if let Some(rating) = container.select(&rating_selector).next() {
                record.insert(
                    "audience_rating".to_string(),
                    Value::String(element_text(&rating)),
                );
            }
            if let Some(genre) = container.select(&genre_selector).next() {
                record.insert(
                    "genre".to_string(),
                    Value::String(element_text(&genre)),
                );
            }
            if let Some(metascore) = container.select(&metascore_selector).next() {
                record.insert(
                    "critic_rating".to_string(),
                    Value::String(element_text(&metascore)),
                );
            }
            if let Some(runtime) = container.select(&runtime_selector).next() {
                record.insert(
                    "runtime".to_string(),
                    Value::String(element_text(&runtime)),
                );
            }
            // Vote counts live in the data-value attribute, already numeric text
            if let Some(votes) = container.select(&votes_selector).next() {
                if let Some(value) = votes.value().attr("data-value") {
                    record.insert("votes".to_string(), Value::String(value.to_string()));
                }
            }

            records.push(Value::Object(record));
        }

        let has_next = document.select(&next_selector).next().is_some();
        (records, has_next)
    }
}

#[async_trait::async_trait]
impl MovieSource for ImdbMoviesSource {
    fn source_name(&self) -> &'static str {
        IMDB_MOVIES_SOURCE
    }

    #[instrument(skip(self))]
    async fn fetch_year(&self, year: i32) -> Result<Vec<RawRecord>> {
        let base_url = imdb_movies_url(year);
        let mut all_records = Vec::new();
        let mut start_index = 1usize;

        loop {
            let url = format!("{base_url}&start={start_index}");
            debug!("Fetching listing page at index {}", start_index);
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                warn!(
                    "Listing page at index {} returned status {}",
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
                debug!("Reached the last listing page");
                break;
            }
            // IMDb shows 50 movies per page
            start_index += IMDB_PAGE_SIZE;
            if let Some(end_index) = self.end_index {
                if end_index <= start_index {
                    break;
                }
            }
        }

        info!(
            "Fetched {} movies from IMDb listings for {}",
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

        let audience_rating = raw
            .get("audience_rating")
            .and_then(Value::as_str)
            .and_then(|s| s.trim().parse::<f64>().ok());

        let genre = raw
            .get("genre")
            .and_then(Value::as_str)
            .map(|g| g.trim().to_string());
        let first_genre = genre
            .as_deref()
            .map(|g| normalize::extract_first_category(g).to_string());

        let critic_rating = raw
            .get("critic_rating")
            .and_then(Value::as_str)
            .and_then(|s| s.trim().parse::<i64>().ok());

        let runtime_min = match raw.get("runtime") {
            Some(value) => match normalize::extract_minutes(value) {
                Ok(minutes) => Some(minutes),
                Err(e) => {
                    warnings.push(format!("{title}: {e}"));
                    None
                }
            },
            None => None,
        };

        let votes = match raw.get("votes") {
            Some(value) => match normalize::currency_to_number(value) {
                Ok(count) => Some(count),
                Err(e) => {
                    warnings.push(format!("{title}: {e}"));
                    None
                }
            },
            None => None,
        };

        Ok(ExtractedRow {
            row: Row::Movie(MovieRow {
                title: title.trim().to_string(),
                year,
                audience_rating,
                genre,
                first_genre,
                critic_rating,
                runtime_min,
                votes,
            }),
            warnings,
        })
    }
}
