use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Raw record data as scraped from a listing page
pub type RawRecord = serde_json::Value;

/// One movie from an IMDb listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRow {
    pub title: String,
    pub year: i32,
    pub audience_rating: Option<f64>,
    pub genre: Option<String>,
    pub first_genre: Option<String>,
    pub critic_rating: Option<i64>,
    pub runtime_min: Option<i64>,
    pub votes: Option<i64>,
}

/// One movie from an IMDb gross listing, gross in whole dollars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossRow {
    pub title: String,
    pub year: i32,
    pub gross: Option<i64>,
}

/// One row of a Box Office Mojo yearly table, grosses in whole dollars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxOfficeRow {
    pub rank: i64,
    pub title: String,
    pub year: i32,
    pub worldwide: Option<i64>,
    pub domestic: Option<i64>,
    pub overseas: Option<i64>,
}

/// A typed row produced by any source
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Row {
    Movie(MovieRow),
    Gross(GrossRow),
    BoxOffice(BoxOfficeRow),
}

/// A row plus any field-level normalization warnings collected on the way
#[derive(Debug, Clone)]
pub struct ExtractedRow {
    pub row: Row,
    pub warnings: Vec<String>,
}

/// Core trait that all movie data sources must implement
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync {
    /// Unique identifier for this source; also names the output file
    fn source_name(&self) -> &'static str;

    /// Fetch all raw records for one release year
    async fn fetch_year(&self, year: i32) -> Result<Vec<RawRecord>>;

    /// Convert one raw record into a typed row
    fn extract_row(&self, year: i32, raw: &RawRecord) -> Result<ExtractedRow>;
}
