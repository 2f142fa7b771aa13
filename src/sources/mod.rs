pub mod imdb_gross;
pub mod imdb_movies;
pub mod mojo;

use crate::config::HttpConfig;
use crate::constants;
use crate::error::Result;
use crate::types::MovieSource;
use imdb_gross::ImdbGrossSource;
use imdb_movies::ImdbMoviesSource;
use mojo::MojoSource;

/// Build a source by name; `None` for an unknown name.
pub fn create_source(
    name: &str,
    http: &HttpConfig,
    end_index: Option<usize>,
) -> Result<Option<Box<dyn MovieSource>>> {
    let source: Box<dyn MovieSource> = match name {
        constants::IMDB_MOVIES_SOURCE => Box::new(ImdbMoviesSource::new(http, end_index)?),
        constants::IMDB_GROSS_SOURCE => Box::new(ImdbGrossSource::new(http, end_index)?),
        constants::BOX_OFFICE_MOJO_SOURCE => Box::new(MojoSource::new(http)?),
        _ => return Ok(None),
    };
    Ok(Some(source))
}

/// Concatenated text of an element, trimmed.
pub(crate) fn element_text(element: &scraper::ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
