/// Source name constants to ensure consistency across the codebase

// Source names (used in CLI and as output file names)
pub const IMDB_MOVIES_SOURCE: &str = "imdb_movies";
pub const IMDB_GROSS_SOURCE: &str = "imdb_gross";
pub const BOX_OFFICE_MOJO_SOURCE: &str = "box_office_mojo";

/// IMDb advanced search shows 50 results per page
pub const IMDB_PAGE_SIZE: usize = 50;

// Year range scraped when no override is given
pub const DEFAULT_FROM_YEAR: i32 = 2000;
pub const DEFAULT_TO_YEAR: i32 = 2022;

/// Get all supported source names
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![
        IMDB_MOVIES_SOURCE,
        IMDB_GROSS_SOURCE,
        BOX_OFFICE_MOJO_SOURCE,
    ]
}

/// IMDb advanced search for one release year, most-voted first
pub fn imdb_movies_url(year: i32) -> String {
    format!(
        "https://www.imdb.com/search/title/?release_date={year}-01-01,{year}-12-31&sort=num_votes,desc"
    )
}

/// IMDb advanced search for one release year, highest US gross first
pub fn imdb_gross_url(year: i32) -> String {
    format!(
        "https://www.imdb.com/search/title/?release_date={year}-01-01,{year}-12-31&sort=boxoffice_gross_us,desc"
    )
}

/// Box Office Mojo worldwide table for one year
pub fn mojo_year_url(year: i32) -> String {
    format!("https://www.boxofficemojo.com/year/world/{year}/")
}
