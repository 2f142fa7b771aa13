#[cfg(test)]
mod tests {
    use boxoffice_scraper::config::HttpConfig;
    use boxoffice_scraper::sources::imdb_gross::ImdbGrossSource;
    use boxoffice_scraper::sources::imdb_movies::ImdbMoviesSource;
    use boxoffice_scraper::types::{MovieSource, Row};

    const LISTING_PAGE: &str = r#"
    <html><body>
      <div class="lister-item mode-advanced">
        <div class="lister-item-content">
          <h3 class="lister-item-header"><a href="/title/tt0468569/">The Dark Knight</a></h3>
          <p class="text-muted">
            <span class="runtime">152 min</span>
            <span class="genre"> Action, Crime, Drama </span>
          </p>
          <div class="ratings-bar"><strong>9.0</strong><span class="metascore favorable">84</span></div>
          <p class="sort-num_votes-visible"><span name="nv" data-value="2303232">2.3M</span></p>
        </div>
      </div>
      <div class="lister-item mode-advanced">
        <div class="lister-item-content">
          <h3 class="lister-item-header"><a href="/title/tt0000000/">Obscure Short</a></h3>
        </div>
      </div>
      <a class="lister-page-next next-page" href="/search/title/?start=51">Next</a>
    </body></html>
    "#;

    const GROSS_PAGE: &str = r#"
    <html><body>
      <div class="lister-item-content">
        <a href="/title/tt4154796/">Avengers: Endgame</a>
        <p class="sort-num_votes-visible"><span name="nv">$16.46M</span></p>
      </div>
      <div class="lister-item-content">
        <a href="/title/tt0000001/">Unreleased Film</a>
      </div>
    </body></html>
    "#;

    #[test]
    fn listing_page_yields_one_record_per_container() {
        let (records, has_next) = ImdbMoviesSource::parse_page(LISTING_PAGE);

        assert_eq!(records.len(), 2);
        assert!(has_next);

        let first = &records[0];
        assert_eq!(first["title"].as_str().unwrap(), "The Dark Knight");
        assert_eq!(first["audience_rating"].as_str().unwrap(), "9.0");
        assert_eq!(first["genre"].as_str().unwrap(), "Action, Crime, Drama");
        assert_eq!(first["critic_rating"].as_str().unwrap(), "84");
        assert_eq!(first["runtime"].as_str().unwrap(), "152 min");
        assert_eq!(first["votes"].as_str().unwrap(), "2303232");

        // Absent fields stay absent rather than becoming placeholders
        let second = &records[1];
        assert_eq!(second["title"].as_str().unwrap(), "Obscure Short");
        assert!(second.get("runtime").is_none());
        assert!(second.get("votes").is_none());
    }

    #[test]
    fn listing_page_without_next_link_ends_pagination() {
        let page = LISTING_PAGE.replace("lister-page-next next-page", "disabled");
        let (records, has_next) = ImdbMoviesSource::parse_page(&page);
        assert_eq!(records.len(), 2);
        assert!(!has_next);
    }

    #[test]
    fn listing_record_normalizes_into_movie_row() {
        let source = ImdbMoviesSource::new(&HttpConfig::default(), None).unwrap();
        let (records, _) = ImdbMoviesSource::parse_page(LISTING_PAGE);

        let extracted = source.extract_row(2008, &records[0]).unwrap();
        assert!(extracted.warnings.is_empty());
        let Row::Movie(row) = extracted.row else {
            panic!("expected a movie row");
        };

        assert_eq!(row.title, "The Dark Knight");
        assert_eq!(row.year, 2008);
        assert_eq!(row.audience_rating, Some(9.0));
        assert_eq!(row.genre.as_deref(), Some("Action, Crime, Drama"));
        assert_eq!(row.first_genre.as_deref(), Some("Action"));
        assert_eq!(row.critic_rating, Some(84));
        assert_eq!(row.runtime_min, Some(152));
        assert_eq!(row.votes, Some(2_303_232));
    }

    #[test]
    fn sparse_listing_record_keeps_optional_fields_empty() {
        let source = ImdbMoviesSource::new(&HttpConfig::default(), None).unwrap();
        let (records, _) = ImdbMoviesSource::parse_page(LISTING_PAGE);

        let extracted = source.extract_row(2008, &records[1]).unwrap();
        assert!(extracted.warnings.is_empty());
        let Row::Movie(row) = extracted.row else {
            panic!("expected a movie row");
        };

        assert_eq!(row.title, "Obscure Short");
        assert_eq!(row.audience_rating, None);
        assert_eq!(row.genre, None);
        assert_eq!(row.first_genre, None);
        assert_eq!(row.runtime_min, None);
        assert_eq!(row.votes, None);
    }

    #[test]
    fn gross_page_yields_title_and_gross() {
        let (records, has_next) = ImdbGrossSource::parse_page(GROSS_PAGE);

        assert_eq!(records.len(), 2);
        assert!(!has_next);
        assert_eq!(records[0]["title"].as_str().unwrap(), "Avengers: Endgame");
        assert_eq!(records[0]["gross"].as_str().unwrap(), "$16.46M");
        assert!(records[1].get("gross").is_none());
    }

    #[test]
    fn gross_record_normalizes_millions_suffix() {
        let source = ImdbGrossSource::new(&HttpConfig::default(), None).unwrap();
        let (records, _) = ImdbGrossSource::parse_page(GROSS_PAGE);

        let extracted = source.extract_row(2019, &records[0]).unwrap();
        assert!(extracted.warnings.is_empty());
        let Row::Gross(row) = extracted.row else {
            panic!("expected a gross row");
        };
        assert_eq!(row.title, "Avengers: Endgame");
        assert_eq!(row.gross, Some(16_460_000));

        let extracted = source.extract_row(2019, &records[1]).unwrap();
        let Row::Gross(row) = extracted.row else {
            panic!("expected a gross row");
        };
        assert_eq!(row.gross, None);
    }

    #[test]
    fn gross_record_with_unparseable_figure_warns_and_leaves_none() {
        let source = ImdbGrossSource::new(&HttpConfig::default(), None).unwrap();
        let raw = serde_json::json!({"title": "Broken", "gross": "N/A"});

        let extracted = source.extract_row(2019, &raw).unwrap();
        assert_eq!(extracted.warnings.len(), 1);
        let Row::Gross(row) = extracted.row else {
            panic!("expected a gross row");
        };
        assert_eq!(row.gross, None);
    }

    #[test]
    fn record_without_title_is_an_error() {
        let source = ImdbMoviesSource::new(&HttpConfig::default(), None).unwrap();
        let raw = serde_json::json!({"runtime": "100 min"});
        assert!(source.extract_row(2008, &raw).is_err());
    }
}
