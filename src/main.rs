use clap::{Parser, Subcommand};
use tracing::{error, warn};

use boxoffice_scraper::config::Config;
use boxoffice_scraper::constants;
use boxoffice_scraper::logging;
use boxoffice_scraper::pipeline::Pipeline;
use boxoffice_scraper::sink::{CsvSink, RowSink};
use boxoffice_scraper::sources::create_source;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "boxoffice_scraper")]
#[command(about = "Box office data scraper for IMDb and Box Office Mojo")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// First release year to scrape (defaults to config)
    #[arg(long, global = true)]
    from_year: Option<i32>,

    /// Last release year to scrape (defaults to config)
    #[arg(long, global = true)]
    to_year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape IMDb listing pages into imdb_movies.csv
    Movies {
        /// Stop paginating once this result index is reached
        #[arg(long)]
        end_index: Option<usize>,
    },
    /// Scrape IMDb gross listings into imdb_gross.csv
    Gross {
        /// Stop paginating once this result index is reached
        #[arg(long)]
        end_index: Option<usize>,
    },
    /// Scrape Box Office Mojo yearly tables into box_office_mojo.csv
    BoxOffice,
    /// Run all sources sequentially
    Run,
}

async fn run_sources(
    source_names: &[String],
    years: RangeInclusive<i32>,
    end_index: Option<usize>,
    config: &Config,
    sink: Arc<dyn RowSink>,
) -> Result<(), Box<dyn std::error::Error>> {
    for source_name in source_names {
        let span = tracing::info_span!("Running source", source = %source_name);
        let _enter = span.enter();

        match create_source(source_name, &config.http, end_index)? {
            Some(source) => {
                let delay = Duration::from_millis(config.http.delay_ms);
                match Pipeline::run_for_source(source, years.clone(), delay, sink.clone()).await {
                    Ok(result) => {
                        println!("\n📊 Pipeline Results for {}:", source_name);
                        println!("   Total records: {}", result.total_records);
                        println!("   Rows written: {}", result.written_rows);
                        println!("   Record errors: {}", result.errors.len());
                        println!("   Field warnings: {}", result.warnings.len());
                        println!("   Output file: {}", result.output);

                        if !result.errors.is_empty() {
                            warn!(
                                "{} errors encountered during pipeline run",
                                result.errors.len()
                            );
                            println!("\n⚠️  Errors encountered:");
                            for error in &result.errors {
                                println!("   - {}", error);
                            }
                        }
                    }
                    Err(e) => {
                        error!("Pipeline failed: {}", e);
                    }
                }
            }
            None => {
                warn!("Unknown source specified");
                println!(
                    "⚠️  Unknown source: {} (supported: {})",
                    source_name,
                    constants::get_supported_sources().join(", ")
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    let from_year = cli.from_year.unwrap_or(config.scrape.from_year);
    let to_year = cli.to_year.unwrap_or(config.scrape.to_year);
    let years = from_year..=to_year;

    let sink: Arc<dyn RowSink> = Arc::new(CsvSink::new(config.scrape.output_dir.clone()));

    let (source_names, end_index): (Vec<String>, Option<usize>) = match cli.command {
        Commands::Movies { end_index } => {
            println!("🎬 Scraping IMDb listings...");
            (vec![constants::IMDB_MOVIES_SOURCE.to_string()], end_index)
        }
        Commands::Gross { end_index } => {
            println!("💰 Scraping IMDb gross listings...");
            (vec![constants::IMDB_GROSS_SOURCE.to_string()], end_index)
        }
        Commands::BoxOffice => {
            println!("🎟️  Scraping Box Office Mojo tables...");
            (
                vec![constants::BOX_OFFICE_MOJO_SOURCE.to_string()],
                None,
            )
        }
        Commands::Run => {
            println!("🚀 Running all sources...");
            (
                constants::get_supported_sources()
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect(),
                None,
            )
        }
    };

    run_sources(&source_names, years, end_index, &config, sink).await?;
    Ok(())
}
