use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod map;
mod progress;
mod render;
mod scrape;
mod store;

#[derive(Debug, Parser)]
#[command(name = "ferias")]
#[command(about = "Scrape Montevideo feria vecinal listings and put them on a map")]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch listing pages and write the ferias found as JSON.
    Scrape {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(short, long, default_value = "ferias.json")]
        output: PathBuf,
    },
    /// Geocode a ferias JSON file and render an HTML map.
    Map {
        #[arg(short, long, default_value = "ferias.json")]
        input: PathBuf,

        #[command(flatten)]
        map: MapArgs,
    },
    /// Scrape, geocode and render in one go.
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Where to keep the scraped records.
        #[arg(long, default_value = "ferias.json")]
        json: PathBuf,

        #[command(flatten)]
        map: MapArgs,
    },
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Page to scrape; repeat for several.
    #[arg(short = 'u', long = "url")]
    urls: Vec<String>,

    /// File with one URL per line.
    #[arg(short = 'f', long)]
    url_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct MapArgs {
    #[arg(short, long, default_value = "ferias_map.html")]
    output: PathBuf,

    /// Also write the geocoded records (with coordinates) to this file.
    #[arg(long)]
    geocoded: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ferias_core::load_app_config()?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Scrape { source, output } => {
            let urls = scrape::collect_urls(&source.urls, source.url_file.as_deref())?;
            scrape::run_scrape(&config, &urls, &output).await?;
        }
        Commands::Map { input, map } => {
            let records = store::read_records(&input)?;
            map::run_map(&config, records, &map.output, map.geocoded.as_deref()).await?;
        }
        Commands::Run { source, json, map } => {
            let urls = scrape::collect_urls(&source.urls, source.url_file.as_deref())?;
            let records = scrape::run_scrape(&config, &urls, &json).await?;
            map::run_map(&config, records, &map.output, map.geocoded.as_deref()).await?;
        }
    }

    Ok(())
}
