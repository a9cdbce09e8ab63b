//! Diamond Export - RapNet Listing Reports
//!
//! Fetches filtered diamond listings for every saved-search, size-range,
//! color and clarity combination in the config and writes one Excel
//! workbook per (search, size range) into the output directory.

use std::path::PathBuf;

use clap::Parser;
use diamond_export::export::write_workbooks;
use diamond_export::pipeline::fetch_listings;
use diamond_export::{Config, RapNetApi};

/// RapNet diamond data exporter - writes one Excel report per saved search
/// and size range
#[derive(Parser, Debug)]
#[command(name = "diamond_export")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the key=value config file
    #[arg(long, default_value = "market_input.txt")]
    config: PathBuf,

    /// Path to the search-body template (overrides the config file)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory the workbooks are written into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting diamond_export...");

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    if let Some(template) = args.template {
        config.filter_template = template;
    }

    let api = match RapNetApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Failed to create API client: {e}");
            std::process::exit(1);
        }
    };

    let started_at = chrono::Local::now();
    let results = fetch_listings(&api, &config).await;

    if results.is_empty() {
        log::warn!("No combinations produced any results; nothing to export");
        return;
    }

    let timestamp = started_at.format("%Y-%m-%d_%H-%M-%S").to_string();
    let written = write_workbooks(&results, &args.output_dir, &timestamp);
    log::info!("Export completed, {} workbook(s) written.", written.len());
}
