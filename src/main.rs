//! # Betting Trends
//!
//! Scrapes a sports betting trends page, recovers structured trends from
//! its loosely formatted text, and writes a JSON document for a static
//! front end.
//!
//! ## Usage
//!
//! ```sh
//! betting_trends -m games -o nhl_trends.json
//! ```
//!
//! ## Architecture
//!
//! One run, strictly sequential:
//! 1. **Acquire**: load the page with the selected backend and wait for trend content
//! 2. **Parse**: classify lines into game blocks, or extract individual trends
//! 3. **Output**: replace the JSON file atomically
//!
//! Any failure ends the run with exit status 1 and leaves the previous file
//! in place (or an empty placeholder with `--placeholder-on-error`).

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod config;
mod models;
mod outputs;
mod parser;
mod scrapers;
mod utils;

use cli::{Backend, Cli, Mode};
use config::ScrapeConfig;
use models::{OutputDocument, PageText};
use outputs::json;
use parser::{classifier, trend};
use scrapers::{PageSource, Readiness};
use utils::{ensure_output_dir, truncate_for_log};

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("betting_trends starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let status = match run(&args).await {
        Ok(document) => {
            info!(
                path = %args.output.display(),
                entries = document.len(),
                "Success: trends saved"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            if args.placeholder_on_error {
                write_placeholder(&args).await;
            }
            ExitCode::FAILURE
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    status
}

/// Resolve configuration, pick a backend, and run the scrape.
async fn run(args: &Cli) -> Result<OutputDocument, Box<dyn Error>> {
    let mut config = config::load_config(args.config.as_deref()).await?;
    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    let url = Url::parse(&config.url)?;
    info!(%url, mode = ?args.mode, backend = ?args.backend, "Resolved target");

    // Fail on an unwritable destination before spending time on the page
    ensure_output_dir(&args.output).await?;

    let load_timeout = Duration::from_secs(args.load_timeout_secs);
    let readiness = Readiness::new(Duration::from_secs(args.settle_timeout_secs));

    match args.backend {
        Backend::Http => {
            let source = scrapers::http::HttpPage::new(load_timeout)?;
            scrape(source, &url, &config, args).await
        }
        #[cfg(feature = "browser")]
        Backend::Chrome => {
            let source = scrapers::chrome::ChromePage::launch(load_timeout, readiness)?;
            scrape(source, &url, &config, args).await
        }
        #[cfg(not(feature = "browser"))]
        Backend::Chrome => {
            let _ = readiness;
            Err("the chrome backend needs a build with `--features browser`".into())
        }
    }
}

/// Load, parse, and write. The source is closed on every path; a debug
/// snapshot is saved when the page yields nothing or parsing fails.
#[instrument(level = "info", skip_all, fields(%url))]
async fn scrape<P: PageSource>(
    mut source: P,
    url: &Url,
    config: &ScrapeConfig,
    args: &Cli,
) -> Result<OutputDocument, Box<dyn Error>> {
    let result = source
        .load(url)
        .await
        .map(|page| build_document(&page, config, args));

    let needs_snapshot = match &result {
        Ok(document) if document.is_empty() => {
            warn!("No trends found on the page");
            true
        }
        Ok(_) => false,
        Err(e) => {
            error!(error = %e, "Failed to load trends page");
            true
        }
    };
    if needs_snapshot {
        match source.save_debug_snapshot(&args.debug_dir).await {
            Ok(Some(path)) => info!(path = %path.display(), "Saved debug snapshot"),
            Ok(None) => debug!("Nothing loaded; no debug snapshot"),
            Err(e) => warn!(error = %e, "Failed to save debug snapshot"),
        }
    }
    source.close().await;

    let document = result?;
    json::write_document(&document, &args.output).await?;
    if args.echo {
        println!("{}", json::render(&document)?);
    }
    Ok(document)
}

/// Turn page text into the document for the selected mode.
fn build_document(page: &PageText, config: &ScrapeConfig, args: &Cli) -> OutputDocument {
    debug!(
        preview = %truncate_for_log(&page.lines.join(" | "), 300),
        "Page text preview"
    );
    let now = Local::now();

    match args.mode {
        Mode::Games => {
            let classified = classifier::classify_lines(&page.lines, config);
            json::games_document(classified.games, classified.date, now)
        }
        Mode::Trends => {
            let candidates = trend::select_candidates(page, config);
            info!(count = candidates.len(), "Found raw trends");
            let trends = trend::extract_trends(&candidates, config, &mut rand::rng(), args.limit);
            json::trends_document(trends, args.limit, now)
        }
    }
}

/// Write an empty document of the selected shape after a failed run.
async fn write_placeholder(args: &Cli) {
    let now = Local::now();
    let document = match args.mode {
        Mode::Games => json::games_document(Vec::new(), None, now),
        Mode::Trends => json::trends_document(Vec::new(), args.limit, now),
    };
    match json::write_document(&document, &args.output).await {
        Ok(()) => warn!(path = %args.output.display(), "Wrote empty placeholder document"),
        Err(e) => error!(error = %e, "Failed to write placeholder document"),
    }
}
