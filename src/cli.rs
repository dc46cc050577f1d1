//! Command-line interface definitions.
//!
//! All options have defaults, so a bare invocation scrapes the NHL trends
//! page over plain HTTP and writes `nhl_trends.json` in the working directory.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which document shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Trend lines grouped under each matchup and kickoff time
    Games,
    /// Individual trends broken into team/stat/record/sample with a reworded sentence
    Trends,
}

/// How the page is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Plain HTTP fetch; no JavaScript
    Http,
    /// Headless Chrome (requires the `browser` feature)
    Chrome,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Game-oriented output with defaults
/// betting_trends
///
/// # Trend-oriented output, rendered in Chrome, echoed to stdout
/// betting_trends -m trends -b chrome --echo -o site/nhl_trends.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Trends page URL (overrides the config file)
    #[arg(short, long, env = "TRENDS_URL")]
    pub url: Option<String>,

    /// Path of the JSON file to replace
    #[arg(short, long, default_value = "nhl_trends.json")]
    pub output: PathBuf,

    /// Extraction mode
    #[arg(short, long, value_enum, default_value_t = Mode::Games)]
    pub mode: Mode,

    /// Page loading backend
    #[arg(short, long, value_enum, default_value_t = Backend::Http)]
    pub backend: Backend,

    /// Optional path to a YAML config file with team aliases and footer markers
    #[arg(short, long, env = "TRENDS_CONFIG")]
    pub config: Option<String>,

    /// Maximum number of trends written in trends mode
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Seconds to wait for trend content to appear after navigation
    #[arg(long, default_value_t = 15)]
    pub settle_timeout_secs: u64,

    /// Seconds allowed for the page load itself
    #[arg(long, default_value_t = 60)]
    pub load_timeout_secs: u64,

    /// Directory for debug snapshots taken on errors or empty results
    #[arg(long, default_value = ".")]
    pub debug_dir: PathBuf,

    /// Also print the JSON document to stdout
    #[arg(long)]
    pub echo: bool,

    /// On failure, write an empty document so consumers never see a missing file
    #[arg(long)]
    pub placeholder_on_error: bool,
}
