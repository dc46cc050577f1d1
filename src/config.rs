//! Heuristic configuration for the trend parser.
//!
//! Everything the parser matches against that is not a structural pattern
//! lives here as data: the team alias allow-list, footer markers, the
//! fallback timezone, and the minimum trend length. Defaults cover the NHL
//! trends page; a YAML file can override any subset of fields.
//!
//! ```yaml
//! url: https://www.oddsshark.com/nhl/trends
//! default_timezone: ET
//! team_aliases:
//!   - name: NY Rangers
//!     matches: [Rangers]
//!   - name: Boston Bruins
//!     matches: [Bruins]
//! ```

use serde::Deserialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_URL: &str = "https://www.oddsshark.com/nhl/trends";

/// A canonical team name and the substrings that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamAlias {
    pub name: String,
    pub matches: Vec<String>,
}

impl TeamAlias {
    fn new(name: &str, matches: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            matches: matches.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Trends page to load.
    pub url: String,
    /// Suffix appended to clock times before any timezone has been seen.
    pub default_timezone: String,
    /// Checked in order; the first alias with a matching substring wins.
    pub team_aliases: Vec<TeamAlias>,
    /// Lines containing any of these (case-insensitive) are never trends.
    pub footer_markers: Vec<String>,
    /// Trend lines shorter than this are treated as noise.
    pub min_trend_len: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            default_timezone: "ET".to_string(),
            team_aliases: vec![
                TeamAlias::new("NY Rangers", &["Rangers"]),
                TeamAlias::new("Boston Bruins", &["Bruins"]),
            ],
            footer_markers: vec![
                "©".to_string(),
                "copyright".to_string(),
                "all rights reserved".to_string(),
                "trends provided by".to_string(),
                "gamble responsibly".to_string(),
            ],
            min_trend_len: 20,
        }
    }
}

impl ScrapeConfig {
    /// Parse a YAML document; absent fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Load the config file at `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<ScrapeConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(ScrapeConfig::default());
    };

    let yaml = fs::read_to_string(path).await?;
    let config = ScrapeConfig::from_yaml(&yaml)?;
    info!(
        path,
        team_aliases = config.team_aliases.len(),
        footer_markers = config.footer_markers.len(),
        "Loaded configuration"
    );
    Ok(config)
}
