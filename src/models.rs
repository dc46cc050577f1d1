//! Data models for scraped page text, game blocks, and structured trends.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PageText`]: Visible text pulled from the trends page by a scraper backend
//! - [`GameBlock`]: Trend lines grouped under one matchup and kickoff time
//! - [`TrendRecord`]: A single trend string broken into team/stat/record/sample
//! - [`GamesDocument`] and [`TrendsDocument`]: The two JSON output shapes
//!
//! Field names match the JSON consumed by the front end, so they are
//! serialized as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder matchup label used until a matchup line is recognized.
pub const TEAMS_PLACEHOLDER: &str = "TBD";

/// Sentinel used when a trend string carries no `W-L` record.
pub const RECORD_UNAVAILABLE: &str = "N/A";

/// Text extracted from one rendered page.
///
/// # Fields
///
/// * `lines` - Trimmed, non-empty lines of visible text in top-to-bottom order
/// * `cells` - Text of every `table tr td` cell, in document order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageText {
    /// Visible text, one trimmed non-empty line per entry.
    pub lines: Vec<String>,
    /// Table cell text, used by the trend-oriented extraction mode.
    pub cells: Vec<String>,
}

/// One scheduled or in-progress matchup and the trend lines listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameBlock {
    /// Kickoff time or status token, e.g. `"7:00 PM ET"` or `"FINAL"`.
    pub time: String,
    /// Matchup label, [`TEAMS_PLACEHOLDER`] until a matchup is seen.
    pub teams: String,
    /// Raw trend strings in page order.
    pub trends: Vec<String>,
}

impl GameBlock {
    /// Open a new block for the given time marker.
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            teams: TEAMS_PLACEHOLDER.to_string(),
            trends: Vec::new(),
        }
    }
}

/// Direction a trend refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Stat {
    #[serde(rename = "OVER")]
    Over,
    #[serde(rename = "UNDER")]
    Under,
    #[serde(rename = "Spread")]
    Spread,
}

impl Stat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Over => "OVER",
            Stat::Under => "UNDER",
            Stat::Spread => "Spread",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trend string with its heuristically extracted fields.
///
/// `display_text` is filled in by the reword generator and is the only
/// field that differs between two parses of the same string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrendRecord {
    /// Best-effort team name.
    pub team: String,
    /// OVER, UNDER, or Spread.
    pub stat: Stat,
    /// `W-L` or `W-L-T`, or [`RECORD_UNAVAILABLE`].
    pub record: String,
    /// Sample size label such as `"10 games"`.
    pub sample: String,
    /// The original trend string.
    pub raw: String,
    /// Always `true`; kept for the front end.
    pub processed: bool,
    /// Natural-language rewording of the trend.
    pub display_text: String,
}

/// Game-oriented output document.
#[derive(Debug, Deserialize, Serialize)]
pub struct GamesDocument {
    /// Date declared on the page, or today's local date.
    pub date: String,
    /// RFC 3339 UTC timestamp of this run.
    pub generated_at: String,
    /// Blocks that collected at least one trend.
    pub games: Vec<GameBlock>,
}

/// Trend-oriented output document.
#[derive(Debug, Deserialize, Serialize)]
pub struct TrendsDocument {
    /// RFC 3339 UTC timestamp of this run.
    pub updated_at: String,
    /// Human-readable local date, e.g. `"Monday, October 19"`.
    pub date_display: String,
    /// Structured trends, capped by the writer.
    pub trends: Vec<TrendRecord>,
}

/// Either output shape, as chosen by the extraction mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutputDocument {
    Games(GamesDocument),
    Trends(TrendsDocument),
}

impl OutputDocument {
    /// Number of games or trends carried by the document.
    pub fn len(&self) -> usize {
        match self {
            OutputDocument::Games(doc) => doc.games.len(),
            OutputDocument::Trends(doc) => doc.trends.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_block_starts_with_placeholder() {
        let block = GameBlock::new("7:00 PM ET");
        assert_eq!(block.time, "7:00 PM ET");
        assert_eq!(block.teams, TEAMS_PLACEHOLDER);
        assert!(block.trends.is_empty());
    }

    #[test]
    fn test_stat_serialization() {
        assert_eq!(serde_json::to_string(&Stat::Over).unwrap(), "\"OVER\"");
        assert_eq!(serde_json::to_string(&Stat::Under).unwrap(), "\"UNDER\"");
        assert_eq!(serde_json::to_string(&Stat::Spread).unwrap(), "\"Spread\"");
        assert_eq!(Stat::Under.to_string(), "UNDER");
    }

    #[test]
    fn test_output_document_untagged() {
        let doc = OutputDocument::Games(GamesDocument {
            date: "Monday, October 19".to_string(),
            generated_at: "2026-10-19T12:00:00.000Z".to_string(),
            games: vec![],
        });

        let value = serde_json::to_value(&doc).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"date"));
        assert!(keys.contains(&"generated_at"));
        assert!(keys.contains(&"games"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_trend_record_deserialization() {
        let json = r#"{
            "team": "Boston Bruins",
            "stat": "UNDER",
            "record": "7-3",
            "sample": "10 games",
            "raw": "Bruins are 7-3 to the UNDER",
            "processed": true,
            "display_text": "text"
        }"#;

        let trend: TrendRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trend.team, "Boston Bruins");
        assert_eq!(trend.stat, Stat::Under);
        assert!(trend.processed);
    }
}
