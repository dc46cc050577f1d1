//! Stateless extraction of team, stat, record, and sample from one trend string.
//!
//! The heuristics are deliberately shallow. Team detection in particular
//! falls back to "first two words" whenever the alias allow-list has no
//! match, which is often wrong for sentences that do not lead with the
//! team name.

use crate::config::{ScrapeConfig, TeamAlias};
use crate::models::{PageText, RECORD_UNAVAILABLE, Stat, TrendRecord};
use crate::parser::patterns::{LAST_FIVE, OVER, RECORD, UNDER};
use crate::parser::reword::reword;
use itertools::Itertools;
use rand::Rng;
use tracing::{debug, info, instrument};

pub const DEFAULT_SAMPLE: &str = "10 games";
pub const SHORT_SAMPLE: &str = "5 games";

/// Keywords a table cell must carry to be considered a trend in trend mode.
const CANDIDATE_KEYWORDS: [&str; 3] = ["OVER", "UNDER", "ATS"];

/// Structured fields of a single trend, before rewording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrend {
    pub team: String,
    pub stat: Stat,
    pub record: String,
    pub sample: String,
    pub raw: String,
}

impl ParsedTrend {
    pub fn into_record(self, display_text: String) -> TrendRecord {
        TrendRecord {
            team: self.team,
            stat: self.stat,
            record: self.record,
            sample: self.sample,
            raw: self.raw,
            processed: true,
            display_text,
        }
    }
}

/// Break a raw trend string into its fields.
pub fn parse_trend(raw: &str, aliases: &[TeamAlias]) -> ParsedTrend {
    let record = RECORD
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| RECORD_UNAVAILABLE.to_string());

    let sample = if LAST_FIVE.is_match(raw) {
        SHORT_SAMPLE
    } else {
        DEFAULT_SAMPLE
    };

    ParsedTrend {
        team: guess_team(raw, aliases),
        stat: detect_stat(raw),
        record,
        sample: sample.to_string(),
        raw: raw.to_string(),
    }
}

/// OVER beats UNDER when both appear.
pub fn detect_stat(raw: &str) -> Stat {
    if OVER.is_match(raw) {
        Stat::Over
    } else if UNDER.is_match(raw) {
        Stat::Under
    } else {
        Stat::Spread
    }
}

/// First alias with a matching substring, else the first two words.
pub fn guess_team(raw: &str, aliases: &[TeamAlias]) -> String {
    aliases
        .iter()
        .find(|alias| alias.matches.iter().any(|m| raw.contains(m.as_str())))
        .map(|alias| alias.name.clone())
        .unwrap_or_else(|| raw.split_whitespace().take(2).join(" "))
}

/// Whether a table cell looks like a trend worth extracting.
pub fn is_trend_candidate(text: &str, config: &ScrapeConfig) -> bool {
    text.chars().count() > config.min_trend_len
        && CANDIDATE_KEYWORDS.iter().any(|k| text.contains(k))
}

/// Candidate trend strings from the page: table cells if the page has any,
/// otherwise its visible lines.
pub fn select_candidates<'p>(page: &'p PageText, config: &ScrapeConfig) -> Vec<&'p str> {
    let source = if page.cells.is_empty() {
        debug!("Page has no table cells; falling back to visible lines");
        &page.lines
    } else {
        &page.cells
    };

    source
        .iter()
        .map(|s| s.trim())
        .filter(|s| is_trend_candidate(s, config))
        .collect()
}

/// Parse and reword up to `limit` candidates.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len(), limit = limit))]
pub fn extract_trends<R: Rng>(
    candidates: &[&str],
    config: &ScrapeConfig,
    rng: &mut R,
    limit: usize,
) -> Vec<TrendRecord> {
    let trends: Vec<TrendRecord> = candidates
        .iter()
        .take(limit)
        .map(|raw| {
            let parsed = parse_trend(raw, &config.team_aliases);
            let display_text = reword(&parsed, &mut *rng);
            parsed.into_record(display_text)
        })
        .collect();

    info!(count = trends.len(), "Extracted structured trends");
    trends
}
