//! Line classifier: groups the page's visible text into game blocks.
//!
//! A single left-to-right pass over the lines. Each line is tested, in
//! order, as a time marker, a matchup, the start of a split matchup, and a
//! trend; the first role that fits wins. Date lines are tracked on the side
//! and never compete with the other roles.
//!
//! The pass state lives in [`ScanState`], which only ever moves forward:
//! [`ScanState::feed`] consumes one line (or three, for a split matchup) and
//! [`ScanState::finish`] closes the last block.

use crate::config::ScrapeConfig;
use crate::models::GameBlock;
use crate::parser::patterns::{DIRECTION, MATCHUP, RECORD, SEPARATOR, TIME_MARKER, WEEKDAY};
use tracing::{debug, info, instrument};

/// Result of classifying one page.
#[derive(Debug, Default, PartialEq)]
pub struct Classified {
    /// Blocks with at least one trend, in page order.
    pub games: Vec<GameBlock>,
    /// Most recent `Weekday,` line seen on the page.
    pub date: Option<String>,
}

/// Scan state threaded through the classification pass.
#[derive(Debug)]
pub struct ScanState<'c> {
    config: &'c ScrapeConfig,
    current: Option<GameBlock>,
    games: Vec<GameBlock>,
    date: Option<String>,
    timezone: Option<String>,
}

impl<'c> ScanState<'c> {
    pub fn new(config: &'c ScrapeConfig) -> Self {
        Self {
            config,
            current: None,
            games: Vec::new(),
            date: None,
            timezone: None,
        }
    }

    /// Classify `window[0]`, looking ahead into the rest of `window` for a
    /// split matchup. Returns the number of lines consumed (1 or 3).
    pub fn feed(&mut self, window: &[String]) -> usize {
        let Some(line) = window.first().map(String::as_str) else {
            return 0;
        };

        if WEEKDAY.is_match(line) {
            self.date = Some(line.to_string());
        }

        if let Some(time) = self.time_marker(line) {
            self.open_block(time);
            return 1;
        }

        let Some(block) = self.current.as_mut() else {
            return 1;
        };

        if MATCHUP.is_match(line) {
            block.teams = line.to_string();
            return 1;
        }

        if let [first, separator, second, ..] = window {
            if SEPARATOR.is_match(separator) {
                block.teams = format!("{first}{separator}{second}");
                return 3;
            }
        }

        if is_trend_line(line, self.config) {
            block.trends.push(line.to_string());
        }
        1
    }

    /// Close the active block and hand back everything collected.
    pub fn finish(mut self) -> Classified {
        self.close_block();
        Classified {
            games: self.games,
            date: self.date,
        }
    }

    /// Normalized time value if `line` is a time marker.
    fn time_marker(&mut self, line: &str) -> Option<String> {
        let caps = TIME_MARKER.captures(line)?;

        if caps.name("status").is_some() {
            return Some(line.to_string());
        }

        if let Some(tz) = caps.name("tz") {
            self.timezone = Some(tz.as_str().to_uppercase());
            return Some(line.to_string());
        }

        let tz = self
            .timezone
            .as_deref()
            .unwrap_or(self.config.default_timezone.as_str());
        if tz.is_empty() {
            Some(line.to_string())
        } else {
            Some(format!("{line} {tz}"))
        }
    }

    fn open_block(&mut self, time: String) {
        self.close_block();
        self.current = Some(GameBlock::new(time));
    }

    fn close_block(&mut self) {
        if let Some(block) = self.current.take() {
            if block.trends.is_empty() {
                debug!(time = %block.time, teams = %block.teams, "Dropping block without trends");
            } else {
                self.games.push(block);
            }
        }
    }
}

/// Whether `line` reads as a trend: a direction token plus a record, long
/// enough, and not page chrome.
pub fn is_trend_line(line: &str, config: &ScrapeConfig) -> bool {
    if line.chars().count() <= config.min_trend_len {
        return false;
    }
    if !DIRECTION.is_match(line) || !RECORD.is_match(line) {
        return false;
    }
    let lower = line.to_lowercase();
    !config
        .footer_markers
        .iter()
        .any(|marker| lower.contains(&marker.to_lowercase()))
}

/// Group `lines` into game blocks.
#[instrument(level = "info", skip_all, fields(lines = lines.len()))]
pub fn classify_lines(lines: &[String], config: &ScrapeConfig) -> Classified {
    let mut state = ScanState::new(config);
    let mut i = 0;
    while i < lines.len() {
        i += state.feed(&lines[i..]);
    }

    let classified = state.finish();
    info!(
        games = classified.games.len(),
        trends = classified.games.iter().map(|g| g.trends.len()).sum::<usize>(),
        date = ?classified.date,
        "Classified page lines"
    );
    classified
}
