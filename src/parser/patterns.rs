//! Compiled patterns shared by the line classifier and the trend extractor.

use once_cell::sync::Lazy;
use regex::Regex;

/// A clock time with optional meridiem and timezone, or a status token.
///
/// Capture groups: `clock`, `tz`, `status`.
pub static TIME_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?P<clock>\d{1,2}:\d{2}(?:\s*[AP]\.?M\.?)?)(?:\s+(?P<tz>[ECMP][SD]?T))?|(?P<status>FINAL|TODAY))$",
    )
    .expect("time marker pattern")
});

/// Two team-like segments joined by `VS` or `@`.
pub static MATCHUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9][A-Z0-9 .]*\s+(?:VS\.?|@)\s+[A-Z0-9][A-Z0-9 .]*$")
        .expect("matchup pattern")
});

/// A line consisting of nothing but a matchup separator.
pub static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:VS\.?|@)$").expect("separator pattern"));

/// Betting-direction vocabulary.
pub static DIRECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:OVER|UNDER|ATS|SU)\b").expect("direction pattern"));

/// `W-L` or `W-L-T` with one or two digits per part.
pub static RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}-\d{1,2}(?:-\d{1,2})?\b").expect("record pattern"));

pub static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:MONDAY|TUESDAY|WEDNESDAY|THURSDAY|FRIDAY|SATURDAY|SUNDAY),")
        .expect("weekday pattern")
});

/// Whole-word, case-insensitive `OVER`. Stricter than a substring test:
/// "Overtime" and "Overs" do not count.
pub static OVER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bOVER\b").expect("over pattern"));

/// Whole-word, case-insensitive `UNDER`, so "Underdogs" does not count.
pub static UNDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bUNDER\b").expect("under pattern"));

/// Case-insensitive "last 5" as a whole word. Stricter than a substring
/// test: "last 50" and "last 5th" do not count, "Last 5" does.
pub static LAST_FIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\blast 5\b").expect("last five pattern"));
