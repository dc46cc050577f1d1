//! Page acquisition backends.
//!
//! Each backend loads the trends page once and hands back its visible text
//! as a [`PageText`]. Nothing downstream knows which backend produced it.
//!
//! # Backends
//!
//! | Backend | Module | Method | Notes |
//! |---------|--------|--------|-------|
//! | HTTP | [`http`] | `reqwest` + `scraper` | Default; sees server-rendered HTML only |
//! | Chrome | `chrome` | `headless_chrome` | Requires the `browser` feature; sees client-rendered text |
//!
//! # Readiness
//!
//! Instead of sleeping for a fixed time, backends that can observe the page
//! while it renders poll it through [`poll_until_ready`] until
//! [`has_content_marker`] holds or the settle timeout runs out.

use crate::models::PageText;
use crate::parser::patterns::{DIRECTION, RECORD, TIME_MARKER};
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

#[cfg(feature = "browser")]
pub mod chrome;
pub mod http;

/// A source of rendered page text.
///
/// Implementors own whatever resource backs the page (an HTTP client, a
/// browser process). [`close`](PageSource::close) releases it explicitly;
/// dropping the value must release it too.
pub trait PageSource {
    /// Load `url` and return its visible text once the page is ready.
    async fn load(&mut self, url: &Url) -> Result<PageText, Box<dyn Error>>;

    /// Save whatever the backend can show a human about the last loaded page
    /// into `dir`. Returns the written path, or `None` if nothing was loaded.
    async fn save_debug_snapshot(&self, dir: &Path) -> Result<Option<PathBuf>, Box<dyn Error>>;

    /// Release the backing resource.
    async fn close(self);
}

/// How long to wait for client-side content, and how often to look.
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub settle_timeout: Duration,
    pub poll_interval: Duration,
}

impl Readiness {
    pub fn new(settle_timeout: Duration) -> Self {
        Self {
            settle_timeout,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// True when at least one line looks like a time marker or a trend.
pub fn has_content_marker(lines: &[String]) -> bool {
    lines.iter().any(|line| {
        TIME_MARKER.is_match(line) || (DIRECTION.is_match(line) && RECORD.is_match(line))
    })
}

/// Split raw text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Page text as a browser reports it: `innerText` of the body and of each table cell.
#[derive(Debug, Deserialize)]
struct RenderedText {
    text: String,
    cells: Vec<String>,
}

/// Decode the JSON produced by a page script into [`PageText`]. Cell text is
/// whitespace-normalized and empty cells are dropped.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub fn decode_rendered_text(json: &str) -> Result<PageText, Box<dyn Error>> {
    let rendered: RenderedText = serde_json::from_str(json)?;

    Ok(PageText {
        lines: split_lines(&rendered.text),
        cells: rendered
            .cells
            .iter()
            .map(|cell| cell.split_whitespace().join(" "))
            .filter(|cell| !cell.is_empty())
            .collect(),
    })
}

/// Call `probe` until its text carries a content marker or the settle
/// timeout elapses. On timeout the last probe result is returned as-is.
pub async fn poll_until_ready<F>(
    readiness: &Readiness,
    mut probe: F,
) -> Result<PageText, Box<dyn Error>>
where
    F: FnMut() -> Result<PageText, Box<dyn Error>>,
{
    let started = Instant::now();
    let mut attempt = 0usize;

    loop {
        attempt += 1;
        let page = probe()?;

        if has_content_marker(&page.lines) {
            info!(
                attempt,
                elapsed_ms = started.elapsed().as_millis() as u64,
                lines = page.lines.len(),
                "Page content ready"
            );
            return Ok(page);
        }

        if started.elapsed() >= readiness.settle_timeout {
            warn!(
                attempt,
                timeout = ?readiness.settle_timeout,
                lines = page.lines.len(),
                "No content marker before settle timeout; continuing with current text"
            );
            return Ok(page);
        }

        debug!(attempt, lines = page.lines.len(), "Content not ready; polling again");
        sleep(readiness.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(lines: &[&str]) -> PageText {
        PageText {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            cells: vec![],
        }
    }

    #[test]
    fn test_split_lines() {
        let lines = split_lines("  7:00 PM ET \n\n\t Utah VS New York\n   \nFINAL");
        assert_eq!(lines, vec!["7:00 PM ET", "Utah VS New York", "FINAL"]);
    }

    #[test]
    fn test_decode_rendered_text() {
        let json = r#"{
            "text": "NHL Trends\n\n7:00 PM ET\nUtah VS New York\n  Rangers are 8-2 to the OVER in their last 10  ",
            "cells": ["Rangers are 8-2\n to the  OVER in their last 10", "  ", ""]
        }"#;
        let page = decode_rendered_text(json).unwrap();

        assert_eq!(
            page.lines,
            vec![
                "NHL Trends",
                "7:00 PM ET",
                "Utah VS New York",
                "Rangers are 8-2 to the OVER in their last 10",
            ]
        );
        assert_eq!(page.cells, vec!["Rangers are 8-2 to the OVER in their last 10"]);
    }

    #[test]
    fn test_decode_rendered_text_empty_page() {
        let page = decode_rendered_text(r#"{"text": "", "cells": []}"#).unwrap();
        assert_eq!(page, PageText::default());
    }

    #[test]
    fn test_decode_rendered_text_rejects_bad_json() {
        assert!(decode_rendered_text("undefined").is_err());
        assert!(decode_rendered_text(r#"{"text": "7:00 PM ET"}"#).is_err());
    }

    #[test]
    fn test_has_content_marker() {
        assert!(has_content_marker(&page(&["Loading...", "7:00 PM ET"]).lines));
        assert!(has_content_marker(&page(&["Rangers are 8-2 ATS in their last 10"]).lines));
        assert!(!has_content_marker(&page(&["Loading...", "NHL Trends"]).lines));
        assert!(!has_content_marker(&[]));
    }

    #[tokio::test]
    async fn test_poll_returns_once_ready() {
        let readiness = Readiness {
            settle_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(1),
        };
        let mut calls = 0;

        let result = poll_until_ready(&readiness, || {
            calls += 1;
            if calls < 3 {
                Ok(page(&["Loading..."]))
            } else {
                Ok(page(&["7:00 PM ET"]))
            }
        })
        .await
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(result.lines, vec!["7:00 PM ET"]);
    }

    #[tokio::test]
    async fn test_poll_gives_up_after_timeout() {
        let readiness = Readiness {
            settle_timeout: Duration::from_millis(20),
            poll_interval: Duration::from_millis(5),
        };

        let result = poll_until_ready(&readiness, || Ok(page(&["Loading..."])))
            .await
            .unwrap();

        assert_eq!(result.lines, vec!["Loading..."]);
    }

    #[tokio::test]
    async fn test_poll_propagates_probe_error() {
        let readiness = Readiness::new(Duration::from_secs(1));
        let result = poll_until_ready(&readiness, || Err("tab crashed".into())).await;
        assert!(result.is_err());
    }
}
