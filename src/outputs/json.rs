//! JSON document assembly and atomic file output.
//!
//! # Output Shapes
//!
//! ```text
//! games mode:  { "date", "generated_at", "games": [{ "time", "teams", "trends" }] }
//! trends mode: { "updated_at", "date_display", "trends": [{ "team", "stat", "record",
//!                "sample", "raw", "processed", "display_text" }] }
//! ```
//!
//! The document is serialized in full before anything touches the
//! destination, written to a sibling temp file, and renamed over the target,
//! so readers see either the previous file or the new one.

use crate::models::{GameBlock, GamesDocument, OutputDocument, TrendRecord, TrendsDocument};
use crate::utils::{date_display, iso_timestamp};
use chrono::{DateTime, Local};
use std::error::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Build the game-oriented document. `page_date` wins over today's date.
pub fn games_document(
    games: Vec<GameBlock>,
    page_date: Option<String>,
    now: DateTime<Local>,
) -> OutputDocument {
    OutputDocument::Games(GamesDocument {
        date: page_date.unwrap_or_else(|| date_display(&now)),
        generated_at: iso_timestamp(&now),
        games,
    })
}

/// Build the trend-oriented document, keeping at most `limit` trends.
pub fn trends_document(
    mut trends: Vec<TrendRecord>,
    limit: usize,
    now: DateTime<Local>,
) -> OutputDocument {
    trends.truncate(limit);
    OutputDocument::Trends(TrendsDocument {
        updated_at: iso_timestamp(&now),
        date_display: date_display(&now),
        trends,
    })
}

/// Serialize the document the way it is written to disk.
pub fn render(document: &OutputDocument) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output.json"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the file at `path` with `document`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_document(document: &OutputDocument, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = render(document)?;
    let tmp = temp_path(path);

    if let Err(e) = fs::write(&tmp, &json).await {
        error!(tmp = %tmp.display(), error = %e, "Failed to write temp JSON");
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        error!(tmp = %tmp.display(), error = %e, "Failed to move JSON into place");
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    info!(bytes = json.len(), entries = document.len(), "Wrote JSON output");
    Ok(())
}
