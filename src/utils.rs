//! Utility functions for timestamps, log previews, and output directory checks.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Human-readable date such as `"Monday, October 19"`.
pub fn date_display(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d").to_string()
}

/// RFC 3339 UTC timestamp with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(now: &DateTime<Local>) -> String {
    now.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure the directory that will hold `output` exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file,
/// so a bad path fails before the page is fetched.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub async fn ensure_output_dir(output: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("© 2026 OddsShark", 1);
        assert_eq!(result, "©…(+15 bytes)");
    }

    #[test]
    fn test_date_display() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        assert_eq!(date_display(&now), "Monday, October 19");

        let now = Local.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap();
        assert_eq!(date_display(&now), "Sunday, November 1");
    }

    #[test]
    fn test_iso_timestamp_shape() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let ts = iso_timestamp(&now);
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-10-19T09:00:00.000Z".len());
        assert_eq!(
            DateTime::parse_from_rfc3339(&ts).unwrap().timestamp(),
            now.timestamp()
        );
    }

    #[tokio::test]
    async fn test_ensure_output_dir_creates_parent() {
        let dir = std::env::temp_dir().join(format!("betting_trends_out_{}", std::process::id()));
        let output = dir.join("nhl_trends.json");

        ensure_output_dir(&output).await.unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("..__probe_write__").exists());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_ensure_output_dir_bare_filename() {
        assert!(ensure_output_dir(Path::new("nhl_trends.json")).await.is_ok());
    }
}
