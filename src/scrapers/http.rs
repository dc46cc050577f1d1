//! Plain HTTP backend.
//!
//! Fetches the page with `reqwest` and walks the parsed HTML with `scraper`.
//! There is no script execution, so content that the site renders
//! client-side will be missing; readiness is checked once and only logged.

use crate::models::PageText;
use crate::scrapers::{PageSource, has_content_marker};
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

pub const SNAPSHOT_FILE: &str = "debug_page.html";

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("body selector"));
static CELLS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr td").expect("table cell selector"));

/// Elements whose text never shows up on screen.
const HIDDEN_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// Elements that start and end a line of rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

#[derive(Debug)]
pub struct HttpPage {
    client: Client,
    last_html: Option<String>,
}

impl HttpPage {
    pub fn new(load_timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(load_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            last_html: None,
        })
    }
}

impl PageSource for HttpPage {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn load(&mut self, url: &Url) -> Result<PageText, Box<dyn Error>> {
        let html = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        info!(bytes = html.len(), "Fetched trends page");

        let page = extract_page_text(&html);
        self.last_html = Some(html);

        if !has_content_marker(&page.lines) {
            warn!("Fetched page has no recognizable trend content; it may be rendered client-side");
        }
        info!(lines = page.lines.len(), cells = page.cells.len(), "Extracted page text");
        Ok(page)
    }

    async fn save_debug_snapshot(&self, dir: &Path) -> Result<Option<PathBuf>, Box<dyn Error>> {
        let Some(html) = &self.last_html else {
            return Ok(None);
        };
        fs::create_dir_all(dir).await?;
        let path = dir.join(SNAPSHOT_FILE);
        fs::write(&path, html).await?;
        Ok(Some(path))
    }

    async fn close(self) {}
}

/// Visible text lines and table cell text from an HTML document.
///
/// Text inside inline elements (`b`, `span`, `a`, ...) stays on the line it
/// appears in; lines break only at block-level elements and `<br>`.
pub fn extract_page_text(html: &str) -> PageText {
    let document = Html::parse_document(html);

    let mut text = String::new();
    if let Some(body) = document.select(&BODY).next() {
        push_visible_text(body, &mut text);
    }
    let lines = text
        .lines()
        .map(|line| line.split_whitespace().join(" "))
        .filter(|line| !line.is_empty())
        .collect();

    let cells = document
        .select(&CELLS)
        .map(|cell| cell.text().flat_map(str::split_whitespace).join(" "))
        .filter(|text| !text.is_empty())
        .collect();

    PageText { lines, cells }
}

/// Append the rendered text of `element` to `out`, one `\n` per line break.
fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            // Source newlines inside a text node are not line breaks on screen
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push('\n');
        }
        push_visible_text(child, out);
        if block {
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrapeConfig;
    use crate::parser::classifier::classify_lines;

    const PAGE: &str = r#"
        <html>
          <head><title>NHL Trends</title><style>.x { color: red; }</style></head>
          <body>
            <script>var trends = "OVER 8-2";</script>
            <h2>Monday, October 19</h2>
            <div class="game">
              <div class="time">7:00 PM <span>ET</span></div>
              <div>Utah</div><div>VS</div><div>New York</div>
            </div>
            <table>
              <tr><td>Rangers are 8-2 to the
                  <b>OVER</b> in their last 10</td></tr>
              <tr><td>   </td></tr>
            </table>
            <noscript>Enable JavaScript</noscript>
          </body>
        </html>
    "#;

    #[test]
    fn test_extract_visible_lines() {
        let page = extract_page_text(PAGE);
        assert_eq!(
            page.lines,
            vec![
                "Monday, October 19",
                "7:00 PM ET",
                "Utah",
                "VS",
                "New York",
                "Rangers are 8-2 to the OVER in their last 10",
            ]
        );
    }

    #[test]
    fn test_inline_markup_stays_on_one_line() {
        let html = "<html><body>\
            <div>7:00 PM ET</div><div>Utah VS New York</div>\
            <p>Rangers are <b>8-2</b> to the <strong>OVER</strong> in their last 10</p>\
            </body></html>";
        let page = extract_page_text(html);
        assert_eq!(
            page.lines,
            vec![
                "7:00 PM ET",
                "Utah VS New York",
                "Rangers are 8-2 to the OVER in their last 10",
            ]
        );

        let classified = classify_lines(&page.lines, &ScrapeConfig::default());
        assert_eq!(classified.games.len(), 1);
        assert_eq!(classified.games[0].teams, "Utah VS New York");
        assert_eq!(
            classified.games[0].trends,
            vec!["Rangers are 8-2 to the OVER in their last 10"]
        );
    }

    #[test]
    fn test_line_breaks_and_links() {
        let html = "<html><body><p>Bruins are <a href=\"#\">6-4</a> ATS<br>in their last 10</p>\
            <ul><li>FINAL</li><li>Utah <em>@</em> Boston</li></ul></body></html>";
        let page = extract_page_text(html);
        assert_eq!(
            page.lines,
            vec!["Bruins are 6-4 ATS", "in their last 10", "FINAL", "Utah @ Boston"]
        );
    }

    #[test]
    fn test_extract_table_cells() {
        let page = extract_page_text(PAGE);
        assert_eq!(page.cells, vec!["Rangers are 8-2 to the OVER in their last 10"]);
    }

    #[test]
    fn test_extract_without_body_content() {
        let page = extract_page_text("<html><head><title>x</title></head></html>");
        assert!(page.lines.is_empty());
        assert!(page.cells.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_before_load_is_none() {
        let source = HttpPage::new(Duration::from_secs(1)).unwrap();
        let dir = std::env::temp_dir();
        assert!(source.save_debug_snapshot(&dir).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_writes_last_html() {
        let mut source = HttpPage::new(Duration::from_secs(1)).unwrap();
        source.last_html = Some(PAGE.to_string());
        let dir = std::env::temp_dir().join(format!("betting_trends_snapshot_{}", std::process::id()));

        let path = source.save_debug_snapshot(&dir).await.unwrap().unwrap();
        assert_eq!(path, dir.join(SNAPSHOT_FILE));
        assert_eq!(fs::read_to_string(&path).await.unwrap(), PAGE);

        let _ = fs::remove_dir_all(&dir).await;
    }
}
