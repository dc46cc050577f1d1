//! Headless Chrome backend.
//!
//! Used when the trends page only fills in after its scripts run. The page
//! is polled through [`poll_until_ready`] until trend content shows up, and
//! a PNG screenshot is available for debugging.
//!
//! `headless_chrome` is blocking, so every call into it runs inside
//! [`tokio::task::block_in_place`]; this needs the multi-threaded runtime.

use crate::models::PageText;
use crate::scrapers::{PageSource, Readiness, decode_rendered_text, poll_until_ready};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::error::Error;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::task::block_in_place;
use tracing::{debug, info, instrument};
use url::Url;

pub const SNAPSHOT_FILE: &str = "debug_screenshot.png";

/// Collects `innerText` of the body and of every table cell in one round trip,
/// in the shape [`decode_rendered_text`] reads.
const RENDERED_TEXT_JS: &str = r#"JSON.stringify({
    text: document.body ? document.body.innerText : "",
    cells: Array.from(document.querySelectorAll("table tr td")).map(td => td.innerText)
})"#;

pub struct ChromePage {
    browser: Browser,
    tab: Option<Arc<Tab>>,
    load_timeout: Duration,
    readiness: Readiness,
}

impl ChromePage {
    /// Start a headless browser. The process lives until this value is
    /// closed or dropped.
    #[instrument(level = "info")]
    pub fn launch(load_timeout: Duration, readiness: Readiness) -> Result<Self, Box<dyn Error>> {
        info!("Launching headless Chrome");
        let options = LaunchOptions {
            headless: true,
            sandbox: false,
            window_size: Some((1920, 1080)),
            idle_browser_timeout: load_timeout + readiness.settle_timeout,
            args: vec![OsStr::new("--disable-dev-shm-usage")],
            ..Default::default()
        };
        let browser = Browser::new(options)?;

        Ok(Self {
            browser,
            tab: None,
            load_timeout,
            readiness,
        })
    }

    fn open(&self, url: &Url) -> Result<Arc<Tab>, Box<dyn Error>> {
        let tab = self.browser.new_tab()?;
        tab.set_default_timeout(self.load_timeout);
        tab.navigate_to(url.as_str())?;
        tab.wait_until_navigated()?;
        Ok(tab)
    }
}

/// Current rendered text of `tab`.
fn rendered_text(tab: &Tab) -> Result<PageText, Box<dyn Error>> {
    let result = tab.evaluate(RENDERED_TEXT_JS, false)?;
    let json = result
        .value
        .as_ref()
        .and_then(|v| v.as_str())
        .ok_or("page script returned no text")?;
    decode_rendered_text(json)
}

impl PageSource for ChromePage {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn load(&mut self, url: &Url) -> Result<PageText, Box<dyn Error>> {
        let tab = block_in_place(|| self.open(url))?;
        info!("Navigation complete; waiting for trend content");
        self.tab = Some(Arc::clone(&tab));

        let page = poll_until_ready(&self.readiness, || block_in_place(|| rendered_text(&tab))).await?;
        info!(lines = page.lines.len(), cells = page.cells.len(), "Extracted rendered text");
        Ok(page)
    }

    async fn save_debug_snapshot(&self, dir: &Path) -> Result<Option<PathBuf>, Box<dyn Error>> {
        let Some(tab) = &self.tab else {
            return Ok(None);
        };
        let png = block_in_place(|| {
            tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
        })?;
        fs::create_dir_all(dir).await?;
        let path = dir.join(SNAPSHOT_FILE);
        fs::write(&path, png).await?;
        Ok(Some(path))
    }

    async fn close(self) {
        debug!("Closing headless Chrome");
        drop(self.tab);
        drop(self.browser);
        info!("Browser closed");
    }
}
