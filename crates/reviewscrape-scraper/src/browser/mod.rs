//! Headless-browser capability used by the coordinator.
//!
//! A [`Browser`] hands out [`PageSession`]s. A session navigates to one URL
//! at a time, queues interactions and wait conditions against the current
//! page, and yields the rendered HTML. Sessions are scoped: whoever opens a
//! session must `close` it, and implementations release their resources on
//! drop as well.

mod browserless;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::page::RenderedPage;

pub use browserless::{BrowserlessBrowser, BrowserlessOptions, BrowserlessSession};

#[async_trait]
pub trait Browser: Send + Sync {
    /// Opens a fresh session. May wait for capacity.
    async fn open(&self) -> Result<Box<dyn PageSession>, ScraperError>;
}

#[async_trait]
pub trait PageSession: Send {
    /// Navigates to `url`, discarding any queued interactions for the
    /// previous page.
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Clicks the first element matching `selector` once it exists.
    async fn click(&mut self, selector: &str) -> Result<(), ScraperError>;

    /// Waits until an element matching `selector` exists.
    async fn wait_for_selector(&mut self, selector: &str) -> Result<(), ScraperError>;

    /// Waits until the page's visible text contains `text`.
    async fn wait_for_text(&mut self, text: &str) -> Result<(), ScraperError>;

    /// Returns the fully rendered current page.
    async fn content(&mut self) -> Result<RenderedPage, ScraperError>;

    /// Releases the session. Further calls fail with a navigation error.
    async fn close(&mut self) -> Result<(), ScraperError>;
}
