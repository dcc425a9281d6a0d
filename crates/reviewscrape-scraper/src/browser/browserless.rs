//! [`Browser`] backed by a Browserless service's `/content` endpoint.
//!
//! `/content` is stateless: each call loads a URL in a fresh tab and returns
//! the rendered HTML. A session therefore records the current URL and the
//! interactions queued against it, and replays them on every `content()`
//! call. Interactions are compiled into one injected script that performs
//! each step in order, polling for its condition until a shared deadline,
//! then raises a ready flag. Browserless is told to wait for that flag, so a
//! step whose condition never holds surfaces as a failed render.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::{Browser, PageSession};
use crate::error::ScraperError;
use crate::page::RenderedPage;

const READY_FLAG_FN: &str = "() => window.__reviewscrapeReady === true";

/// Connection settings for [`BrowserlessBrowser`].
#[derive(Debug, Clone)]
pub struct BrowserlessOptions {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    /// Bound on every navigation and wait condition.
    pub wait_timeout_ms: u64,
    pub user_agent: String,
    /// Sessions that may be open at once.
    pub max_sessions: usize,
}

pub struct BrowserlessBrowser {
    client: Client,
    endpoint: String,
    token: Option<String>,
    wait_timeout_ms: u64,
    sessions: Arc<Semaphore>,
}

impl BrowserlessBrowser {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(options: BrowserlessOptions) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&options.user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/content", options.base_url.trim_end_matches('/')),
            token: options.token,
            wait_timeout_ms: options.wait_timeout_ms,
            sessions: Arc::new(Semaphore::new(options.max_sessions.max(1))),
        })
    }

    /// Builds a browser from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Config`] when no Browserless URL is set and
    /// [`ScraperError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &reviewscrape_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(BrowserlessOptions {
            base_url: config.require_browserless_url()?.to_owned(),
            token: config.browserless_token.clone(),
            request_timeout_secs: config.request_timeout_secs,
            wait_timeout_ms: config.wait_timeout_ms,
            user_agent: config.user_agent.clone(),
            max_sessions: config.concurrency,
        })
    }
}

#[async_trait]
impl Browser for BrowserlessBrowser {
    async fn open(&self) -> Result<Box<dyn PageSession>, ScraperError> {
        let permit = Arc::clone(&self.sessions)
            .acquire_owned()
            .await
            .map_err(|e| ScraperError::Navigation {
                url: self.endpoint.clone(),
                reason: format!("session pool closed: {e}"),
            })?;
        Ok(Box::new(BrowserlessSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            wait_timeout_ms: self.wait_timeout_ms,
            permit: Some(permit),
            current_url: None,
            steps: Vec::new(),
        }))
    }
}

/// One logical tab on a Browserless service. Holds a pool permit until
/// closed or dropped.
pub struct BrowserlessSession {
    client: Client,
    endpoint: String,
    token: Option<String>,
    wait_timeout_ms: u64,
    permit: Option<OwnedSemaphorePermit>,
    current_url: Option<String>,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Step {
    Click(String),
    Selector(String),
    Text(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    url: &'a str,
    goto_options: GotoOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    add_script_tag: Vec<ScriptTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_for_function: Option<WaitForFunction>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    wait_until: &'static str,
    timeout: u64,
}

#[derive(Serialize)]
struct ScriptTag {
    content: String,
}

#[derive(Serialize)]
struct WaitForFunction {
    #[serde(rename = "fn")]
    function: &'static str,
    timeout: u64,
}

impl BrowserlessSession {
    fn ensure_open(&self) -> Result<(), ScraperError> {
        if self.permit.is_none() {
            return Err(ScraperError::Navigation {
                url: self.current_url.clone().unwrap_or_default(),
                reason: "session is closed".to_owned(),
            });
        }
        Ok(())
    }

    fn queue(&mut self, step: Step) -> Result<(), ScraperError> {
        self.ensure_open()?;
        if self.current_url.is_none() {
            return Err(ScraperError::Navigation {
                url: String::new(),
                reason: "no page loaded".to_owned(),
            });
        }
        self.steps.push(step);
        Ok(())
    }
}

#[async_trait]
impl PageSession for BrowserlessSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.ensure_open()?;
        self.current_url = Some(url.to_owned());
        self.steps.clear();
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<(), ScraperError> {
        self.queue(Step::Click(selector.to_owned()))
    }

    async fn wait_for_selector(&mut self, selector: &str) -> Result<(), ScraperError> {
        self.queue(Step::Selector(selector.to_owned()))
    }

    async fn wait_for_text(&mut self, text: &str) -> Result<(), ScraperError> {
        self.queue(Step::Text(text.to_owned()))
    }

    async fn content(&mut self) -> Result<RenderedPage, ScraperError> {
        self.ensure_open()?;
        let url = self
            .current_url
            .clone()
            .ok_or_else(|| ScraperError::Navigation {
                url: String::new(),
                reason: "no page loaded".to_owned(),
            })?;

        let (add_script_tag, wait_for_function) = if self.steps.is_empty() {
            (Vec::new(), None)
        } else {
            let script = ready_script(&self.steps, self.wait_timeout_ms)?;
            (
                vec![ScriptTag { content: script }],
                Some(WaitForFunction {
                    function: READY_FLAG_FN,
                    timeout: self.wait_timeout_ms,
                }),
            )
        };
        let body = ContentRequest {
            url: &url,
            goto_options: GotoOptions {
                wait_until: "networkidle2",
                timeout: self.wait_timeout_ms,
            },
            add_script_tag,
            wait_for_function,
        };

        tracing::debug!(url = %url, steps = self.steps.len(), "rendering page");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::Navigation {
                url,
                reason: format!("browserless returned {}: {}", status.as_u16(), message.trim()),
            });
        }

        let html = response.text().await?;
        Ok(RenderedPage::new(url, html))
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.permit.take();
        self.steps.clear();
        Ok(())
    }
}

/// Compiles queued steps into a self-running script that sets the ready
/// flag once every step has completed within `timeout_ms`.
fn ready_script(steps: &[Step], timeout_ms: u64) -> Result<String, ScraperError> {
    let steps_json = serde_json::to_string(steps).map_err(|source| ScraperError::Json {
        context: "browser steps".to_owned(),
        source,
    })?;
    Ok(format!(
        r"(async () => {{
  const steps = {steps_json};
  const deadline = Date.now() + {timeout_ms};
  const until = async (check) => {{
    while (!check()) {{
      if (Date.now() > deadline) throw new Error('wait timed out');
      await new Promise((resolve) => setTimeout(resolve, 100));
    }}
  }};
  for (const step of steps) {{
    if (step.click !== undefined) {{
      await until(() => document.querySelector(step.click));
      document.querySelector(step.click).click();
    }} else if (step.selector !== undefined) {{
      await until(() => document.querySelector(step.selector));
    }} else if (step.text !== undefined) {{
      await until(() => document.body && document.body.innerText.includes(step.text));
    }}
  }}
  window.__reviewscrapeReady = true;
}})().catch(() => {{ window.__reviewscrapeReady = false; }});"
    ))
}
