//! Headless Chromium render client
//!
//! One browser process lives for the whole run; every render opens its own
//! page and closes it before returning.

use crate::config::BrowserSettings;
use crate::render::RenderClient;
use crate::RenderError;
use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Render client backed by a headless Chromium instance
pub struct ChromiumRenderClient {
    browser: Browser,
    handler: JoinHandle<()>,
    element_tag: String,
    settle: Duration,
}

impl ChromiumRenderClient {
    /// Launches the browser and starts its event loop
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Launch`] if the browser config is rejected or
    /// the process cannot be started.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, RenderError> {
        info!(headless = settings.headless, "launching browser");

        let mut builder = BrowserConfig::builder().args(settings.args.iter());
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The handler stream must be polled for any browser command to complete
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            browser,
            handler,
            element_tag: settings.element_tag.clone(),
            settle: Duration::from_millis(settings.settle_ms),
        })
    }

    /// Closes the browser and stops the event loop
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "failed to close browser cleanly");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "failed to wait for browser exit");
        }
        self.handler.abort();
        debug!("browser shut down");
    }

    /// Navigates an open page and reads the payload element
    ///
    /// `timeout` bounds the whole read, from the blank page settling to the
    /// element text arriving.
    async fn read_payload(
        &self,
        page: &Page,
        url: &str,
        timeout: Duration,
    ) -> Result<String, RenderError> {
        let tag = self.element_tag.as_str();
        let read = async {
            page.wait_for_navigation()
                .await
                .map_err(|e| classify(url, timeout, "page never settled", e))?;

            if !self.settle.is_zero() {
                sleep(self.settle).await;
            }

            page.goto(url)
                .await
                .map_err(|e| classify(url, timeout, "failed to fetch comments", e))?;

            let element = page
                .find_element(tag)
                .await
                .map_err(|e| classify(url, timeout, format!("failed to find <{tag}> element"), e))?;

            element
                .inner_text()
                .await
                .map_err(|e| classify(url, timeout, "failed to retrieve text from page", e))
        };

        match tokio::time::timeout(timeout, read).await {
            Ok(text) => Ok(text?.unwrap_or_default()),
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
                waited: timeout,
            }),
        }
    }
}

#[async_trait]
impl RenderClient for ChromiumRenderClient {
    async fn render(&self, url: &str, timeout: Duration) -> Result<String, RenderError> {
        debug!(url, ?timeout, "opening page");

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::failure(url, "failed to set up browser page", e))?;

        let result = self.read_payload(&page, url, timeout).await;

        // Released on every path, including timeouts
        if let Err(e) = page.close().await {
            warn!(error = %e, "failed to close page");
        }

        if result.is_ok() {
            info!("comments scraped");
        }
        result
    }
}

/// Maps a protocol error to the render error taxonomy
fn classify(url: &str, timeout: Duration, message: impl Into<String>, error: CdpError) -> RenderError {
    match error {
        CdpError::Timeout => RenderError::Timeout {
            url: url.to_string(),
            waited: timeout,
        },
        other => RenderError::failure(url, message, other),
    }
}
