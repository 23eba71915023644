//! Page rendering boundary
//!
//! The comment API rejects plain HTTP clients, so the payload is read out of
//! a page rendered by a real browser. This module defines the capability the
//! scraper needs from that browser:
//! - [`ChromiumRenderClient`]: headless Chromium over the DevTools protocol
//! - [`ScriptedRenderClient`]: deterministic in-memory stand-in for tests

mod browser;
mod stub;

pub use browser::ChromiumRenderClient;
pub use stub::{Scripted, ScriptedRenderClient};

use crate::RenderError;
use async_trait::async_trait;
use std::time::Duration;

/// Renders a URL and returns the text of the payload element
///
/// Each call must start from a fresh page and release it before returning,
/// whatever the outcome.
#[async_trait]
pub trait RenderClient: Send + Sync {
    /// Navigates to `url` and returns the payload element's text
    ///
    /// # Errors
    ///
    /// * [`RenderError::Timeout`] - page or element not ready within `timeout`
    /// * [`RenderError::Failure`] - any other setup, navigation or lookup fault
    async fn render(&self, url: &str, timeout: Duration) -> Result<String, RenderError>;
}
