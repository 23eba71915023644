//! Scripted render client
//!
//! Replays a fixed sequence of outcomes instead of driving a browser, so the
//! retry behaviour of the scraper can be exercised deterministically.

use crate::render::RenderClient;
use crate::RenderError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One scripted render outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    /// Return this text as the element content
    Text(String),
    /// Fail as if the page never loaded in time
    Timeout,
    /// Fail with a non-timeout render error
    Failure(String),
}

impl Scripted {
    /// Shorthand for [`Scripted::Text`]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn into_result(self, url: &str, timeout: Duration) -> Result<String, RenderError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Timeout => Err(RenderError::Timeout {
                url: url.to_string(),
                waited: timeout,
            }),
            Self::Failure(message) => Err(RenderError::Failure {
                url: url.to_string(),
                message,
                source: None,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    pending: VecDeque<Scripted>,
    last: Option<Scripted>,
    requested: Vec<String>,
}

/// Render client that replays [`Scripted`] outcomes in order
///
/// Once the script runs out, the final outcome repeats forever.
#[derive(Debug, Default)]
pub struct ScriptedRenderClient {
    state: Mutex<ScriptState>,
}

impl ScriptedRenderClient {
    /// Creates a client that will replay `script` in order
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            state: Mutex::new(ScriptState {
                pending: script.into_iter().collect(),
                ..ScriptState::default()
            }),
        }
    }

    /// Creates a client that returns the same outcome on every call
    pub fn always(outcome: Scripted) -> Self {
        Self::new([outcome])
    }

    /// Number of render calls made so far
    pub fn calls(&self) -> usize {
        self.lock().requested.len()
    }

    /// URLs passed to each render call, in call order
    pub fn requested_urls(&self) -> Vec<String> {
        self.lock().requested.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RenderClient for ScriptedRenderClient {
    async fn render(&self, url: &str, timeout: Duration) -> Result<String, RenderError> {
        let outcome = {
            let mut state = self.lock();
            state.requested.push(url.to_string());

            match state.pending.pop_front() {
                Some(next) => {
                    state.last = Some(next.clone());
                    Some(next)
                }
                None => state.last.clone(),
            }
        };

        match outcome {
            Some(outcome) => outcome.into_result(url, timeout),
            None => Err(RenderError::Failure {
                url: url.to_string(),
                message: "render script is empty".to_string(),
                source: None,
            }),
        }
    }
}
