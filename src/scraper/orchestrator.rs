//! Scrape orchestration
//!
//! Drives the render client and the decoder through a bounded retry loop.
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Render timeout | Immediate → Failed |
//! | Other render error | Immediate → Failed |
//! | Malformed payload | Retry with a fresh render, up to `max_retries` times |
//! | Payload decoded | Immediate → Success |

use crate::comments::{decode, CommentResponse};
use crate::config::ScrapeConfig;
use crate::render::RenderClient;
use crate::scraper::ScrapeState;
use crate::url::{build_endpoint, ArticleRef};
use crate::ScrapeError;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// A successful scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    /// The decoded comment response
    pub response: CommentResponse,

    /// Render attempts used, including the successful one
    pub attempts: u32,
}

/// Tracks state and attempt count for one scrape run
#[derive(Debug)]
struct Run {
    state: ScrapeState,
    attempts: u32,
}

impl Run {
    fn new() -> Self {
        Self {
            state: ScrapeState::Idle,
            attempts: 0,
        }
    }

    fn transition(&mut self, next: ScrapeState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal scrape transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, attempt = self.attempts, "scrape state");
        self.state = next;
    }
}

/// Scrapes the comments of one article
///
/// Builds the endpoint once, then renders and decodes it until a complete
/// response is read. A malformed payload triggers a fresh render, at most
/// `max_retries` times; any render error ends the run at once.
///
/// # Arguments
///
/// * `article` - The article whose comments to fetch
/// * `config` - Comment limit, timeout and retry delay
/// * `client` - Render client; one page is opened per attempt
/// * `max_retries` - Extra attempts allowed after malformed payloads
///
/// # Returns
///
/// * `Ok(ScrapeOutcome)` - Decoded response and the number of attempts used
/// * `Err(ScrapeError::Render)` - The render client failed or timed out
/// * `Err(ScrapeError::RetriesExhausted)` - Every attempt produced a malformed payload
///
/// # Example
///
/// ```
/// use dm_scrape::config::ScrapeConfig;
/// use dm_scrape::render::{Scripted, ScriptedRenderClient};
/// use dm_scrape::scrape;
/// use dm_scrape::url::ArticleRef;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let article = ArticleRef { id: 1, slug: "headline".to_string() };
/// let client = ScriptedRenderClient::new([
///     Scripted::text(r#"{"status":"#),
///     Scripted::text(r#"{"status":"success","code":"200","payload":{"total":0,"max":506,"page":[]}}"#),
/// ]);
///
/// let outcome = scrape(&article, &ScrapeConfig::default(), &client, 3).await.unwrap();
/// assert_eq!(outcome.attempts, 2);
/// # });
/// ```
pub async fn scrape<R>(
    article: &ArticleRef,
    config: &ScrapeConfig,
    client: &R,
    max_retries: u32,
) -> crate::Result<ScrapeOutcome>
where
    R: RenderClient + ?Sized,
{
    let endpoint = build_endpoint(article, config);
    let timeout = config.timeout();
    let mut run = Run::new();

    info!(
        article_id = article.id,
        slug = %article.slug,
        %endpoint,
        "spinning up headless browser to scrape comments"
    );

    loop {
        run.transition(ScrapeState::Rendering);
        run.attempts += 1;

        let raw = match client.render(&endpoint, timeout).await {
            Ok(raw) => raw,
            Err(e) => {
                run.transition(ScrapeState::Failed);
                error!(article_id = article.id, attempt = run.attempts, error = %e, "render failed");
                return Err(e.into());
            }
        };

        run.transition(ScrapeState::Decoding);
        info!(attempt = run.attempts, "parsing response from browser");

        match decode(&raw) {
            Ok(response) => {
                run.transition(ScrapeState::Success);
                info!(
                    article_id = article.id,
                    attempts = run.attempts,
                    total = response.payload.total,
                    max = response.payload.max,
                    received = response.payload.page.len(),
                    "comments decoded"
                );
                return Ok(ScrapeOutcome {
                    response,
                    attempts: run.attempts,
                });
            }
            Err(ScrapeError::Decode(source)) if run.attempts > max_retries => {
                run.transition(ScrapeState::Failed);
                error!(
                    article_id = article.id,
                    attempts = run.attempts,
                    error = %source,
                    "giving up on malformed comment response"
                );
                return Err(ScrapeError::RetriesExhausted {
                    attempts: run.attempts,
                    source,
                });
            }
            Err(ScrapeError::Decode(source)) => {
                run.transition(ScrapeState::RetryPending);
                warn!(attempt = run.attempts, error = %source, "scrape failed - retrying");

                let delay = config.retry_delay();
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
            Err(other) => {
                run.transition(ScrapeState::Failed);
                return Err(other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Scripted, ScriptedRenderClient};
    use crate::ErrorKind;
    use std::time::Duration;

    const VALID: &str = r#"{"status":"success","code":"200","payload":{"total":1,"max":506,
        "page":[{"userAlias":"x","id":42,"voteRating":-3,"hasProfilePicture":true,"message":"hi"}]}}"#;
    const PARTIAL: &str = r#"{"status":"success","code":"200","payload":{"total":1,"#;

    fn article() -> ArticleRef {
        ArticleRef {
            id: 1234567,
            slug: "some-headline".to_string(),
        }
    }

    fn config() -> ScrapeConfig {
        ScrapeConfig::new(506, Duration::from_secs(15))
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let client = ScriptedRenderClient::always(Scripted::text(VALID));
        let outcome = scrape(&article(), &config(), &client, 3).await.unwrap();

        assert_eq!(outcome.attempts, 1);
        assert_eq!(client.calls(), 1);
        assert_eq!(outcome.response.comments()[0].user_alias, "x");
    }

    #[tokio::test]
    async fn test_always_malformed_makes_max_retries_plus_one_attempts() {
        for max_retries in [0, 1, 3, 5] {
            let client = ScriptedRenderClient::always(Scripted::text(PARTIAL));
            let err = scrape(&article(), &config(), &client, max_retries)
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::RetriesExhausted);
            assert!(matches!(
                err,
                ScrapeError::RetriesExhausted { attempts, .. } if attempts == max_retries + 1
            ));
            assert_eq!(client.calls(), max_retries as usize + 1);
        }
    }

    #[tokio::test]
    async fn test_success_after_k_attempts() {
        let max_retries = 3;
        for k in 1..=max_retries + 1 {
            let mut script = vec![Scripted::text(PARTIAL); (k - 1) as usize];
            script.push(Scripted::text(VALID));
            let client = ScriptedRenderClient::new(script);

            let outcome = scrape(&article(), &config(), &client, max_retries)
                .await
                .unwrap();

            assert_eq!(outcome.attempts, k);
            assert_eq!(client.calls(), k as usize);
        }
    }

    #[tokio::test]
    async fn test_timeout_is_not_retried() {
        let client = ScriptedRenderClient::new([Scripted::Timeout, Scripted::text(VALID)]);
        let err = scrape(&article(), &config(), &client, 3).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RenderTimeout);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_render_failure_is_not_retried() {
        let client = ScriptedRenderClient::new([
            Scripted::Failure("no pre tag".to_string()),
            Scripted::text(VALID),
        ]);
        let err = scrape(&article(), &config(), &client, 3).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RenderFailure);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_timeout_after_malformed_payload_stops_retrying() {
        let client = ScriptedRenderClient::new([
            Scripted::text(PARTIAL),
            Scripted::Timeout,
            Scripted::text(VALID),
        ]);
        let err = scrape(&article(), &config(), &client, 3).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RenderTimeout);
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_every_attempt_uses_the_same_endpoint() {
        let client = ScriptedRenderClient::new([
            Scripted::text(PARTIAL),
            Scripted::text(""),
            Scripted::text(VALID),
        ]);
        scrape(&article(), &config(), &client, 3).await.unwrap();

        let expected =
            "https://www.dailymail.co.uk/reader-comments/p/asset/readcomments/1234567?max=506&order=desc";
        assert_eq!(client.requested_urls(), vec![expected.to_string(); 3]);
    }

    #[tokio::test]
    async fn test_retry_delay_between_attempts() {
        let mut config = config();
        config.retry_delay_ms = 50;
        let client = ScriptedRenderClient::new([Scripted::text(PARTIAL), Scripted::text(VALID)]);

        let started = std::time::Instant::now();
        let outcome = scrape(&article(), &config, &client, 3).await.unwrap();

        assert_eq!(outcome.attempts, 2);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let client = ScriptedRenderClient::always(Scripted::text(VALID));
        let dyn_client: &dyn RenderClient = &client;

        let outcome = scrape(&article(), &config(), dyn_client, 0).await.unwrap();
        assert_eq!(outcome.attempts, 1);
    }
}
