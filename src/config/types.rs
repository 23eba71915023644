use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of comments requested from the API
pub const DEFAULT_MAX_COMMENTS: u32 = 506;

/// Default render timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of retries after a malformed payload
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Host serving both the articles and the comment API
pub const DEFAULT_SITE: &str = "www.dailymail.co.uk";

/// Article URL shape: `...-<id>/<slug>.html`
pub const DEFAULT_URL_PATTERN: &str = r"[\w:/.]+-(\d+)/([\w-]+)\.html";

/// Tag wrapping the JSON body when the browser renders a JSON document
pub const DEFAULT_ELEMENT_TAG: &str = "pre";

/// Main configuration structure for dm-scrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to request and how patiently
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScrapeConfig {
    /// Maximum number of comments to request
    pub max_comments: u32,

    /// Time allowed for the comment page to load, in seconds
    pub timeout_secs: u64,

    /// Extra attempts after a malformed payload
    pub max_retries: u32,

    /// Pause between retries (milliseconds)
    pub retry_delay_ms: u64,

    /// Host of the news site
    pub site: String,

    /// Reject article URLs on any other host
    pub validate_host: bool,

    /// Regex with two capture groups: article ID and slug
    pub url_pattern: String,
}

impl ScrapeConfig {
    /// Builds a config with the given comment limit and timeout, other fields defaulted
    ///
    /// The timeout is kept in whole seconds, rounded up, and never below one.
    pub fn new(max_comments: u32, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        Self {
            max_comments,
            timeout_secs: timeout.as_secs().saturating_add(partial).max(1),
            ..Self::default()
        }
    }

    /// Render timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause between retries as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_comments: DEFAULT_MAX_COMMENTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: 0,
            site: DEFAULT_SITE.to_string(),
            validate_host: true,
            url_pattern: DEFAULT_URL_PATTERN.to_string(),
        }
    }
}

/// Headless browser launch settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,

    /// Chromium binary; auto-detected when unset
    pub executable: Option<PathBuf>,

    /// Extra command-line flags passed to the browser
    pub args: Vec<String>,

    /// Tag of the element holding the JSON payload
    pub element_tag: String,

    /// Pause after opening a page, before navigating (milliseconds)
    pub settle_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            args: vec![
                "--no-sandbox".to_string(),
                "--disable-gpu".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
            element_tag: DEFAULT_ELEMENT_TAG.to_string(),
            settle_ms: 300,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory the CSV file is written to
    pub directory: PathBuf,

    /// Appended to the article slug to form the file name
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            suffix: "-comments.csv".to_string(),
        }
    }
}
