use crate::config::ScrapeConfig;
use crate::{ConfigError, ScrapeError};
use regex::Regex;
use std::fmt;
use url::Url;

/// One article on the news site, as identified by the comment API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleRef {
    /// Numeric article ID from the URL path
    pub id: u64,

    /// Human-readable name from the URL file component, without `.html`
    pub slug: String,
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "article {} ({})", self.id, self.slug)
    }
}

/// Turns raw article URLs into [`ArticleRef`]s
///
/// The pattern and host are supplied by the caller rather than read from
/// globals, so several resolvers with different rules can coexist.
#[derive(Debug, Clone)]
pub struct ArticleResolver {
    pattern: Regex,
    site: String,
    validate_host: bool,
}

impl ArticleResolver {
    /// Creates a resolver from a compiled pattern
    ///
    /// `pattern` must capture the article ID in group 1 and the slug in group 2.
    pub fn new(pattern: Regex, site: impl Into<String>, validate_host: bool) -> Self {
        Self {
            pattern,
            site: site.into(),
            validate_host,
        }
    }

    /// Creates a resolver from the `url-pattern`, `site` and `validate-host` settings
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&config.url_pattern)?;
        Ok(Self::new(pattern, config.site.clone(), config.validate_host))
    }

    /// Parses a raw article URL into an [`ArticleRef`]
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidUrl`] when the URL does not parse, is on
    /// another host (if host validation is on), does not have the expected
    /// shape, carries a non-numeric or zero ID, or has an empty slug.
    ///
    /// # Example
    ///
    /// ```
    /// use dm_scrape::config::ScrapeConfig;
    /// use dm_scrape::url::ArticleResolver;
    ///
    /// let resolver = ArticleResolver::from_config(&ScrapeConfig::default()).unwrap();
    /// let article = resolver
    ///     .resolve("https://www.dailymail.co.uk/news/article-1234567/some-headline.html")
    ///     .unwrap();
    ///
    /// assert_eq!(article.id, 1234567);
    /// assert_eq!(article.slug, "some-headline");
    /// ```
    pub fn resolve(&self, raw_url: &str) -> crate::Result<ArticleRef> {
        let parsed = Url::parse(raw_url.trim()).map_err(|e| ScrapeError::InvalidUrl {
            url: raw_url.to_string(),
            reason: "URL failed to parse".to_string(),
            source: Some(e),
        })?;

        if self.validate_host {
            let host = parsed.host_str().unwrap_or_default();
            if !host.eq_ignore_ascii_case(&self.site) {
                return Err(ScrapeError::invalid_url(
                    raw_url,
                    format!("expected host {}, got '{}'", self.site, host),
                ));
            }
        }

        let captures = self.pattern.captures(parsed.as_str()).ok_or_else(|| {
            ScrapeError::invalid_url(raw_url, "URL didn't match expected structure")
        })?;

        let id = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                ScrapeError::invalid_url(raw_url, "couldn't convert article ID to an integer")
            })?;

        let slug = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        if slug.is_empty() {
            return Err(ScrapeError::invalid_url(
                raw_url,
                "failed to parse name from article URL",
            ));
        }

        Ok(ArticleRef {
            id,
            slug: slug.to_string(),
        })
    }
}
