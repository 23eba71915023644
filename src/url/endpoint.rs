use crate::config::ScrapeConfig;
use crate::url::ArticleRef;

/// Sort order requested from the comment API
const SORT_ORDER: &str = "desc";

/// Builds the reader-comments API URL for an article
///
/// Pure and deterministic: the same article and config always yield the
/// same string.
///
/// # Example
///
/// ```
/// use dm_scrape::config::ScrapeConfig;
/// use dm_scrape::url::{build_endpoint, ArticleRef};
///
/// let article = ArticleRef { id: 1234567, slug: "some-headline".to_string() };
/// assert_eq!(
///     build_endpoint(&article, &ScrapeConfig::default()),
///     "https://www.dailymail.co.uk/reader-comments/p/asset/readcomments/1234567?max=506&order=desc"
/// );
/// ```
pub fn build_endpoint(article: &ArticleRef, config: &ScrapeConfig) -> String {
    format!(
        "https://{}/reader-comments/p/asset/readcomments/{}?max={}&order={}",
        config.site, article.id, config.max_comments, SORT_ORDER
    )
}
