//! Integration tests for the scrape pipeline
//!
//! These tests replace the browser with a scripted render client and run
//! the full resolve, scrape and export cycle end-to-end.

use dm_scrape::config::{parse_config, Config};
use dm_scrape::output::{comments_to_csv, output_path, save_comments};
use dm_scrape::render::{Scripted, ScriptedRenderClient};
use dm_scrape::{build_endpoint, scrape, ArticleResolver, ErrorKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ARTICLE_URL: &str =
    "https://www.dailymail.co.uk/news/article-1234567/some-headline.html";

const RESPONSE: &str = r#"{
    "status": "success",
    "code": "200",
    "payload": {
        "total": 2,
        "max": 506,
        "page": [
            {
                "userAlias": "Reader One",
                "userLocation": "Leeds",
                "formattedDateAndTime": "1 hour ago",
                "assetId": 1234567,
                "voteCount": 12,
                "id": 900001,
                "userIdentifier": "u-1",
                "hasProfilePicture": true,
                "voteRating": 8,
                "dateCreated": "2024-03-01T10:15:00Z",
                "assetCommentCount": 2,
                "assetUrl": "https://www.dailymail.co.uk/news/article-1234567/some-headline.html",
                "message": "First, and \"quoted\""
            },
            {
                "userAlias": "x",
                "id": 42,
                "voteRating": -3,
                "hasProfilePicture": true,
                "message": "hi"
            }
        ]
    }
}"#;

/// Creates a test configuration that writes into `dir`
fn create_test_config(dir: &Path) -> Config {
    let toml = format!(
        r#"
[scrape]
max-comments = 506
timeout-secs = 15
max-retries = 3

[output]
directory = "{}"
"#,
        dir.display()
    );
    parse_config(&toml).unwrap()
}

/// Resolves, scrapes and saves one article the way the binary does
async fn run_pipeline(
    config: &Config,
    client: &ScriptedRenderClient,
    url: &str,
) -> dm_scrape::Result<PathBuf> {
    let resolver = ArticleResolver::from_config(&config.scrape)?;
    let article = resolver.resolve(url)?;

    let outcome = scrape(&article, &config.scrape, client, config.scrape.max_retries).await?;
    let csv = comments_to_csv(outcome.response.comments())?;

    let path = output_path(&config.output.directory, &article.slug, &config.output.suffix);
    save_comments(&path, &csv)?;
    Ok(path)
}

#[tokio::test]
async fn test_resolve_and_build_endpoint() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());

    let resolver = ArticleResolver::from_config(&config.scrape).unwrap();
    let article = resolver.resolve(ARTICLE_URL).unwrap();
    assert_eq!(article.id, 1234567);
    assert_eq!(article.slug, "some-headline");

    let endpoint = build_endpoint(&article, &config.scrape);
    assert!(endpoint.ends_with("/readcomments/1234567?max=506&order=desc"));
}

#[tokio::test]
async fn test_full_pipeline_writes_csv() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let client = ScriptedRenderClient::always(Scripted::text(RESPONSE));

    let path = run_pipeline(&config, &client, ARTICLE_URL).await.unwrap();

    assert_eq!(path, dir.path().join("some-headline-comments.csv"));
    assert_eq!(
        client.requested_urls(),
        vec![
            "https://www.dailymail.co.uk/reader-comments/p/asset/readcomments/1234567?max=506&order=desc"
                .to_string()
        ]
    );

    let csv = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("user-alias,user-location,formatted-date-and-time"));
    assert_eq!(
        lines[1],
        "Reader One,Leeds,1 hour ago,1234567,12,900001,u-1,true,8,2024-03-01T10:15:00Z,2,\
https://www.dailymail.co.uk/news/article-1234567/some-headline.html,\"First, and \"\"quoted\"\"\""
    );
    assert_eq!(lines[2], "x,,,,,42,,true,-3,,,,hi");
}

#[tokio::test]
async fn test_pipeline_recovers_from_truncated_payload() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let client = ScriptedRenderClient::new([
        Scripted::text(&RESPONSE[..40]),
        Scripted::text("<html><body>Access denied</body></html>"),
        Scripted::text(RESPONSE),
    ]);

    let path = run_pipeline(&config, &client, ARTICLE_URL).await.unwrap();

    assert_eq!(client.calls(), 3);
    let csv = fs::read_to_string(path).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_exhausted_retries_write_nothing() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let client = ScriptedRenderClient::always(Scripted::text("{\"status\":"));

    let err = run_pipeline(&config, &client, ARTICLE_URL)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RetriesExhausted);
    assert_eq!(client.calls(), 4);
    assert!(!dir.path().join("some-headline-comments.csv").exists());
}

#[tokio::test]
async fn test_timeout_leaves_existing_file_untouched() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let existing = dir.path().join("some-headline-comments.csv");
    fs::write(&existing, "previous run\n").unwrap();

    let client = ScriptedRenderClient::always(Scripted::Timeout);
    let err = run_pipeline(&config, &client, ARTICLE_URL)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RenderTimeout);
    assert_eq!(client.calls(), 1);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "previous run\n");
}

#[tokio::test]
async fn test_invalid_url_never_renders() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let client = ScriptedRenderClient::always(Scripted::text(RESPONSE));

    for url in [
        "https://www.dailymail.co.uk/news/index.html",
        "https://www.example.com/news/article-1234567/some-headline.html",
        "not a url",
    ] {
        let err = run_pipeline(&config, &client, url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl, "url: {url}");
    }

    assert_eq!(client.calls(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_host_check_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(dir.path());
    config.scrape.validate_host = false;
    let client = ScriptedRenderClient::always(Scripted::text(RESPONSE));

    let path = run_pipeline(
        &config,
        &client,
        "https://mirror.example.org/news/article-7/other-story.html",
    )
    .await
    .unwrap();

    assert_eq!(path, dir.path().join("other-story-comments.csv"));
    assert!(client.requested_urls()[0].contains("/readcomments/7?max=506&order=desc"));
}
