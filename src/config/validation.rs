use crate::config::types::{BrowserSettings, Config, OutputConfig, ScrapeConfig};
use crate::ConfigError;
use regex::Regex;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_browser_settings(&config.browser)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scrape configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.max_comments < 1 {
        return Err(ConfigError::Validation(format!(
            "max-comments must be >= 1, got {}",
            config.max_comments
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    validate_site(&config.site)?;
    validate_url_pattern(&config.url_pattern)?;

    Ok(())
}

/// Validates browser settings
fn validate_browser_settings(settings: &BrowserSettings) -> Result<(), ConfigError> {
    if settings.element_tag.is_empty() {
        return Err(ConfigError::Validation(
            "element-tag cannot be empty".to_string(),
        ));
    }

    if !settings
        .element_tag
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "element-tag must be a bare tag name, got '{}'",
            settings.element_tag
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.suffix.is_empty() || config.suffix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "output suffix must be a non-empty file name fragment, got '{}'",
            config.suffix
        )));
    }

    Ok(())
}

/// Validates the site host name
fn validate_site(site: &str) -> Result<(), ConfigError> {
    if site.is_empty() {
        return Err(ConfigError::Validation("site cannot be empty".to_string()));
    }

    if !site
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "site '{}' must be a bare host name",
            site
        )));
    }

    if site.starts_with('.') || site.ends_with('.') || site.contains("..") {
        return Err(ConfigError::Validation(format!(
            "site '{}' has misplaced dots",
            site
        )));
    }

    Ok(())
}

/// Checks that the URL pattern compiles and captures an ID and a slug
fn validate_url_pattern(pattern: &str) -> Result<(), ConfigError> {
    let regex = Regex::new(pattern)?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 3 {
        return Err(ConfigError::Validation(format!(
            "url-pattern must have two capture groups (id, slug), got {}",
            regex.captures_len() - 1
        )));
    }

    Ok(())
}
