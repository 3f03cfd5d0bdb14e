use crate::config::types::{Config, CrawlConfig, FetcherConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates crawl bounds and prefix lists
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // depth_limit >= 0 is always true for u32, so no check needed

    if config.max_urls_count < 1 {
        return Err(ConfigError::Validation(format!(
            "max_urls_count must be >= 1, got {}",
            config.max_urls_count
        )));
    }

    for prefix in config
        .allowed_prefixes
        .iter()
        .chain(config.excluded_prefixes.iter())
    {
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "URL prefixes cannot be empty strings".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.accept_mimetypes.is_empty() {
        return Err(ConfigError::Validation(
            "accept_mimetypes cannot be empty".to_string(),
        ));
    }

    Ok(())
}
