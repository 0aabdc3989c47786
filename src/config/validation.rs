use crate::config::types::{Config, ExportConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_export_config(&config.export)?;
    Ok(())
}

/// Validates site and request configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    require_non_empty("user_agent", &config.user_agent)?;
    require_non_empty("not_found_phrase", &config.not_found_phrase)?;
    require_non_empty("directed_by_phrase", &config.directed_by_phrase)?;

    if config.page_param.is_empty()
        || !config
            .page_param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "page_param must be a non-empty query key, got '{}'",
            config.page_param
        )));
    }

    Ok(())
}

/// Validates export configuration
fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if config.max_bytes == 0 {
        return Err(ConfigError::Validation(
            "max_bytes must be >= 1".to_string(),
        ));
    }

    if config.max_rows == 0 {
        return Err(ConfigError::Validation("max_rows must be >= 1".to_string()));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn require_non_empty(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }
    Ok(())
}
