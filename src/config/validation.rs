//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    FileSettings, LoggerSettings, RequestConfig, RetryConfig, Settings, SiteConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Proxy schemes reqwest can dial
const VALID_PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

impl RequestConfig {
    /// Validate request configuration
    ///
    /// # Validation Rules
    /// - Timeout must be greater than 0
    /// - Blur level must be between 0 and 100
    /// - Max blur radius must be a finite, non-negative number
    /// - Proxy, when set, must be an absolute URL with a supported scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "request.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.blur_level > 100 {
            return Err(ConfigError::validation(
                "request.blur_level",
                format!("Blur level must be between 0 and 100, got {}.", self.blur_level),
            ));
        }

        if !self.max_blur_radius.is_finite() || self.max_blur_radius < 0.0 {
            return Err(ConfigError::validation(
                "request.max_blur_radius",
                "Max blur radius must be a finite number >= 0.",
            ));
        }

        if let Some(proxy) = self.proxy() {
            validate_proxy(proxy)?;
        }

        Ok(())
    }
}

pub(crate) fn validate_proxy(proxy: &str) -> Result<(), ConfigError> {
    let url = Url::parse(proxy).map_err(|e| {
        ConfigError::validation(
            "request.proxy_address",
            format!("Invalid proxy URL '{}': {}", proxy, e),
        )
    })?;

    if !VALID_PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::validation(
            "request.proxy_address",
            format!(
                "Unsupported proxy scheme '{}'. Valid schemes are: {}",
                url.scheme(),
                VALID_PROXY_SCHEMES.join(", ")
            ),
        ));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::validation(
            "request.proxy_address",
            format!("Proxy URL '{}' has no host.", proxy),
        ));
    }

    Ok(())
}

impl SiteConfig {
    /// Validate site configuration
    ///
    /// The base URL is joined with identifiers by plain concatenation, so it
    /// must be http(s) and end with a slash.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::validation("site.base_url", format!("Invalid base URL: {}", e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "site.base_url",
                "Base URL must use http or https.",
            ));
        }

        if !self.base_url.ends_with('/') {
            return Err(ConfigError::validation(
                "site.base_url",
                "Base URL must end with '/'.",
            ));
        }

        Ok(())
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::validation(
                "retry.max_attempts",
                "Max attempts must be at least 1.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.request.validate()?;
        self.site.validate()?;
        self.retry.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
