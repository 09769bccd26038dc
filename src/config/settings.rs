//! Configuration settings structures for xview-bot
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "xview-bot".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_blur_radius() -> f32 {
    50.0
}

fn default_base_url() -> String {
    "https://secure.xview.tv/".to_string()
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/xview-bot.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Request Configuration
// ============================================================================

/// Process-wide request settings, read-only once loaded.
///
/// Every component that talks to the site or touches thumbnails takes this
/// by reference instead of reading ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Proxy URL (`http://`, `https://`, `socks5://`, `socks5h://`).
    /// An empty string means no proxy.
    #[serde(default, alias = "proxy")]
    pub proxy_address: Option<String>,

    /// Hard deadline for a single request, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Thumbnail blur intensity, 0 (untouched) to 100
    #[serde(default)]
    pub blur_level: u8,

    /// Gaussian sigma applied at blur level 100
    #[serde(default = "default_max_blur_radius")]
    pub max_blur_radius: f32,
}

impl RequestConfig {
    /// The configured proxy, with blank values treated as unset
    pub fn proxy(&self) -> Option<&str> {
        self.proxy_address
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            proxy_address: None,
            timeout_seconds: default_timeout_seconds(),
            blur_level: 0,
            max_blur_radius: default_max_blur_radius(),
        }
    }
}

// ============================================================================
// Site Configuration
// ============================================================================

/// Where profile pages and search endpoints live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root, must end with a slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl SiteConfig {
    /// Profile page URL for an identifier.
    ///
    /// The identifier is percent-encoded as a single path segment, so `?`,
    /// `#`, `/` and spaces never leave the profile path.
    pub fn profile_url(&self, identifier: &str) -> String {
        let Ok(mut url) = Url::parse(&self.base_url) else {
            return format!("{}{}/", self.base_url, identifier);
        };

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([identifier, ""]);
        }
        url.into()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

// ============================================================================
// Retry Configuration
// ============================================================================

/// Caller-side retry policy for rate-limited or timed-out lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one; 1 disables retrying
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

// ============================================================================
// Logger Settings (compatible with existing LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    /// Parse the format string into LogFormat enum
    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Proxy, timeout and blur settings
    #[serde(default)]
    pub request: RequestConfig,

    /// Source site location
    #[serde(default)]
    pub site: SiteConfig,

    /// Caller-side retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_request_config() -> impl Strategy<Value = RequestConfig> {
        (
            prop_oneof![
                Just(None),
                Just(Some("http://127.0.0.1:7890".to_string())),
                Just(Some("socks5://proxy.local:1080".to_string())),
            ],
            1u64..=300u64,
            0u8..=100u8,
            // whole numbers survive the TOML float round-trip exactly
            (0u16..=200u16).prop_map(f32::from),
        )
            .prop_map(
                |(proxy_address, timeout_seconds, blur_level, max_blur_radius)| RequestConfig {
                    proxy_address,
                    timeout_seconds,
                    blur_level,
                    max_blur_radius,
                },
            )
    }

    fn arb_retry_config() -> impl Strategy<Value = RetryConfig> {
        (1u32..=5u32, 0u64..=10_000u64)
            .prop_map(|(max_attempts, delay_ms)| RetryConfig {
                max_attempts,
                delay_ms,
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            any::<bool>(),
            any::<bool>(),
            prop_oneof![
                Just("json".to_string()),
                Just("full".to_string()),
                Just("compact".to_string()),
            ],
        )
            .prop_map(|(level, enabled, colored, format)| LoggerSettings {
                level,
                console: ConsoleSettings { enabled, colored },
                file: FileSettings {
                    format,
                    ..Default::default()
                },
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_request_config(),
            arb_retry_config(),
            arb_logger_settings(),
        )
            .prop_map(|(request, retry, logger)| Settings {
                request,
                retry,
                logger,
                ..Default::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing settings to TOML and back yields the same settings.
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }
    }

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "xview-bot");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_request_config_defaults() {
        let config = RequestConfig::default();
        assert_eq!(config.proxy_address, None);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.blur_level, 0);
        assert_eq!(config.max_blur_radius, 50.0);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_request_config_blank_proxy_is_unset() {
        let config = RequestConfig {
            proxy_address: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.proxy(), None);

        let config = RequestConfig {
            proxy_address: Some(" http://127.0.0.1:7890 ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.proxy(), Some("http://127.0.0.1:7890"));
    }

    #[test]
    fn test_request_config_accepts_proxy_alias() {
        let config: RequestConfig = toml::from_str(r#"proxy = "http://127.0.0.1:7890""#)
            .expect("alias should deserialize");
        assert_eq!(config.proxy(), Some("http://127.0.0.1:7890"));
    }

    #[test]
    fn test_site_config_profile_url() {
        let config = SiteConfig::default();
        assert_eq!(
            config.profile_url("jenny_taborda"),
            "https://secure.xview.tv/jenny_taborda/"
        );
    }

    #[test]
    fn test_site_config_profile_url_encodes_single_segment() {
        let config = SiteConfig::default();

        let url = Url::parse(&config.profile_url("a?b#c")).unwrap();
        assert_eq!(url.path(), "/a%3Fb%23c/");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        assert_eq!(
            config.profile_url("#x"),
            "https://secure.xview.tv/%23x/"
        );
        assert_eq!(
            config.profile_url("../api/public/cams"),
            "https://secure.xview.tv/..%2Fapi%2Fpublic%2Fcams/"
        );
        assert_eq!(
            config.profile_url("big show"),
            "https://secure.xview.tv/big%20show/"
        );
    }

    #[test]
    fn test_site_config_profile_url_keeps_base_path() {
        let config = SiteConfig {
            base_url: "http://127.0.0.1:8080/mirror/".to_string(),
        };
        assert_eq!(
            config.profile_url("jenny_taborda"),
            "http://127.0.0.1:8080/mirror/jenny_taborda/"
        );
    }

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.delay_ms, 2000);
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings::default();
        let config = settings.into_logger_config().expect("defaults are valid");
        assert_eq!(config.level, "info");
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
    }

    #[test]
    fn test_file_settings_invalid_format() {
        let settings = FileSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        let err = settings.into_file_config().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.file.format")
        );
    }
}
