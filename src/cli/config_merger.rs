//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::Cli;
use crate::config::{ConfigError, ConfigLoader, Settings};

/// Applies CLI flag overrides on top of file and environment configuration.
///
/// CLI flags have the highest priority; everything else comes from the
/// [`ConfigLoader`] layers.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration selected by `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = match &cli.config {
            Some(path) => ConfigLoader::with_config_file(path),
            None => ConfigLoader::new()?,
        };

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Return the base configuration with CLI overrides applied and validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(proxy) = &cli.proxy {
            // an explicit empty value switches a configured proxy off
            config.request.proxy_address = (!proxy.is_empty()).then(|| proxy.clone());
        }

        if let Some(timeout) = cli.timeout {
            config.request.timeout_seconds = timeout;
        }

        if let Some(level) = cli.blur_level {
            config.request.blur_level = level;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
