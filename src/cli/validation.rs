//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

use crate::config::validation::validate_proxy;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate a proxy URL; an empty value is kept and means "no proxy"
pub fn validate_proxy_url(proxy_str: &str) -> Result<String, String> {
    let proxy = proxy_str.trim();
    if proxy.is_empty() {
        return Ok(String::new());
    }

    validate_proxy(proxy).map_err(|e| e.to_string())?;
    Ok(proxy.to_string())
}

/// Validate the request timeout is a positive number of seconds
pub fn validate_timeout(timeout_str: &str) -> Result<u64, String> {
    let timeout: u64 = timeout_str.trim().parse().map_err(|_| {
        format!("Timeout must be a positive number of seconds, got: '{}'", timeout_str)
    })?;

    if timeout == 0 {
        return Err("Timeout must be greater than 0".to_string());
    }

    Ok(timeout)
}

/// Validate blur level is within 0-100
pub fn validate_blur_level(level_str: &str) -> Result<u8, String> {
    let level: u8 = level_str
        .trim()
        .parse()
        .map_err(|_| format!("Blur level must be a number between 0 and 100, got: '{}'", level_str))?;

    if level > 100 {
        return Err(format!("Blur level must be between 0 and 100, got: {}", level));
    }

    Ok(level)
}
