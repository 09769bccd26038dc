use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::AppError;

/// Site username addressing a profile page.
///
/// Accepts a bare name (`jenny_taborda`) or a profile URL
/// (`https://secure.xview.tv/jenny_taborda/`), which is reduced to its
/// first path segment. Bare `.` and `..` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamIdentifier(String);

impl StreamIdentifier {
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("identifier", "must not be empty"));
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::from_profile_url(trimmed);
        }

        if matches!(trimmed, "." | "..") {
            return Err(AppError::validation("identifier", "not a profile name"));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn from_profile_url(input: &str) -> Result<Self, AppError> {
        let url = Url::parse(input)
            .map_err(|e| AppError::validation("identifier", format!("invalid URL: {}", e)))?;

        url.path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(|name| Self(name.to_string()))
            .ok_or_else(|| AppError::validation("identifier", "URL has no profile name"))
    }

    /// Identifier taken verbatim from a listing page
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StreamIdentifier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StreamIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
