use thiserror::Error;

/// The page was fetched but does not look like a profile or listing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed response: {reason}")]
    Malformed { reason: String },
}

impl ParseError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
