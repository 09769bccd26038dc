//! Chat replies assembled from lookup results.
//!
//! A reply is plain text plus at most one attached image. Formatting never
//! fails; every error kind has its own short message.

mod formatter;

pub use formatter::{
    MAX_SEARCH_SHOWN, format, format_error, format_link, format_search, format_thumbnail_caption,
};

use crate::thumbnail::ProcessedThumbnail;

/// Image attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyImage {
    pub bytes: Vec<u8>,
    /// MIME type such as `image/jpeg`
    pub mime_type: &'static str,
    /// File extension without the dot
    pub extension: &'static str,
}

impl From<ProcessedThumbnail> for ReplyImage {
    fn from(thumbnail: ProcessedThumbnail) -> Self {
        Self {
            mime_type: thumbnail.mime_type(),
            extension: thumbnail.extension(),
            bytes: thumbnail.bytes,
        }
    }
}

/// Message handed back to the chat host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPayload {
    pub text: String,
    pub image: Option<ReplyImage>,
}

impl ReplyPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<ReplyImage>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
