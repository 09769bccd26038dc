use thiserror::Error;

use crate::external::FetchError;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Thumbnail download failed: {0}")]
    DownloadFailed(#[from] FetchError),

    #[error("Failed to decode thumbnail: {0}")]
    DecodeFailed(#[source] image::ImageError),

    #[error("Failed to encode thumbnail: {0}")]
    EncodeFailed(#[source] image::ImageError),

    #[error("Thumbnail worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
