//! Thumbnail download and blur post-processing

pub mod blur;
mod error;

use image::ImageFormat;

use crate::config::RequestConfig;
use crate::external::Fetch;

pub use blur::{BlurParams, blur_params};
pub use error::ThumbnailError;

/// Image bytes ready to attach to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedThumbnail {
    pub bytes: Vec<u8>,
    /// Blur level that was applied, 0 for the untouched download
    pub blur_level: u8,
    pub format: ImageFormat,
}

impl ProcessedThumbnail {
    /// Preferred file extension of [`Self::format`]
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Download `thumbnail_url` and blur it at `config.blur_level`.
///
/// Decoding and blurring run on the blocking pool.
#[tracing::instrument(skip(fetcher, config), fields(blur_level = config.blur_level))]
pub async fn process(
    fetcher: &dyn Fetch,
    thumbnail_url: &str,
    config: &RequestConfig,
) -> Result<ProcessedThumbnail, ThumbnailError> {
    let downloaded = fetcher.fetch(thumbnail_url).await?;
    tracing::debug!(bytes = downloaded.body.len(), "Thumbnail downloaded");

    let (level, max_radius) = (config.blur_level, config.max_blur_radius);
    let processed =
        tokio::task::spawn_blocking(move || render(downloaded.body, level, max_radius)).await??;

    tracing::debug!(
        bytes = processed.bytes.len(),
        format = processed.mime_type(),
        "Thumbnail processed"
    );
    Ok(processed)
}

/// Decode `bytes` and apply the blur for `level`.
///
/// Level 0 hands back the input bytes unchanged once they decode. Any other
/// level re-encodes as JPEG. The output depends only on the arguments.
pub fn render(
    bytes: Vec<u8>,
    level: u8,
    max_radius: f32,
) -> Result<ProcessedThumbnail, ThumbnailError> {
    let format = image::guess_format(&bytes).map_err(ThumbnailError::DecodeFailed)?;
    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(ThumbnailError::DecodeFailed)?;

    if level == 0 {
        return Ok(ProcessedThumbnail {
            bytes,
            blur_level: 0,
            format,
        });
    }

    let params = blur_params(level, max_radius);
    let blurred = blur::apply(&decoded, params);

    Ok(ProcessedThumbnail {
        bytes: blur::encode_jpeg(&blurred)?,
        blur_level: level.min(blur::MAX_BLUR_LEVEL),
        format: ImageFormat::Jpeg,
    })
}
