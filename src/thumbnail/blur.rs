//! Gaussian blur with pixelation at high levels

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use super::error::ThumbnailError;

/// Highest accepted blur level
pub const MAX_BLUR_LEVEL: u8 = 100;

/// Levels above this add pixelation on top of the blur
pub const PIXELATE_ABOVE: u8 = 50;

pub const JPEG_QUALITY: u8 = 85;

/// Filter parameters derived from a blur level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurParams {
    /// Gaussian sigma, 0 means no blur
    pub sigma: f32,
    /// Pixelation factor, 0 means no pixelation
    pub pixelate: u32,
}

/// Map `level` (clamped to 0..=100) onto filter parameters.
///
/// Sigma grows linearly up to `max_radius` at level 100. Above level 50 the
/// image is also pixelated with factor `max(1, (level - 50) / 10)`. Neither
/// value ever decreases as the level rises.
pub fn blur_params(level: u8, max_radius: f32) -> BlurParams {
    let level = level.min(MAX_BLUR_LEVEL);
    let max_radius = if max_radius.is_finite() { max_radius.max(0.0) } else { 0.0 };

    let pixelate = if level > PIXELATE_ABOVE {
        (u32::from(level - PIXELATE_ABOVE) / 10).max(1)
    } else {
        0
    };

    BlurParams {
        sigma: f32::from(level) / f32::from(MAX_BLUR_LEVEL) * max_radius,
        pixelate,
    }
}

pub fn apply(image: &DynamicImage, params: BlurParams) -> DynamicImage {
    let mut output = if params.sigma > 0.0 {
        image.blur(params.sigma)
    } else {
        image.clone()
    };

    if params.pixelate > 0 {
        let (width, height) = (output.width(), output.height());
        let divisor = params.pixelate * 2;
        let small = output.resize_exact(
            (width / divisor).max(1),
            (height / divisor).max(1),
            FilterType::Nearest,
        );
        output = small.resize_exact(width, height, FilterType::Nearest);
    }

    output
}

pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, ThumbnailError> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder
        .encode_image(&image.to_rgb8())
        .map_err(ThumbnailError::EncodeFailed)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};
    use proptest::prelude::*;

    #[test]
    fn test_blur_params_levels() {
        assert_eq!(blur_params(0, 50.0), BlurParams { sigma: 0.0, pixelate: 0 });
        assert_eq!(blur_params(50, 50.0), BlurParams { sigma: 25.0, pixelate: 0 });
        assert_eq!(blur_params(55, 50.0).pixelate, 1);
        assert_eq!(blur_params(70, 50.0).pixelate, 2);
        assert_eq!(blur_params(100, 50.0), BlurParams { sigma: 50.0, pixelate: 5 });
    }

    #[test]
    fn test_blur_params_clamps_inputs() {
        assert_eq!(blur_params(250, 10.0), blur_params(100, 10.0));
        assert_eq!(blur_params(40, f32::NAN).sigma, 0.0);
        assert_eq!(blur_params(40, -3.0).sigma, 0.0);
    }

    #[test]
    fn test_apply_keeps_dimensions() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(20, 12, |x, y| {
            Rgb([(x * 12) as u8, (y * 20) as u8, 128])
        }));

        for level in [10, 60, 100] {
            let output = apply(&image, blur_params(level, 8.0));
            assert_eq!(output.dimensions(), (20, 12));
        }
    }

    #[test]
    fn test_pixelation_flattens_blocks() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, _| {
            if x % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        }));
        let output = apply(&image, BlurParams { sigma: 0.0, pixelate: 1 }).to_rgb8();

        // 8 -> 4 -> 8 with nearest sampling repeats every pixel twice
        assert_eq!(output.get_pixel(0, 0), output.get_pixel(1, 0));
        assert_eq!(output.get_pixel(2, 3), output.get_pixel(3, 3));
    }

    proptest! {
        #[test]
        fn prop_blur_params_monotonic(a in 0u8..=100, b in 0u8..=100, radius in 0.0f32..100.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low = blur_params(low, radius);
            let high = blur_params(high, radius);
            prop_assert!(low.sigma <= high.sigma);
            prop_assert!(low.pixelate <= high.pixelate);
        }
    }
}
