//! High-level image operations.
//!
//! These functions combine calculations with pixel work: color normalization at
//! load time and fit-to-box preview rendering.

use super::calculations::calculate_fit_dimensions;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Convert any decoded image to 8-bit, three-channel RGB.
///
/// Alpha is dropped without compositing, palette and grayscale images are
/// expanded, and 16-bit or float samples are scaled down to 8 bits. An image
/// that is already `Rgb8` is moved through without copying.
pub fn normalize(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            tracing::debug!(color = ?other.color(), "Normalizing to RGB8");
            other.into_rgb8()
        }
    }
}

/// Scale `image` to fit inside `bounds`, preserving aspect ratio.
///
/// Images that already fit are returned as a copy at their original size.
pub fn render_preview(image: &RgbImage, bounds: (u32, u32)) -> RgbImage {
    let (w, h) = calculate_fit_dimensions(image.dimensions(), bounds);
    if (w, h) == image.dimensions() {
        return image.clone();
    }
    image::imageops::resize(image, w, h, FilterType::Lanczos3)
}
