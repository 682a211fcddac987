//! Shared test utilities for the passport-photo test suite.
//!
//! Synthetic images with known pixel values, and helpers that write them to
//! disk for codec tests.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("me.jpg");
//! write_test_jpeg(&path, 64, 48);
//!
//! let gray = solid_image(10, 10, [128, 128, 128]);
//! ```

use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

/// Every pixel set to `rgb`.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Deterministic image where all three channels vary with position, so
/// every enhancement stage has something to act on.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            (((x + y) * 37) % 256) as u8,
        ])
    })
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write a gradient JPEG of the given size. Panics on failure.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    gradient_image(width, height)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

/// Write a gradient PNG of the given size. Panics on failure.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    gradient_image(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
