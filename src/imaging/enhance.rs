//! The adjustment pipeline.
//!
//! Four stages run in a fixed order, each reading the previous stage's output:
//!
//! ```text
//! brightness → contrast → saturation → sharpness
//! ```
//!
//! Every stage has the same shape. It derives a *neutral* image from its input
//! and interpolates (or extrapolates) between the two:
//!
//! ```text
//! out = neutral + factor × (in − neutral)      clamped to 0..=255, truncated
//! ```
//!
//! | Stage | Neutral image |
//! |---|---|
//! | Brightness | black |
//! | Contrast | flat gray at the mean luma of the stage input |
//! | Saturation | per-pixel luma (the desaturated image) |
//! | Sharpness | 3×3 smoothed image, borders copied unsmoothed |
//!
//! A factor of `1.0` reproduces the input exactly, so the all-ones parameter
//! set is a bit-exact identity. Rows are spread over the rayon pool; each row
//! is computed independently so output does not depend on scheduling.

use super::params::AdjustmentParams;
use image::RgbImage;
use rayon::prelude::*;

/// ITU-R 601-2 luma weights in 16.16 fixed point; they sum to `1 << 16`.
const LUMA_WEIGHTS: [u32; 3] = [19595, 38470, 7471];
const LUMA_HALF: u32 = 0x8000;

/// 3×3 smoothing kernel: centre weight, neighbour weight, divisor.
const SMOOTH_CENTER: u32 = 5;
const SMOOTH_DIVISOR: f32 = 13.0;

/// Run all four stages on `source`, returning a new image.
pub fn apply(source: &RgbImage, params: &AdjustmentParams) -> RgbImage {
    tracing::debug!(
        width = source.width(),
        height = source.height(),
        brightness = params.brightness,
        contrast = params.contrast,
        saturation = params.saturation,
        sharpness = params.sharpness,
        "Running adjustment pipeline"
    );
    let img = brightness(source, params.brightness);
    let img = contrast(&img, params.contrast);
    let img = saturation(&img, params.saturation);
    sharpness(&img, params.sharpness)
}

/// Scale toward black. `0.0` gives a black image.
pub fn brightness(image: &RgbImage, factor: f32) -> RgbImage {
    blend_toward(image, factor, |_, _, _| [0.0; 3])
}

/// Scale toward a flat gray at the image's mean luma. `0.0` gives that flat gray.
pub fn contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(image) as f32;
    blend_toward(image, factor, move |_, _, _| [mean; 3])
}

/// Scale toward the grayscale image. `0.0` fully desaturates.
pub fn saturation(image: &RgbImage, factor: f32) -> RgbImage {
    blend_toward(image, factor, |_, _, px| {
        let l = luma(px) as f32;
        [l; 3]
    })
}

/// Scale toward a smoothed copy. `0.0` gives the smoothed image, above `1.0` sharpens.
pub fn sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    blend_toward(image, factor, |x, y, px| {
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            return [px[0] as f32, px[1] as f32, px[2] as f32];
        }
        smoothed_pixel(image, x, y)
    })
}

/// Luma of one RGB pixel, rounded to the nearest integer.
pub fn luma(px: &[u8]) -> u8 {
    let weighted: u32 = px
        .iter()
        .zip(LUMA_WEIGHTS)
        .map(|(&c, w)| c as u32 * w)
        .sum();
    ((weighted + LUMA_HALF) >> 16) as u8
}

/// Mean of the per-pixel luma, rounded. Zero for an empty image.
pub fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image
        .as_raw()
        .par_chunks_exact(3)
        .map(|px| luma(px) as u64)
        .sum();
    ((sum + count / 2) / count) as u8
}

fn smoothed_pixel(image: &RgbImage, x: u32, y: u32) -> [f32; 3] {
    let mut sums = [0u32; 3];
    for dy in 0..3 {
        for dx in 0..3 {
            let weight = if dx == 1 && dy == 1 { SMOOTH_CENTER } else { 1 };
            let neighbour = image.get_pixel(x + dx - 1, y + dy - 1);
            for (sum, &c) in sums.iter_mut().zip(neighbour.0.iter()) {
                *sum += c as u32 * weight;
            }
        }
    }
    sums.map(|s| (s as f32 / SMOOTH_DIVISOR).round())
}

/// Blend and truncate toward zero, matching the 8-bit blend of the usual
/// enhance filters. Clamping first keeps extrapolated factors in range.
#[inline]
fn interpolate(neutral: f32, value: f32, factor: f32) -> u8 {
    (neutral + factor * (value - neutral)).clamp(0.0, 255.0) as u8
}

/// Apply `out = neutral + factor × (in − neutral)` to every channel.
///
/// `neutral` receives `(x, y, pixel)` and returns the neutral value for each
/// channel of that pixel.
fn blend_toward<F>(image: &RgbImage, factor: f32, neutral: F) -> RgbImage
where
    F: Fn(u32, u32, &[u8]) -> [f32; 3] + Sync,
{
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    let stride = width as usize * 3;
    if stride == 0 || height == 0 {
        return out;
    }

    let dst: &mut [u8] = &mut out;
    dst.par_chunks_mut(stride)
        .zip(image.as_raw().par_chunks(stride))
        .enumerate()
        .for_each(|(y, (dst_row, src_row))| {
            for (x, (dst_px, src_px)) in dst_row
                .chunks_exact_mut(3)
                .zip(src_row.chunks_exact(3))
                .enumerate()
            {
                let n = neutral(x as u32, y as u32, src_px);
                for c in 0..3 {
                    dst_px[c] = interpolate(n[c], src_px[c] as f32, factor);
                }
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_image, solid_image};
    use image::Rgb;

    #[test]
    fn identity_params_reproduce_source() {
        let src = gradient_image(37, 23);
        let out = apply(&src, &AdjustmentParams::identity());
        assert_eq!(out, src);
    }

    #[test]
    fn each_stage_is_identity_at_one() {
        let src = gradient_image(16, 9);
        assert_eq!(brightness(&src, 1.0), src);
        assert_eq!(contrast(&src, 1.0), src);
        assert_eq!(saturation(&src, 1.0), src);
        assert_eq!(sharpness(&src, 1.0), src);
    }

    #[test]
    fn output_keeps_dimensions() {
        for (w, h) in [(1, 1), (2, 5), (3, 3), (64, 31)] {
            let src = gradient_image(w, h);
            for params in [
                AdjustmentParams::default(),
                AdjustmentParams::new(0.5, 2.0, 0.5, 2.0),
                AdjustmentParams::new(3.0, 0.1, 4.0, 0.0),
            ] {
                let out = apply(&src, &params);
                assert_eq!(out.dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn brightness_zero_is_black() {
        let out = brightness(&gradient_image(8, 8), 0.0);
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn brightness_scales_and_clamps() {
        let src = RgbImage::from_pixel(2, 2, Rgb([100, 200, 10]));
        let out = brightness(&src, 2.0);
        assert_eq!(out.get_pixel(0, 0).0, [200, 255, 20]);
    }

    #[test]
    fn contrast_zero_flattens_to_mean_luma() {
        let src = gradient_image(10, 10);
        let mean = mean_luma(&src);
        let out = contrast(&src, 0.0);
        assert!(out.pixels().all(|p| p.0 == [mean; 3]));
    }

    #[test]
    fn contrast_pushes_away_from_mean() {
        let mut src = RgbImage::from_pixel(2, 1, Rgb([100, 100, 100]));
        src.put_pixel(1, 0, Rgb([200, 200, 200]));
        // mean luma 150: 100 → 50, 200 → 250
        let out = contrast(&src, 2.0);
        assert_eq!(out.get_pixel(0, 0).0, [50, 50, 50]);
        assert_eq!(out.get_pixel(1, 0).0, [250, 250, 250]);
    }

    #[test]
    fn saturation_zero_is_grayscale() {
        let out = saturation(&gradient_image(12, 7), 0.0);
        assert!(out.pixels().all(|p| p.0[0] == p.0[1] && p.0[1] == p.0[2]));
    }

    #[test]
    fn saturation_is_noop_on_gray() {
        let src = solid_image(5, 5, [90, 90, 90]);
        assert_eq!(saturation(&src, 1.8), src);
    }

    #[test]
    fn sharpness_zero_smooths_interior_only() {
        let mut src = solid_image(5, 5, [0, 0, 0]);
        src.put_pixel(2, 2, Rgb([130, 130, 130]));
        src.put_pixel(0, 0, Rgb([255, 255, 255]));
        let out = sharpness(&src, 0.0);
        // centre: 130 × 5 / 13 = 50
        assert_eq!(out.get_pixel(2, 2).0, [50, 50, 50]);
        // neighbour of the centre: 130 / 13 = 10
        assert_eq!(out.get_pixel(3, 3).0, [10, 10, 10]);
        // borders are copied
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn sharpness_on_tiny_images_is_noop() {
        let src = gradient_image(2, 2);
        assert_eq!(sharpness(&src, 0.0), src);
        assert_eq!(sharpness(&src, 2.0), src);
    }

    #[test]
    fn flat_gray_with_passport_defaults_gets_brighter() {
        let src = solid_image(100, 100, [128, 128, 128]);
        let out = apply(&src, &AdjustmentParams::default());
        assert_eq!(out.dimensions(), (100, 100));
        // brightness 1.2 → 153.6 → 153; the later stages are no-ops on a flat image
        assert!(out.pixels().all(|p| p.0 == [153, 153, 153]));
    }

    #[test]
    fn blend_truncates_fractional_results() {
        let src = solid_image(3, 3, [128, 201, 7]);
        // 153.6 → 153, 100.5 → 100, 8.4 → 8
        assert_eq!(brightness(&src, 1.2).get_pixel(1, 1).0, [153, 241, 8]);
        assert_eq!(brightness(&src, 0.5).get_pixel(1, 1).0, [64, 100, 3]);
    }

    #[test]
    fn extrapolated_blend_clamps_before_truncating() {
        let mut src = RgbImage::from_pixel(2, 1, Rgb([10, 10, 10]));
        src.put_pixel(1, 0, Rgb([250, 250, 250]));
        // mean luma 130: 10 → 130 - 2.5 × 120 < 0, 250 → 130 + 2.5 × 120 > 255
        let out = contrast(&src, 2.5);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn stages_run_in_fixed_order() {
        let src = gradient_image(20, 20);
        let params = AdjustmentParams::new(1.3, 1.2, 1.05, 1.15);
        let manual = sharpness(
            &saturation(&contrast(&brightness(&src, 1.3), 1.2), 1.05),
            1.15,
        );
        assert_eq!(apply(&src, &params), manual);
    }

    #[test]
    fn luma_uses_601_weights() {
        assert_eq!(luma(&[255, 255, 255]), 255);
        assert_eq!(luma(&[0, 0, 0]), 0);
        assert_eq!(luma(&[255, 0, 0]), 76);
        assert_eq!(luma(&[0, 255, 0]), 150);
        assert_eq!(luma(&[0, 0, 255]), 29);
        assert_eq!(luma(&[128, 128, 128]), 128);
        assert_eq!(luma(&[200, 100, 50]), 124);
    }

    #[test]
    fn mean_luma_of_empty_image_is_zero() {
        assert_eq!(mean_luma(&RgbImage::new(0, 0)), 0);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let src = gradient_image(120, 80);
        let params = AdjustmentParams::new(1.5, 1.25, 1.2, 1.2);
        assert_eq!(apply(&src, &params), apply(&src, &params));
    }
}
