//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size at which an image fits inside a bounding box.
///
/// Aspect ratio is preserved and images are never enlarged: a source that
/// already fits is returned unchanged. Each side is at least one pixel, so
/// extreme panoramas still produce a drawable preview.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum preview dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Preview dimensions, each `<=` the matching bound
///
/// # Examples
/// ```
/// # use passport_photo::imaging::calculate_fit_dimensions;
/// // Landscape limited by width: 1000x750 in 500x600 → 500x375
/// assert_eq!(calculate_fit_dimensions((1000, 750), (500, 600)), (500, 375));
///
/// // Small images are left alone
/// assert_eq!(calculate_fit_dimensions((320, 240), (500, 600)), (320, 240));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_landscape_limited_by_width() {
        // 1000x750 → scale 0.5 → 500x375
        assert_eq!(calculate_fit_dimensions((1000, 750), (500, 600)), (500, 375));
    }

    #[test]
    fn fit_portrait_limited_by_height() {
        // 600x1200 → min(500/600, 600/1200) = 0.5 → 300x600
        assert_eq!(calculate_fit_dimensions((600, 1200), (500, 600)), (300, 600));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(calculate_fit_dimensions((100, 100), (500, 600)), (100, 100));
    }

    #[test]
    fn fit_exact_bounds_unchanged() {
        assert_eq!(calculate_fit_dimensions((500, 600), (500, 600)), (500, 600));
    }

    #[test]
    fn fit_one_side_over_bound() {
        // 400x900 → 600/900 → 267x600
        assert_eq!(calculate_fit_dimensions((400, 900), (500, 600)), (267, 600));
    }

    #[test]
    fn fit_extreme_panorama_keeps_one_pixel() {
        // 10000x10 → scale 0.05 → 500x0.5, floored at 1
        assert_eq!(calculate_fit_dimensions((10000, 10), (500, 600)), (500, 1));
    }

    #[test]
    fn fit_zero_sized_source_passes_through() {
        assert_eq!(calculate_fit_dimensions((0, 10), (500, 600)), (0, 10));
    }
}
