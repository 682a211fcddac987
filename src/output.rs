//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Presets
//!
//! ```text
//! Presets
//!     Passport    brightness 1.20x  contrast 1.15x  saturation 1.10x  sharpness 1.10x
//!     Visa        brightness 1.30x  contrast 1.20x  saturation 1.05x  sharpness 1.15x
//!     ...
//! Sliders 0.50x to 2.00x in steps of 0.05x
//! ```
//!
//! ## Apply
//!
//! ```text
//! me.jpg (1200x1600)
//!     Brightness: 1.20x
//!     Contrast: 1.15x
//!     Saturation: 1.10x
//!     Sharpness: 1.10x
//! Saved me_whitened.jpg (jpeg)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::imaging::{
    AdjustmentParams, Dimension, ExportFormat, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP,
};
use crate::presets::Preset;
use std::path::Path;

/// Width of the preset name column in the presets table.
const NAME_WIDTH: usize = 12;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Slider readout for an enhancement factor, two decimals and an `x`.
///
/// ```
/// assert_eq!(passport_photo::output::format_factor(1.2), "1.20x");
/// ```
pub fn format_factor(value: f32) -> String {
    format!("{value:.2}x")
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Presets
// ============================================================================

/// One row per preset, in display order, then the slider range.
pub fn format_presets() -> Vec<String> {
    let mut lines = vec!["Presets".to_string()];
    for preset in Preset::ALL {
        let params = preset.params();
        let factors: Vec<String> = Dimension::ALL
            .iter()
            .map(|&d| {
                format!(
                    "{} {}",
                    d.label().to_ascii_lowercase(),
                    format_factor(params.get(d))
                )
            })
            .collect();
        lines.push(format!(
            "{}{:<width$}{}",
            indent(1),
            preset.name(),
            factors.join("  "),
            width = NAME_WIDTH
        ));
    }
    lines.push(format_slider_range());
    lines
}

pub fn format_slider_range() -> String {
    format!(
        "Sliders {} to {} in steps of {}",
        format_factor(SLIDER_MIN),
        format_factor(SLIDER_MAX),
        format_factor(SLIDER_STEP)
    )
}

pub fn print_presets() {
    for line in format_presets() {
        println!("{}", line);
    }
}

// ============================================================================
// Apply
// ============================================================================

/// Source header plus one labelled line per factor.
pub fn format_session_summary(
    source: &Path,
    dimensions: (u32, u32),
    params: &AdjustmentParams,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({}x{})",
        file_label(source),
        dimensions.0,
        dimensions.1
    )];
    for dimension in Dimension::ALL {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            dimension.label(),
            format_factor(params.get(dimension))
        ));
    }
    lines
}

pub fn print_session_summary(source: &Path, dimensions: (u32, u32), params: &AdjustmentParams) {
    for line in format_session_summary(source, dimensions, params) {
        println!("{}", line);
    }
}

pub fn format_export_line(output: &Path, format: ExportFormat) -> String {
    format!("Saved {} ({})", output.display(), format)
}

pub fn format_preview_line(output: &Path, dimensions: (u32, u32)) -> String {
    format!(
        "Preview {} ({}x{})",
        output.display(),
        dimensions.0,
        dimensions.1
    )
}

// ============================================================================
// Tests
// ============================================================================
