//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`session`](crate::session) (which decides what to
//! produce) and the [`codec`](super::codec) and [`enhance`](super::enhance)
//! modules (which do the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`AdjustmentParams`] — The four enhancement factors fed to the pipeline.
//! - [`Dimension`] — Names one of the four factors, for single-slider updates.
//! - [`ExportFormat`] — Output container, normally inferred from a file extension.
//! - [`EncodeParams`] — Full specification for an export: output path, format, quality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Lowest value a shell slider offers for any factor.
pub const SLIDER_MIN: f32 = 0.5;
/// Highest value a shell slider offers for any factor.
pub const SLIDER_MAX: f32 = 2.0;
/// Slider resolution.
pub const SLIDER_STEP: f32 = 0.05;

/// Whether `value` is reachable with a shell slider. Factors outside the
/// range are still valid pipeline input.
pub fn in_slider_range(value: f32) -> bool {
    (SLIDER_MIN..=SLIDER_MAX).contains(&value)
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// The four enhancement factors.
///
/// Each is a multiplier where `1.0` leaves that aspect of the image unchanged,
/// values below `1.0` pull toward the stage's neutral image and values above
/// extrapolate away from it. No range check is applied here: shells constrain
/// input to [`SLIDER_MIN`]..=[`SLIDER_MAX`], the pipeline takes whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParams {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub sharpness: f32,
}

impl AdjustmentParams {
    pub const fn new(brightness: f32, contrast: f32, saturation: f32, sharpness: f32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
            sharpness,
        }
    }

    /// All factors at `1.0`.
    pub const fn identity() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    pub fn get(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::Brightness => self.brightness,
            Dimension::Contrast => self.contrast,
            Dimension::Saturation => self.saturation,
            Dimension::Sharpness => self.sharpness,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f32) {
        match dimension {
            Dimension::Brightness => self.brightness = value,
            Dimension::Contrast => self.contrast = value,
            Dimension::Saturation => self.saturation = value,
            Dimension::Sharpness => self.sharpness = value,
        }
    }

    /// Copy with one factor replaced.
    pub fn with(mut self, dimension: Dimension, value: f32) -> Self {
        self.set(dimension, value);
        self
    }
}

impl Default for AdjustmentParams {
    /// The passport defaults applied on load and on reset.
    fn default() -> Self {
        Self::new(1.2, 1.15, 1.1, 1.1)
    }
}

/// One of the four adjustable factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Brightness,
    Contrast,
    Saturation,
    Sharpness,
}

impl Dimension {
    /// Pipeline order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Brightness,
        Dimension::Contrast,
        Dimension::Saturation,
        Dimension::Sharpness,
    ];

    /// Human-readable slider label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Brightness => "Brightness",
            Dimension::Contrast => "Contrast",
            Dimension::Saturation => "Saturation",
            Dimension::Sharpness => "Sharpness",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a dimension or preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub name: String,
}

impl FromStr for Dimension {
    type Err = ParseError;

    /// Case-insensitive; `color` is accepted as an alias for saturation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brightness" => Ok(Dimension::Brightness),
            "contrast" => Ok(Dimension::Contrast),
            "saturation" | "color" => Ok(Dimension::Saturation),
            "sharpness" => Ok(Dimension::Sharpness),
            _ => Err(ParseError {
                kind: "dimension",
                name: s.to_string(),
            }),
        }
    }
}

/// Output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
    Bmp,
}

impl ExportFormat {
    /// Infer the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "png" => Some(ExportFormat::Png),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }

    /// Canonical extension used for suggested file names.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
            ExportFormat::Bmp => "bmp",
        })
    }
}

/// Parameters for writing an image to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub format: ExportFormat,
    /// Only meaningful for JPEG.
    pub quality: Quality,
}
