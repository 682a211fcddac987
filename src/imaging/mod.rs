//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, BMP, GIF) |
//! | **Normalize** | `DynamicImage::into_rgb8` |
//! | **Enhance** | brightness → contrast → saturation → sharpness, rayon over rows |
//! | **Preview** | fit-to-box + Lanczos3 |
//! | **Encode** | JPEG (quality 95 by default), PNG, BMP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing adjustments and exports
//! - **Enhance**: The adjustment pipeline
//! - **Codec**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: Normalization and preview rendering

mod calculations;
pub mod codec;
pub mod enhance;
pub mod operations;
mod params;
pub mod rust_codec;

pub use calculations::calculate_fit_dimensions;
pub use codec::{CodecError, ImageCodec};
pub use enhance::apply;
pub use operations::{normalize, render_preview};
pub use params::{
    AdjustmentParams, Dimension, EncodeParams, ExportFormat, ParseError, Quality, SLIDER_MAX,
    SLIDER_MIN, SLIDER_STEP, in_slider_range,
};
pub use rust_codec::{RustCodec, supported_input_extensions};
