//! Pure Rust codec built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, GIF) | `image::ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless, quality ignored) |
//! | Encode → BMP | `image::codecs::bmp::BmpEncoder` |

use super::codec::{CodecError, ImageCodec};
use super::params::{EncodeParams, ExportFormat};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions offered to the file picker, paired with the decoder they need.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn write_encoded<W: Write>(
    writer: W,
    image: &RgbImage,
    params: &EncodeParams,
) -> Result<(), image::ImageError> {
    let (width, height) = image.dimensions();
    match params.format {
        ExportFormat::Jpeg => {
            // Quality is clamped to 1..=100 on construction, so it fits a u8.
            let quality = params.quality.value() as u8;
            JpegEncoder::new_with_quality(writer, quality).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Png => PngEncoder::new(writer).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        ExportFormat::Bmp => {
            let mut writer = writer;
            BmpEncoder::new(&mut writer).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| CodecError::Decode(format!("Failed to decode {}: {}", path.display(), e)))
    }

    /// Encodes fully in memory before touching the target, so a failed
    /// encode leaves any existing file as it was.
    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), CodecError> {
        let mut buffer = Vec::new();
        write_encoded(&mut buffer, image, params).map_err(|e| {
            CodecError::Encode(format!(
                "Failed to write {}: {}",
                params.output.display(),
                e
            ))
        })?;
        std::fs::write(&params.output, &buffer)?;
        Ok(())
    }
}
