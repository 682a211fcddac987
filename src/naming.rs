//! Export filename suggestions.
//!
//! A saved photo is named after its source with a suffix inserted before the
//! extension, so the original is never overwritten by accident:
//!
//! - `photos/me.png` → `me_whitened.jpg` (default format JPEG)
//! - `IMG_0042.JPG` → `IMG_0042_whitened.jpg`
//! - `scan.final.bmp` → `scan.final_whitened.jpg` (only the last extension is replaced)
//!
//! The suffix and default format come from [`ExportConfig`](crate::config::ExportConfig).

use crate::imaging::ExportFormat;
use std::path::{Path, PathBuf};

/// Stem used when the source path has no usable file name.
const FALLBACK_STEM: &str = "image";

/// Build `<stem><suffix>.<ext>` from a source path.
pub fn suggested_export_name(source: &Path, suffix: &str, format: ExportFormat) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM.into());
    format!("{}{}.{}", stem, suffix, format.extension())
}

/// The suggested name placed next to the source file.
pub fn suggested_export_path(source: &Path, suffix: &str, format: ExportFormat) -> PathBuf {
    let name = suggested_export_name(source, suffix, format);
    match source.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
