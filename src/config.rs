//! Editor configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional user file in the config directory (the current
//! directory unless `--config-dir` says otherwise).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! quality = 95              # JPEG quality (1-100)
//! format = "jpeg"           # Format for suggested file names: jpeg | png | bmp
//! suffix = "_whitened"      # Appended to the source stem for suggested names
//!
//! [preview]
//! max_width = 500           # Preview bounding box
//! max_height = 600
//!
//! [processing]
//! max_processes = 4         # Max pipeline workers (omit for auto = CPU cores)
//! ```
//!
//! The enhancement defaults themselves are not configurable: load and reset
//! always use the Passport preset.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{ExportFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Export settings (quality, default format, file name suffix).
    pub export: ExportConfig,
    /// Preview bounding box.
    pub preview: PreviewConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.export.quality) {
            return Err(ConfigError::Validation(
                "export.quality must be 1-100".into(),
            ));
        }
        if self.export.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "export.suffix must not be empty".into(),
            ));
        }
        if self.export.suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "export.suffix must not contain path separators".into(),
            ));
        }
        if self.preview.max_width == 0 || self.preview.max_height == 0 {
            return Err(ConfigError::Validation(
                "preview.max_width and preview.max_height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// JPEG encoding quality (1 = worst, 100 = best). Ignored for PNG and BMP.
    pub quality: u32,
    /// Format used when suggesting an export file name.
    pub format: ExportFormat,
    /// Text inserted between the source stem and the extension.
    pub suffix: String,
}

impl ExportConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
            format: ExportFormat::Jpeg,
            suffix: "_whitened".to_string(),
        }
    }
}

/// Preview bounding box. Output images are scaled down to fit, never up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl PreviewConfig {
    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: 500,
            max_height: 600,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of rayon workers the pipeline may use.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(EditorConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EditorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<EditorConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %dir.display(), ?config, "Loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Passport Photo Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# JPEG encoding quality (1 = worst, 100 = best). PNG and BMP are lossless.
quality = 95

# Format used for the suggested output name: "jpeg", "png" or "bmp".
# An explicit output path always wins: its extension picks the format.
format = "jpeg"

# Inserted between the source file stem and the extension:
# me.png -> me_whitened.jpg
suffix = "_whitened"

# ---------------------------------------------------------------------------
# Preview
# ---------------------------------------------------------------------------
[preview]
# The preview is scaled down to fit this box, preserving aspect ratio.
max_width = 500
max_height = 600

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for the enhancement pipeline.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
