//! The editing session: one source photo, its current adjustments, and the
//! output derived from them.
//!
//! ## States
//!
//! ```text
//!            load(ok)                 set_param / apply_preset / reset / load(ok)
//!   Empty ───────────▶ Loaded ◀──────────────────────────────────────┐
//!                        │                                           │
//!                        └───────────────────────────────────────────┘
//! ```
//!
//! Every operation that changes params recomputes the output from the
//! untouched source, so the output is always `enhance::apply(source, params)`:
//! nothing compounds across edits, and `reset` is exact.
//!
//! Failed operations leave the session exactly as it was. A failed `load`
//! keeps the previously loaded photo; `export` never changes state at all.
//!
//! ## Notifications
//!
//! Shells register listeners with [`Session::subscribe`] and redraw when the
//! output changes, instead of holding image state themselves.
//!
//! ## Threading
//!
//! All operations are synchronous and block until the pipeline finishes.
//! `Session` holds boxed listeners that are neither `Send` nor `Sync`, so it
//! cannot be shared between threads; shells dispatch into it from one thread.

use crate::config::EditorConfig;
use crate::imaging::{
    AdjustmentParams, CodecError, Dimension, EncodeParams, ExportFormat, ImageCodec, RustCodec,
    enhance, normalize, render_preview,
};
use crate::naming;
use crate::presets::Preset;
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Could not open {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Could not save {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
    #[error("No image loaded")]
    NoImage,
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

impl SessionError {
    fn decode(path: &Path, err: CodecError) -> Self {
        SessionError::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    fn encode(path: &Path, message: impl Into<String>) -> Self {
        SessionError::Encode {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

/// Where and how [`Session::export`] wrote the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub path: PathBuf,
    pub format: ExportFormat,
}

/// Called with the new output and the params that produced it.
pub type OutputListener = Box<dyn FnMut(&RgbImage, &AdjustmentParams)>;

struct Loaded {
    path: PathBuf,
    source: RgbImage,
    params: AdjustmentParams,
    output: RgbImage,
}

pub struct Session<C: ImageCodec = RustCodec> {
    codec: C,
    config: EditorConfig,
    loaded: Option<Loaded>,
    listeners: Vec<OutputListener>,
}

impl Session<RustCodec> {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_codec(RustCodec::new(), config)
    }
}

impl Default for Session<RustCodec> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<C: ImageCodec> Session<C> {
    pub fn with_codec(codec: C, config: EditorConfig) -> Self {
        Self {
            codec,
            config,
            loaded: None,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.loaded {
            Some(_) => SessionState::Loaded,
            None => SessionState::Empty,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn params(&self) -> Option<AdjustmentParams> {
        self.loaded.as_ref().map(|l| l.params)
    }

    /// The decoded, RGB-normalized photo as loaded.
    pub fn source(&self) -> Option<&RgbImage> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// The current enhanced image.
    pub fn output(&self) -> Option<&RgbImage> {
        self.loaded.as_ref().map(|l| &l.output)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// Register a listener invoked after every successful recompute.
    pub fn subscribe(&mut self, listener: impl FnMut(&RgbImage, &AdjustmentParams) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Decode `path`, normalize it to RGB, reset params to the Passport
    /// defaults and compute the output.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let decoded = self.codec.decode(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Load failed");
            SessionError::decode(path, e)
        })?;
        let source = normalize(decoded);
        if source.width() == 0 || source.height() == 0 {
            warn!(path = %path.display(), "Image has no pixels");
            return Err(SessionError::decode(
                path,
                CodecError::Decode("image has no pixels".into()),
            ));
        }

        let params = Preset::Passport.params();
        let output = enhance::apply(&source, &params);
        info!(
            path = %path.display(),
            width = source.width(),
            height = source.height(),
            "Loaded image"
        );
        self.loaded = Some(Loaded {
            path: path.to_path_buf(),
            source,
            params,
            output,
        });
        self.notify();
        Ok(())
    }

    /// Change one factor and recompute.
    pub fn set_param(&mut self, dimension: Dimension, value: f32) -> Result<(), SessionError> {
        let params = self
            .params()
            .ok_or(SessionError::NoImage)?
            .with(dimension, value);
        debug!(%dimension, value, "Set param");
        self.set_params(params)
    }

    /// Replace all four factors and recompute.
    pub fn set_params(&mut self, params: AdjustmentParams) -> Result<(), SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoImage)?;
        loaded.params = params;
        loaded.output = enhance::apply(&loaded.source, &params);
        self.notify();
        Ok(())
    }

    /// Apply a preset by name (case-insensitive).
    ///
    /// The name is checked before the session state, so an unknown name is
    /// reported as such even when nothing is loaded.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), SessionError> {
        let preset: Preset = name
            .parse()
            .map_err(|_| SessionError::UnknownPreset(name.to_string()))?;
        self.select_preset(preset)
    }

    pub fn select_preset(&mut self, preset: Preset) -> Result<(), SessionError> {
        debug!(%preset, "Applying preset");
        self.set_params(preset.params())
    }

    /// Restore the load-time defaults.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.select_preset(Preset::Passport)
    }

    /// Encode the current output to `path`, choosing the format from its
    /// extension. Overwrites an existing file.
    ///
    /// A path without an extension gets the configured export format's
    /// extension appended (`me` → `me.jpg` by default). An unrecognized
    /// extension is an `Encode` error and nothing is written.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Exported, SessionError> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoImage)?;
        let (path, format) = self.resolve_export_target(path.as_ref())?;

        let params = EncodeParams {
            output: path.clone(),
            format,
            quality: self.config.export.quality(),
        };
        self.codec.encode(&loaded.output, &params).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Export failed");
            SessionError::encode(&path, e.to_string())
        })?;
        info!(path = %path.display(), ?format, "Exported image");
        Ok(Exported { path, format })
    }

    fn resolve_export_target(
        &self,
        path: &Path,
    ) -> Result<(PathBuf, ExportFormat), SessionError> {
        let Some(ext) = path.extension() else {
            let format = self.config.export.format;
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(format.extension());
            return Ok((PathBuf::from(name), format));
        };
        match ExportFormat::from_path(path) {
            Some(format) => Ok((path.to_path_buf(), format)),
            None => Err(SessionError::encode(
                path,
                format!("unsupported output format '{}'", ext.to_string_lossy()),
            )),
        }
    }

    /// `<stem><suffix>.<ext>` next to the source, per the export config.
    pub fn suggested_export_path(&self) -> Option<PathBuf> {
        self.source_path().map(|source| {
            naming::suggested_export_path(
                source,
                &self.config.export.suffix,
                self.config.export.format,
            )
        })
    }

    /// Export to [`suggested_export_path`](Self::suggested_export_path).
    pub fn export_default(&self) -> Result<PathBuf, SessionError> {
        let path = self.suggested_export_path().ok_or(SessionError::NoImage)?;
        Ok(self.export(&path)?.path)
    }

    /// The output scaled to fit the configured preview box.
    pub fn preview(&self) -> Option<RgbImage> {
        self.output()
            .map(|output| render_preview(output, self.config.preview.bounds()))
    }

    fn notify(&mut self) {
        if let Some(loaded) = &self.loaded {
            for listener in &mut self.listeners {
                listener(&loaded.output, &loaded.params);
            }
        }
    }
}
