//! # Passport Photo
//!
//! Tonal enhancement for ID photos: load a portrait, brighten and clean it up
//! with four Pillow-style enhancement factors, and save the result.
//!
//! # Architecture: Session Over a Pure Pipeline
//!
//! ```text
//! load(path) ─▶ decode ─▶ normalize to RGB ─▶ source
//!                                               │
//!                       params ──▶ enhance::apply(source, params) ─▶ output ─▶ export(path)
//!                                                                     │
//!                                                                     └─▶ preview / listeners
//! ```
//!
//! - The **pipeline** ([`imaging::enhance`]) is a pure function from source and
//!   params to output. It never mutates its input and is deterministic.
//! - The **session** ([`session::Session`]) owns the source, the current params
//!   and the current output, and recomputes from the source on every change.
//! - The **shell** (the `passport-photo` binary) only forwards user intent to
//!   the session and prints results.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Editing state machine: load, adjust, preset, reset, export, preview |
//! | [`imaging`] | Pure-Rust image operations: decode, normalize, enhance, resize, encode |
//! | [`presets`] | Named parameter sets (Passport, Visa, Bright, Neutral) |
//! | [`config`] | `config.toml` loading, validation and merging over stock defaults |
//! | [`naming`] | Suggested export file names (`me.png` → `me_whitened.jpg`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Recompute From Source
//!
//! Every adjustment re-runs the whole pipeline on the untouched source rather
//! than adjusting the previous output. Repeated slider moves never accumulate
//! rounding error, and `reset` restores the load-time output bit for bit.
//!
//! ## Fixed Stage Order
//!
//! Brightness, then contrast, then saturation, then sharpness. The stages do
//! not commute (contrast pivots on the mean luma of what brightness produced),
//! so the order is part of the output contract.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, encoding and resampling use the `image` crate; the enhancement
//! stages are implemented here and parallelized per row with `rayon`. The
//! binary has no system image-library dependencies.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod presets;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
