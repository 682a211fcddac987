//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait is the session's only route to the filesystem:
//! decode a file into an image, and encode an image into a file.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec), built on the `image` crate's
//! pure-Rust decoders and encoders.

use super::params::EncodeParams;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for image codecs.
///
/// Decoding returns the image in whatever color model the file uses;
/// normalizing to RGB is the caller's job (see
/// [`normalize`](super::operations::normalize)) so it happens exactly once,
/// at load time.
pub trait ImageCodec {
    /// Read and decode the image at `path`.
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError>;

    /// Encode `image` and write it to `params.output`.
    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), CodecError>;
}
