//! Error types for the narrow, explicit failure surface of this crate.
//!
//! Every runtime CPU/Bus operation is infallible by design (see the crate
//! root docs); the only fallible operation is loading a ROM image.

use thiserror::Error;

/// Failure modes for loading a ROM image into a [`crate::bus::Bus`].
#[derive(Debug, Error)]
pub enum RomLoadError {
    #[error("ROM image not found: {0}")]
    NotFound(String),

    #[error("ROM image too large: {size} bytes exceeds {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("failed to read ROM image: {0}")]
    IoFailed(#[from] std::io::Error),
}
