//! Messenger error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for messenger operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures from the text, framing, peer and config layers.
#[derive(Error, Debug)]
pub enum Error {
    /// The cipher core refused the key or ciphertext.
    #[error(transparent)]
    Cipher(#[from] aes_core::Error),

    /// Socket or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Payload does not fit behind a one-byte length prefix.
    #[error("payload is {len} bytes, a frame carries at most 255")]
    FrameTooLarge {
        /// Length of the rejected payload.
        len: usize,
    },

    /// A config file could not be parsed.
    #[error("invalid config {path}: {source}")]
    Config {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Cipher name not recognised.
    #[error("unknown cipher `{0}` (expected `none` or `aes128`)")]
    UnknownCipher(String),
}
