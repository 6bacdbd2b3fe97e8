//! Error type for the cipher core.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by the cipher core.
///
/// Every failure is detected before any block is transformed, so an `Err`
/// never comes with partial output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The supplied key is longer than the 16 bytes AES-128 accepts.
    #[error("key is {len} bytes, AES-128 accepts at most 16")]
    KeyTooLarge {
        /// Length of the rejected key.
        len: usize,
    },

    /// Ciphertext handed to decryption is not a whole number of blocks.
    #[error("ciphertext is {len} bytes, expected a multiple of 16")]
    CiphertextLength {
        /// Length of the rejected ciphertext.
        len: usize,
    },

    /// GF(2^8) multiplier outside the MixColumns constant set.
    #[error("unsupported GF(2^8) multiplier constant {0:#04x}")]
    UnsupportedMultiplier(u8),
}
