//! Key types for AES-128.

use crate::error::{Error, Result};

/// Key length accepted by AES-128, in bytes.
pub const KEY_LEN: usize = 16;

/// Number of words in an expanded AES-128 key.
pub const EXPANDED_WORDS: usize = 44;

/// Four key-schedule bytes.
pub type Word = [u8; 4];

/// One round's key material: four words, word `j` supplying state column `j`.
pub type RoundKey = [Word; 4];

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; KEY_LEN]);

impl Aes128Key {
    /// Builds a key from up to 16 bytes, zero-extending shorter input.
    ///
    /// A short key is not an error, but every missing byte is a known zero,
    /// so a 1-byte key has only 256 possible values.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > KEY_LEN {
            return Err(Error::KeyTooLarge { len: bytes.len() });
        }
        let mut key = [0u8; KEY_LEN];
        key[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(key))
    }
}

impl From<[u8; KEY_LEN]> for Aes128Key {
    fn from(value: [u8; KEY_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::from_slice(value)
    }
}

/// The 44-word key schedule derived from an [`Aes128Key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandedKey(pub [Word; EXPANDED_WORDS]);

impl ExpandedKey {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn round_key(&self, round: usize) -> RoundKey {
        let base = 4 * round;
        [self.0[base], self.0[base + 1], self.0[base + 2], self.0[base + 3]]
    }

    /// All schedule words in order.
    pub fn words(&self) -> &[Word; EXPANDED_WORDS] {
        &self.0
    }
}
