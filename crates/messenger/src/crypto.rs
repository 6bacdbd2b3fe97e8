//! Cipher selection and the string ↔ byte layer around the cipher core.

use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Cipher applied to outgoing and incoming messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// Plain UTF-8, no encryption.
    None,
    /// AES-128 in ECB mode with a zero-extended key.
    #[default]
    Aes128,
}

impl CipherKind {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::None => "none",
            CipherKind::Aes128 => "aes128",
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CipherKind::None),
            "aes128" | "aes-128" => Ok(CipherKind::Aes128),
            _ => Err(Error::UnknownCipher(s.to_owned())),
        }
    }
}

/// Encodes `text` as UTF-8 and encrypts it with `key` (also UTF-8).
pub fn encrypt_text(text: &str, key: &str, cipher: CipherKind) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    match cipher {
        CipherKind::None => Ok(bytes.to_vec()),
        CipherKind::Aes128 => Ok(aes_core::encrypt(bytes, key.as_bytes())?),
    }
}

/// Decrypts `bytes` with `key` and decodes the result as UTF-8.
///
/// Invalid sequences become U+FFFD. Zero bytes at the end of an AES
/// plaintext are block padding and are dropped.
pub fn decrypt_text(bytes: &[u8], key: &str, cipher: CipherKind) -> Result<String> {
    let plain = match cipher {
        CipherKind::None => bytes.to_vec(),
        CipherKind::Aes128 => {
            let mut plain = aes_core::decrypt(bytes, key.as_bytes())?;
            strip_padding(&mut plain);
            plain
        }
    };
    Ok(String::from_utf8_lossy(&plain).into_owned())
}

fn strip_padding(plain: &mut Vec<u8>) {
    let end = plain.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    plain.truncate(end);
}
