//! Collaborators around the AES-128 core: cipher selection, UTF-8 text
//! handling, one-byte length-prefixed framing and a TCP peer.
//!
//! The cipher core knows nothing about any of this; it only sees byte
//! buffers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod crypto;
mod error;
mod frame;
mod peer;

pub use crate::config::{Config, DEFAULT_PORT};
pub use crate::crypto::{decrypt_text, encrypt_text, CipherKind};
pub use crate::error::{Error, Result};
pub use crate::frame::{read_frame, write_frame, MAX_FRAME_LEN};
pub use crate::peer::{CipherSettings, Mode, Peer, PeerListener};
