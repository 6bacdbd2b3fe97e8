//! AES-128 cipher core used by the messenger to encrypt message bytes.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - GF(2^8) arithmetic and the forward/inverse S-boxes.
//! - Key schedule for AES-128.
//! - The four round transforms over a 4×4 column-major [`State`].
//! - Single-block encryption and decryption, plus ECB message drivers
//!   ([`encrypt`], [`decrypt`]).
//! - An optional [`Tracer`] hook observing every transform.
//!
//! Two compatibility behaviors weaken security and are kept on purpose:
//! keys shorter than 16 bytes are zero-extended, and the last block of a
//! message is zero-padded without recording the original length. There is no
//! chaining, no integrity tag and no constant-time guarantee; do not treat
//! this as a hardened cipher.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
pub mod gf;
mod key;
pub mod round;
pub mod sbox;
mod schedule;
pub mod trace;

pub use crate::block::{Block, State, BLOCK_LEN};
pub use crate::cipher::{
    decrypt, decrypt_block, decrypt_block_traced, decrypt_traced, encrypt, encrypt_block,
    encrypt_block_traced, encrypt_traced, padded_len,
};
pub use crate::error::{Error, Result};
pub use crate::key::{Aes128Key, ExpandedKey, RoundKey, Word, EXPANDED_WORDS, KEY_LEN};
pub use crate::sbox::{inv_sbox, sbox};
pub use crate::schedule::{expand_key, rot_word, round_constants, sub_word, ROUNDS};
pub use crate::trace::{NoTrace, Step, TraceLog, Tracer};
