//! AES-128 key expansion.

use crate::gf::xtime;
use crate::key::{Aes128Key, ExpandedKey, Word, EXPANDED_WORDS};
use crate::sbox::sbox;

/// Number of cipher rounds for a 128-bit key.
pub const ROUNDS: usize = 10;

/// Round constants `Rcon[1..=10]`; index 0 is unused and left zero.
pub fn round_constants() -> [Word; ROUNDS + 1] {
    let mut rcon = [[0u8; 4]; ROUNDS + 1];
    rcon[1][0] = 0x01;
    for i in 2..=ROUNDS {
        rcon[i][0] = xtime(rcon[i - 1][0]);
    }
    rcon
}

/// Rotates a word one byte to the left.
#[inline]
pub fn rot_word(word: Word) -> Word {
    [word[1], word[2], word[3], word[0]]
}

/// Applies the forward S-box to each byte of a word.
#[inline]
pub fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

#[inline]
fn xor_word(a: Word, b: Word) -> Word {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

/// Expands a 128-bit key into 44 schedule words (11 round keys).
pub fn expand_key(key: &Aes128Key) -> ExpandedKey {
    let rcon = round_constants();
    let mut w = [[0u8; 4]; EXPANDED_WORDS];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..EXPANDED_WORDS {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = xor_word(sub_word(rot_word(temp)), rcon[i / 4]);
        }
        w[i] = xor_word(w[i - 4], temp);
    }

    ExpandedKey(w)
}
