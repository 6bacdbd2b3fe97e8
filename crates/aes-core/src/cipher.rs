//! AES-128 block encryption/decryption and the ECB message drivers.

use crate::block::{Block, State, BLOCK_LEN};
use crate::error::{Error, Result};
use crate::key::{Aes128Key, ExpandedKey};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::schedule::{expand_key, ROUNDS};
use crate::trace::{NoTrace, Step, Tracer};

#[inline]
fn apply<T: Tracer + ?Sized>(
    state: &mut State,
    round: usize,
    step: Step,
    tracer: &mut T,
    transform: impl FnOnce(&mut State),
) {
    transform(state);
    tracer.step(round, step, state);
}

#[inline]
fn add_key<T: Tracer + ?Sized>(state: &mut State, key: &ExpandedKey, round: usize, tracer: &mut T) {
    let round_key = key.round_key(round);
    apply(state, round, Step::AddRoundKey, tracer, |s| {
        add_round_key(s, &round_key)
    });
}

fn encrypt_state<T: Tracer + ?Sized>(state: &mut State, key: &ExpandedKey, tracer: &mut T) {
    add_key(state, key, 0, tracer);

    for round in 1..ROUNDS {
        apply(state, round, Step::SubBytes, tracer, sub_bytes);
        apply(state, round, Step::ShiftRows, tracer, shift_rows);
        apply(state, round, Step::MixColumns, tracer, mix_columns);
        add_key(state, key, round, tracer);
    }

    apply(state, ROUNDS, Step::SubBytes, tracer, sub_bytes);
    apply(state, ROUNDS, Step::ShiftRows, tracer, shift_rows);
    add_key(state, key, ROUNDS, tracer);
}

fn decrypt_state<T: Tracer + ?Sized>(state: &mut State, key: &ExpandedKey, tracer: &mut T) {
    add_key(state, key, ROUNDS, tracer);
    apply(state, ROUNDS, Step::InvShiftRows, tracer, inv_shift_rows);
    apply(state, ROUNDS, Step::InvSubBytes, tracer, inv_sub_bytes);

    for round in (1..ROUNDS).rev() {
        add_key(state, key, round, tracer);
        apply(state, round, Step::InvMixColumns, tracer, inv_mix_columns);
        apply(state, round, Step::InvShiftRows, tracer, inv_shift_rows);
        apply(state, round, Step::InvSubBytes, tracer, inv_sub_bytes);
    }

    add_key(state, key, 0, tracer);
}

/// Encrypts a single 16-byte block with a pre-expanded key.
pub fn encrypt_block(block: &Block, key: &ExpandedKey) -> Block {
    encrypt_block_traced(block, key, &mut NoTrace)
}

/// [`encrypt_block`], reporting every transform to `tracer`.
pub fn encrypt_block_traced<T: Tracer + ?Sized>(
    block: &Block,
    key: &ExpandedKey,
    tracer: &mut T,
) -> Block {
    let mut state = State::pack(block);
    encrypt_state(&mut state, key, tracer);
    state.unpack()
}

/// Decrypts a single 16-byte block with a pre-expanded key.
pub fn decrypt_block(block: &Block, key: &ExpandedKey) -> Block {
    decrypt_block_traced(block, key, &mut NoTrace)
}

/// [`decrypt_block`], reporting every transform to `tracer`.
pub fn decrypt_block_traced<T: Tracer + ?Sized>(
    block: &Block,
    key: &ExpandedKey,
    tracer: &mut T,
) -> Block {
    let mut state = State::pack(block);
    decrypt_state(&mut state, key, tracer);
    state.unpack()
}

/// Length of the ciphertext produced for `len` plaintext bytes.
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(BLOCK_LEN) * BLOCK_LEN
}

/// Encrypts `plaintext` in ECB mode under a key of at most 16 bytes.
///
/// Short keys are zero-extended and a short final block is zero-padded; the
/// original length is not recorded, so decryption returns the padded
/// plaintext.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    encrypt_traced(plaintext, key, &mut NoTrace)
}

/// [`encrypt`], reporting every transform of every block to `tracer`.
pub fn encrypt_traced<T: Tracer + ?Sized>(
    plaintext: &[u8],
    key: &[u8],
    tracer: &mut T,
) -> Result<Vec<u8>> {
    let expanded = expand_key(&Aes128Key::from_slice(key)?);
    let mut out = Vec::with_capacity(padded_len(plaintext.len()));
    for chunk in plaintext.chunks(BLOCK_LEN) {
        let mut state = State::pack(chunk);
        encrypt_state(&mut state, &expanded, tracer);
        out.extend_from_slice(&state.unpack());
    }
    Ok(out)
}

/// Decrypts ECB `ciphertext` produced by [`encrypt`] with the same key.
///
/// The ciphertext must be a whole number of blocks.
pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    decrypt_traced(ciphertext, key, &mut NoTrace)
}

/// [`decrypt`], reporting every transform of every block to `tracer`.
pub fn decrypt_traced<T: Tracer + ?Sized>(
    ciphertext: &[u8],
    key: &[u8],
    tracer: &mut T,
) -> Result<Vec<u8>> {
    let aes_key = Aes128Key::from_slice(key)?;
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(Error::CiphertextLength {
            len: ciphertext.len(),
        });
    }
    let expanded = expand_key(&aes_key);
    let mut out = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(BLOCK_LEN) {
        let mut state = State::pack(chunk);
        decrypt_state(&mut state, &expanded, tracer);
        out.extend_from_slice(&state.unpack());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceLog;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn encrypt_matches_nist_vector() {
        let ct = encrypt(&NIST_PLAIN, &NIST_KEY).unwrap();
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let pt = decrypt(&NIST_CIPHER, &NIST_KEY).unwrap();
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn block_api_matches_nist_vector() {
        let expanded = expand_key(&Aes128Key::from(NIST_KEY));
        assert_eq!(encrypt_block(&NIST_PLAIN, &expanded), NIST_CIPHER);
        assert_eq!(decrypt_block(&NIST_CIPHER, &expanded), NIST_PLAIN);
    }

    #[test]
    fn fips_appendix_b_vector() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let plain = [
            0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37,
            0x07, 0x34,
        ];
        let cipher = [
            0x39, 0x25, 0x84, 0x1d, 0x02, 0xdc, 0x09, 0xfb, 0xdc, 0x11, 0x85, 0x97, 0x19, 0x6a,
            0x0b, 0x32,
        ];
        assert_eq!(encrypt(&plain, &key).unwrap(), cipher);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let key_len = rng.gen_range(0..=16);
            let blocks = rng.gen_range(1..=6);
            let mut key = vec![0u8; key_len];
            let mut plain = vec![0u8; blocks * BLOCK_LEN];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut plain);
            let ct = encrypt(&plain, &key).unwrap();
            assert_eq!(ct.len(), plain.len());
            assert_eq!(decrypt(&ct, &key).unwrap(), plain);
        }
    }

    #[test]
    fn single_block_round_trip_seeded() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let mut key = [0u8; 16];
        rng.fill_bytes(&mut key);
        let expanded = expand_key(&Aes128Key::from(key));
        for _ in 0..200 {
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut block);
            let ct = encrypt_block(&block, &expanded);
            assert_eq!(decrypt_block(&ct, &expanded), block);
        }
    }

    #[test]
    fn short_key_equals_zero_extended_key() {
        let plain = b"sixteen byte msg";
        let mut long_key = [0u8; 16];
        long_key[0] = 0x2b;
        assert_eq!(
            encrypt(plain, &[0x2b]).unwrap(),
            encrypt(plain, &long_key).unwrap()
        );
    }

    #[test]
    fn oversized_key_fails_without_output() {
        let key = [0u8; 17];
        assert_eq!(
            encrypt(b"hello", &key),
            Err(Error::KeyTooLarge { len: 17 })
        );
        assert_eq!(
            decrypt(&[0u8; 16], &key),
            Err(Error::KeyTooLarge { len: 17 })
        );
    }

    #[test]
    fn decrypt_rejects_partial_blocks() {
        assert_eq!(
            decrypt(&[0u8; 17], b"key"),
            Err(Error::CiphertextLength { len: 17 })
        );
    }

    #[test]
    fn final_block_is_zero_padded() {
        let ct = encrypt(b"hello, world", b"secret").unwrap();
        assert_eq!(ct.len(), 16);
        let pt = decrypt(&ct, b"secret").unwrap();
        assert_eq!(&pt[..12], b"hello, world");
        assert_eq!(&pt[12..], &[0, 0, 0, 0]);
    }

    #[test]
    fn output_length_rounds_up_to_blocks() {
        for len in [0usize, 1, 15, 16, 17, 31, 32, 100] {
            let ct = encrypt(&vec![0xa5; len], b"k").unwrap();
            assert_eq!(ct.len(), padded_len(len));
            assert!(ct.len() >= len);
            assert_eq!(ct.len() % BLOCK_LEN, 0);
        }
    }

    #[test]
    fn encryption_is_deterministic_and_blockwise() {
        let plain = [0x42u8; 32];
        let first = encrypt(&plain, b"key").unwrap();
        let second = encrypt(&plain, b"key").unwrap();
        assert_eq!(first, second);
        // ECB: identical plaintext blocks give identical ciphertext blocks.
        assert_eq!(first[..16], first[16..]);
    }

    #[test]
    fn trace_records_every_step() {
        let mut log = TraceLog::new();
        let ct = encrypt_traced(&NIST_PLAIN, &NIST_KEY, &mut log).unwrap();
        assert_eq!(ct, NIST_CIPHER);

        // 1 initial key add, 9 full rounds of 4 steps, 3 final steps.
        let entries = log.entries();
        assert_eq!(entries.len(), 1 + 9 * 4 + 3);
        assert_eq!(entries[0].step, Step::AddRoundKey);
        assert_eq!(entries[0].round, 0);
        assert_eq!(entries[3].step, Step::MixColumns);
        let last = entries.last().unwrap();
        assert_eq!((last.round, last.step), (10, Step::AddRoundKey));
        assert_eq!(last.state.unpack(), NIST_CIPHER);
    }

    #[test]
    fn decrypt_trace_mirrors_encrypt_trace() {
        let expanded = expand_key(&Aes128Key::from(NIST_KEY));
        let mut enc = TraceLog::new();
        let mut dec = TraceLog::new();
        encrypt_block_traced(&NIST_PLAIN, &expanded, &mut enc);
        decrypt_block_traced(&NIST_CIPHER, &expanded, &mut dec);
        assert_eq!(enc.entries().len(), dec.entries().len());
        assert_eq!(dec.entries()[0].step, Step::AddRoundKey);
        assert_eq!(dec.entries()[0].round, 10);
        // The state entering encryption round 1 equals the state after
        // decryption has removed round 1.
        let enc_after_round0 = enc.entries()[0].state;
        let n = dec.entries().len();
        assert_eq!(dec.entries()[n - 2].state, enc_after_round0);
    }
}
