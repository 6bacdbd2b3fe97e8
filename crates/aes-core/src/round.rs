//! AES round transformations.

use crate::block::State;
use crate::gf::multiply;
use crate::key::RoundKey;
use crate::sbox::{inv_sbox, sbox};

/// MixColumns coefficient matrix.
pub const MIX_MATRIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Inverse of [`MIX_MATRIX`] over GF(2^8).
pub const INV_MIX_MATRIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut State) {
    for byte in state.0.iter_mut().flatten() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut State) {
    for byte in state.0.iter_mut().flatten() {
        *byte = inv_sbox(*byte);
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r`.
#[inline]
pub fn shift_rows(state: &mut State) {
    for (r, row) in state.0.iter_mut().enumerate() {
        row.rotate_left(r);
    }
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut State) {
    for (r, row) in state.0.iter_mut().enumerate() {
        row.rotate_right(r);
    }
}

fn mix_with(state: &mut State, matrix: &[[u8; 4]; 4]) {
    for col in 0..4 {
        let input = state.column(col);
        let mut output = [0u8; 4];
        for (out, coeffs) in output.iter_mut().zip(matrix.iter()) {
            *out = coeffs
                .iter()
                .zip(input.iter())
                .fold(0u8, |acc, (&c, &a)| acc ^ multiply(a, c));
        }
        state.set_column(col, output);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut State) {
    mix_with(state, &MIX_MATRIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut State) {
    mix_with(state, &INV_MIX_MATRIX);
}

/// Adds (XORs) a round key into the state; word `col` is state column `col`.
#[inline]
pub fn add_round_key(state: &mut State, round_key: &RoundKey) {
    for (row, bytes) in state.0.iter_mut().enumerate() {
        for (col, byte) in bytes.iter_mut().enumerate() {
            *byte ^= round_key[col][row];
        }
    }
}
