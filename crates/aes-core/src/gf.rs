//! GF(2^8) arithmetic under the AES polynomial `x^8 + x^4 + x^3 + x + 1`.

use crate::error::{Error, Result};

/// Low byte of the reduction polynomial `0x11b`.
const REDUCTION: u8 = 0x1b;

/// Multiplier constants that appear in the MixColumns matrices.
pub const MIX_CONSTANTS: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x09, 0x0b, 0x0d, 0x0e];

/// Multiplies by `x` (doubling) with conditional reduction.
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Full GF(2^8) product of two arbitrary bytes.
pub fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Multiplies `value` by one of the [`MIX_CONSTANTS`].
///
/// Any other constant is rejected with [`Error::UnsupportedMultiplier`].
pub fn try_multiply(value: u8, constant: u8) -> Result<u8> {
    match constant {
        0x00 => Ok(0),
        0x01 => Ok(value),
        0x02 | 0x03 | 0x09 | 0x0b | 0x0d | 0x0e => Ok(gmul(value, constant)),
        other => Err(Error::UnsupportedMultiplier(other)),
    }
}

/// Multiplies `value` by a MixColumns constant.
///
/// # Panics
///
/// Panics when `constant` is not in [`MIX_CONSTANTS`]. The column-mixing
/// matrices only hold supported constants, so reaching the panic means the
/// matrices themselves are corrupt.
#[inline]
pub fn multiply(value: u8, constant: u8) -> u8 {
    match try_multiply(value, constant) {
        Ok(product) => product,
        Err(err) => panic!("invariant violated: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mul_by_decomposition(value: u8, constant: u8) -> u8 {
        let mut power = value;
        let mut acc = 0u8;
        for bit in 0..8 {
            if constant & (1 << bit) != 0 {
                acc ^= power;
            }
            power = xtime(power);
        }
        acc
    }

    #[test]
    fn xtime_reduces_high_bit() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x80), 0x1b);
    }

    #[test]
    fn gmul_matches_fips_example() {
        // FIPS-197 section 4.2: {57} * {13} = {fe}.
        assert_eq!(gmul(0x57, 0x13), 0xfe);
        assert_eq!(gmul(0x57, 0x83), 0xc1);
    }

    #[test]
    fn multiply_agrees_with_bit_decomposition_for_every_input() {
        for constant in MIX_CONSTANTS {
            for value in 0..=255u8 {
                assert_eq!(
                    multiply(value, constant),
                    mul_by_decomposition(value, constant),
                    "value {value:#04x} constant {constant:#04x}"
                );
            }
        }
    }

    #[test]
    fn spot_check_precomputed_table_entries() {
        assert_eq!(multiply(0x80, 0x02), 0x1b);
        assert_eq!(multiply(0xff, 0x03), 0x1a);
        assert_eq!(multiply(0x01, 0x0e), 0x0e);
        assert_eq!(multiply(0xff, 0x09), 0x46);
        assert_eq!(multiply(0xff, 0x0b), 0xa3);
        assert_eq!(multiply(0xff, 0x0d), 0x97);
        assert_eq!(multiply(0xff, 0x0e), 0x8d);
    }

    #[test]
    fn unsupported_constant_is_rejected() {
        assert_eq!(try_multiply(0x12, 0x04), Err(Error::UnsupportedMultiplier(0x04)));
        assert_eq!(try_multiply(0x12, 0xff), Err(Error::UnsupportedMultiplier(0xff)));
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn multiply_panics_on_unsupported_constant() {
        multiply(0x01, 0x05);
    }
}
