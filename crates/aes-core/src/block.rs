//! Block representation and the 4×4 cipher state.

use core::fmt;

/// Bytes per AES block.
pub const BLOCK_LEN: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_LEN];

/// The 4×4 working matrix of one block, indexed `state[row][col]`.
///
/// Byte `k` of a block lives at row `k % 4`, column `k / 4`, so each column
/// holds four consecutive input bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct State(pub [[u8; 4]; 4]);

impl State {
    /// Packs up to 16 bytes into a state, zero-filling missing positions.
    ///
    /// Bytes past the sixteenth are ignored; the cipher driver never passes
    /// more than one block.
    pub fn pack(bytes: &[u8]) -> Self {
        let mut matrix = [[0u8; 4]; 4];
        for (k, &byte) in bytes.iter().take(BLOCK_LEN).enumerate() {
            matrix[k % 4][k / 4] = byte;
        }
        Self(matrix)
    }

    /// Flattens the state back into a block using the packing order.
    pub fn unpack(&self) -> Block {
        let mut block = [0u8; BLOCK_LEN];
        for (k, byte) in block.iter_mut().enumerate() {
            *byte = self.0[k % 4][k / 4];
        }
        block
    }

    /// Returns column `col` as four bytes, top to bottom.
    #[inline]
    pub fn column(&self, col: usize) -> [u8; 4] {
        [self.0[0][col], self.0[1][col], self.0[2][col], self.0[3][col]]
    }

    /// Overwrites column `col`.
    #[inline]
    pub fn set_column(&mut self, col: usize, column: [u8; 4]) {
        for (row, byte) in column.into_iter().enumerate() {
            self.0[row][col] = byte;
        }
    }
}

impl From<&Block> for State {
    fn from(block: &Block) -> Self {
        Self::pack(block)
    }
}

impl From<State> for Block {
    fn from(state: State) -> Self {
        state.unpack()
    }
}

/// Prints the state as four rows of hex bytes.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:02X} {:02X} {:02X} {:02X}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_is_column_major() {
        let block: Block = core::array::from_fn(|i| i as u8);
        let state = State::pack(&block);
        assert_eq!(state.0[0], [0, 4, 8, 12]);
        assert_eq!(state.0[1], [1, 5, 9, 13]);
        assert_eq!(state.0[3], [3, 7, 11, 15]);
        assert_eq!(state.column(2), [8, 9, 10, 11]);
    }

    #[test]
    fn unpack_inverts_pack() {
        let block: Block = core::array::from_fn(|i| (i as u8).wrapping_mul(37));
        assert_eq!(State::pack(&block).unpack(), block);
    }

    #[test]
    fn short_input_is_zero_filled() {
        let state = State::pack(b"abc");
        let block = state.unpack();
        assert_eq!(&block[..3], b"abc");
        assert!(block[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn display_prints_rows() {
        let block: Block = core::array::from_fn(|i| i as u8);
        let text = State::pack(&block).to_string();
        assert_eq!(text.lines().next(), Some("00 04 08 0C"));
        assert_eq!(text.lines().count(), 4);
    }
}
