//! 1 KiB memory block.

use std::ops::BitXorAssign;

use zeroize::DefaultIsZeroes;

/// Words per block.
pub const BLOCK_WORDS: usize = 128;

/// Bytes per block.
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 8;

/// One Argon2 memory block: 128 little-endian 64-bit words.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    /// The all-zero block.
    pub const ZERO: Self = Self([0; BLOCK_WORDS]);

    /// Loads a block from its little-endian byte encoding.
    pub fn from_le_bytes(bytes: &[u8; BLOCK_BYTES]) -> Self {
        let mut block = Self::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        block
    }

    /// Writes the little-endian byte encoding into `out`.
    pub fn write_le_bytes(&self, out: &mut [u8; BLOCK_BYTES]) {
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BitXorAssign<&Block> for Block {
    fn bitxor_assign(&mut self, rhs: &Block) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a ^= b;
        }
    }
}

// Blanket `Zeroize` for `Block`, `[Block]` and `Vec<Block>`.
impl DefaultIsZeroes for Block {}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Block").field(&format_args!("{:016x}..", self.0[0])).finish()
    }
}

#[cfg(test)]
mod tests {
    use zeroize::Zeroize;

    use super::*;

    #[test]
    fn byte_encoding_is_little_endian() {
        let mut bytes = [0u8; BLOCK_BYTES];
        bytes[0] = 0x01;
        bytes[8] = 0x02;
        bytes[BLOCK_BYTES - 1] = 0x80;
        let block = Block::from_le_bytes(&bytes);
        assert_eq!(block.0[0], 1);
        assert_eq!(block.0[1], 2);
        assert_eq!(block.0[BLOCK_WORDS - 1], 0x8000_0000_0000_0000);

        let mut back = [0u8; BLOCK_BYTES];
        block.write_le_bytes(&mut back);
        assert_eq!(back, bytes);
    }

    #[test]
    fn xor_assign_is_wordwise() {
        let mut a = Block([0b1100; BLOCK_WORDS]);
        a ^= &Block([0b1010; BLOCK_WORDS]);
        assert!(a.0.iter().all(|&w| w == 0b0110));
    }

    #[test]
    fn zeroize_clears_every_word() {
        let mut block = Block([u64::MAX; BLOCK_WORDS]);
        block.zeroize();
        assert_eq!(block, Block::ZERO);

        let mut blocks = vec![Block([7; BLOCK_WORDS]); 3];
        blocks.as_mut_slice().zeroize();
        assert!(blocks.iter().all(|b| *b == Block::ZERO));
    }
}
