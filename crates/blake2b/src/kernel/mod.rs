//! BLAKE2b compression kernels.
//!
//! Each tier token from the `cpu` crate implements [`Blake2bKernel`]. The
//! kernels are numerically identical and differ only in register layout:
//!
//! - **REF**: scalar G over a `[u64; 16]` working vector
//! - **SSE2**: each row split over two 128-bit registers, shift-based
//!   rotations, unpack-based diagonalization
//! - **SSSE3**: same layout, `pshufb` rotations and `palignr` diagonalization
//! - **SSE4.1**: SSSE3 round with message pairs gathered by `pinsrq`
//! - **AVX2**: one 256-bit register per row, `vpermq` diagonalization
//!
//! # Safety
//!
//! SIMD kernels are `unsafe fn`s compiled with `#[target_feature]`. They are
//! only called through the trait impls below, whose receivers are tokens that
//! can only exist after runtime detection of those features.

#![allow(unsafe_code)]

use cpu::{Avx2, Kernel, Portable, Sse2, Sse41, Ssse3};

use crate::BLOCK_BYTES;

mod portable;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod sse2;
#[cfg(target_arch = "x86_64")]
mod sse41;
#[cfg(target_arch = "x86_64")]
mod ssse3;

/// Initialization vector shared with SHA-512.
pub(crate) const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// Message word schedule; rows 10 and 11 repeat rows 0 and 1.
#[rustfmt::skip]
pub(crate) const SIGMA: [[usize; 16]; 12] = [
    [ 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15],
    [14, 10,  4,  8,  9, 15, 13,  6,  1, 12,  0,  2, 11,  7,  5,  3],
    [11,  8, 12,  0,  5,  2, 15, 13, 10, 14,  3,  6,  7,  1,  9,  4],
    [ 7,  9,  3,  1, 13, 12, 11, 14,  2,  6,  5, 10,  4,  0, 15,  8],
    [ 9,  0,  5,  7,  2,  4, 10, 15, 14,  1, 11, 12,  6,  8,  3, 13],
    [ 2, 12,  6, 10,  0, 11,  8,  3,  4, 13,  7,  5, 15, 14,  1,  9],
    [12,  5,  1, 15, 14, 13,  4, 10,  0,  7,  6,  3,  9,  2,  8, 11],
    [13, 11,  7, 14, 12,  1,  3,  9,  5,  0, 15,  4,  8,  6,  2, 10],
    [ 6, 15, 14,  9, 11,  3,  0,  8, 12,  2, 13,  7,  1,  4, 10,  5],
    [10,  2,  8,  4,  7,  6,  1,  5, 15, 11,  9, 14,  3, 12, 13,  0],
    [ 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15],
    [14, 10,  4,  8,  9, 15, 13,  6,  1, 12,  0,  2, 11,  7,  5,  3],
];

/// A tier that can run the BLAKE2b compression function.
pub trait Blake2bKernel: Kernel {
    /// Compresses one 128-byte block into the chaining value `h`.
    ///
    /// `counter` is the 128-bit byte count including this block, `flags` the
    /// finalization flags (`[!0, 0]` for the last block).
    fn compress(self, h: &mut [u64; 8], block: &[u8; BLOCK_BYTES], counter: [u64; 2], flags: [u64; 2]);
}

#[inline]
fn load_message(block: &[u8; BLOCK_BYTES]) -> [u64; 16] {
    let mut m = [0u64; 16];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut le = [0u8; 8];
        le.copy_from_slice(bytes);
        *word = u64::from_le_bytes(le);
    }
    m
}

impl Blake2bKernel for Portable {
    #[inline]
    fn compress(self, h: &mut [u64; 8], block: &[u8; BLOCK_BYTES], counter: [u64; 2], flags: [u64; 2]) {
        portable::compress(h, &load_message(block), counter, flags);
    }
}

macro_rules! simd_kernel {
    ($token:ident, $module:ident) => {
        #[cfg(target_arch = "x86_64")]
        impl Blake2bKernel for $token {
            #[inline]
            fn compress(
                self,
                h: &mut [u64; 8],
                block: &[u8; BLOCK_BYTES],
                counter: [u64; 2],
                flags: [u64; 2],
            ) {
                let m = load_message(block);
                // SAFETY: the token was produced by `Kernel::detect`, which
                // verified the target features this module is compiled for.
                unsafe { $module::compress(h, &m, counter, flags) }
            }
        }

        // Tokens cannot be constructed off x86_64; this impl only satisfies
        // the trait bounds of generic code.
        #[cfg(not(target_arch = "x86_64"))]
        impl Blake2bKernel for $token {
            fn compress(
                self,
                h: &mut [u64; 8],
                block: &[u8; BLOCK_BYTES],
                counter: [u64; 2],
                flags: [u64; 2],
            ) {
                portable::compress(h, &load_message(block), counter, flags);
            }
        }
    };
}

simd_kernel!(Sse2, sse2);
simd_kernel!(Ssse3, ssse3);
simd_kernel!(Sse41, sse41);
simd_kernel!(Avx2, avx2);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block(seed: u8) -> [u8; BLOCK_BYTES] {
        std::array::from_fn(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
    }

    fn run<K: Blake2bKernel>(kernel: K, rounds: usize) -> [u64; 8] {
        let mut h = IV;
        h[0] ^= 0x0101_0040;
        for round in 0..rounds {
            let counter = [(round as u64 + 1) * BLOCK_BYTES as u64, 0];
            let flags = if round + 1 == rounds { [!0, 0] } else { [0, 0] };
            kernel.compress(&mut h, &sample_block(round as u8), counter, flags);
        }
        h
    }

    fn check_against_portable<K: Blake2bKernel>() {
        let Some(kernel) = K::detect() else {
            eprintln!("skipping {:?}: not supported on this CPU", K::TIER);
            return;
        };
        for rounds in [1, 2, 7] {
            assert_eq!(run(kernel, rounds), run(Portable, rounds), "{:?}", K::TIER);
        }
    }

    #[test]
    fn sse2_matches_portable() {
        check_against_portable::<Sse2>();
    }

    #[test]
    fn ssse3_matches_portable() {
        check_against_portable::<Ssse3>();
    }

    #[test]
    fn sse41_matches_portable() {
        check_against_portable::<Sse41>();
    }

    #[test]
    fn avx2_matches_portable() {
        check_against_portable::<Avx2>();
    }

    #[test]
    fn high_counter_word_is_mixed_in() {
        let block = sample_block(9);
        let mut low = IV;
        let mut high = IV;
        Portable.compress(&mut low, &block, [128, 0], [0, 0]);
        Portable.compress(&mut high, &block, [128, 1], [0, 0]);
        assert_ne!(low, high);
    }

    #[test]
    fn load_message_is_little_endian() {
        let mut block = [0u8; BLOCK_BYTES];
        block[0] = 0x01;
        block[7] = 0x80;
        block[120] = 0xff;
        let m = load_message(&block);
        assert_eq!(m[0], 0x8000_0000_0000_0001);
        assert_eq!(m[15], 0xff);
    }
}
