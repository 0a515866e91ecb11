//! Blamka block functions, one per tier token.
//!
//! The block function computes `R = prev ^ reference`, applies the BLAKE2b
//! round (with the multiply-hardened `fBlaMka` addition) to the 8 rows and
//! then the 8 column pairs of `R`, and stores `P(R) ^ R` into `next`, or
//! `P(R) ^ R ^ next` on passes after the first.
//!
//! # Safety
//!
//! As in the BLAKE2b crate, SIMD bodies are `#[target_feature]` functions
//! reachable only through tokens that runtime detection produced.

#![allow(unsafe_code)]

use blake2b::Blake2bKernel;
use cpu::{Avx2, Portable, Sse2, Sse41, Ssse3};

use crate::block::Block;

mod portable;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod sse2;
#[cfg(target_arch = "x86_64")]
mod sse41;
#[cfg(target_arch = "x86_64")]
mod ssse3;

/// A tier that can run both the Argon2 block function and BLAKE2b.
pub trait BlamkaKernel: Blake2bKernel {
    /// Computes the compression `G(prev, reference)` into `next`.
    ///
    /// With `with_xor` the result is XORed into the existing contents of
    /// `next` instead of overwriting them.
    fn fill_block(self, prev: &Block, reference: &Block, next: &mut Block, with_xor: bool);
}

impl BlamkaKernel for Portable {
    #[inline]
    fn fill_block(self, prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
        portable::fill_block(prev, reference, next, with_xor);
    }
}

macro_rules! simd_kernel {
    ($token:ident, $module:ident) => {
        #[cfg(target_arch = "x86_64")]
        impl BlamkaKernel for $token {
            #[inline]
            fn fill_block(self, prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
                // SAFETY: holding the token proves the CPU supports the
                // features `$module` is compiled with.
                unsafe { $module::fill_block(prev, reference, next, with_xor) }
            }
        }

        #[cfg(not(target_arch = "x86_64"))]
        impl BlamkaKernel for $token {
            fn fill_block(self, prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
                portable::fill_block(prev, reference, next, with_xor);
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

    fn pattern(seed: u64) -> Block {
        let mut x = seed;
        Block(std::array::from_fn(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }))
    }

    fn check_against_portable<K: BlamkaKernel>() {
        let Some(kernel) = K::detect() else {
            eprintln!("skipping {}: not supported on this CPU", K::TIER);
            return;
        };
        let prev = pattern(0x9e37_79b9_7f4a_7c15);
        let reference = pattern(0x2545_f491_4f6c_dd1d);
        for with_xor in [false, true] {
            let mut expected = pattern(7);
            let mut actual = expected;
            Portable.fill_block(&prev, &reference, &mut expected, with_xor);
            kernel.fill_block(&prev, &reference, &mut actual, with_xor);
            assert_eq!(actual, expected, "{} with_xor={with_xor}", K::TIER);
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
    fn address_generation_is_deterministic() {
        let input = Block(std::array::from_fn(|i| if i < 7 { i as u64 + 1 } else { 0 }));
        let mut first = Block::ZERO;
        let mut second = Block::ZERO;
        Portable.fill_block(&Block::ZERO, &input, &mut first, false);
        Portable.fill_block(&Block::ZERO, &input, &mut second, false);
        assert_eq!(first, second);
        assert_ne!(first, Block::ZERO);
    }
}
