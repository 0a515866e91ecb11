//! SSSE3 block function: byte-shuffle rotations, `palignr` diagonalization.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::sse2::{blamka_round, fblamka, fill_block_xmm, half_g, rotr32, rotr63};
use crate::block::Block;

macro_rules! rotr24 {
    ($x:expr) => {
        _mm_shuffle_epi8($x, _mm_setr_epi8(3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10))
    };
}

macro_rules! rotr16 {
    ($x:expr) => {
        _mm_shuffle_epi8($x, _mm_setr_epi8(2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9))
    };
}

macro_rules! diagonalize {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b0 = _mm_alignr_epi8::<8>(b1, b0);
        $b1 = _mm_alignr_epi8::<8>(b0, b1);
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm_alignr_epi8::<8>(d0, d1);
        $d1 = _mm_alignr_epi8::<8>(d1, d0);
    }};
}

macro_rules! undiagonalize {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b0 = _mm_alignr_epi8::<8>(b0, b1);
        $b1 = _mm_alignr_epi8::<8>(b1, b0);
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm_alignr_epi8::<8>(d1, d0);
        $d1 = _mm_alignr_epi8::<8>(d0, d1);
    }};
}

pub(super) use {diagonalize, rotr16, rotr24, undiagonalize};

/// # Safety
///
/// The CPU must support SSSE3.
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn fill_block(prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
    fill_block_xmm!(prev, reference, next, with_xor);
}
