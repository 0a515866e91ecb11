//! AVX2 block function.
//!
//! The block is 32 YMM registers of four words. Row rounds process two rows
//! per call with `vpermq` diagonalization. Column rounds process two column
//! pairs per call; their diagonal step regroups words across register pairs
//! with `vpblendd` before the `vpermq`.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use crate::block::Block;

macro_rules! rotr32 {
    ($x:expr) => {
        _mm256_shuffle_epi32::<0b10_11_00_01>($x)
    };
}

macro_rules! rotr24 {
    ($x:expr) => {
        _mm256_shuffle_epi8(
            $x,
            _mm256_setr_epi8(
                3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10,
                3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10,
            ),
        )
    };
}

macro_rules! rotr16 {
    ($x:expr) => {
        _mm256_shuffle_epi8(
            $x,
            _mm256_setr_epi8(
                2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9,
                2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9,
            ),
        )
    };
}

macro_rules! rotr63 {
    ($x:expr) => {{
        let x = $x;
        _mm256_xor_si256(_mm256_srli_epi64::<63>(x), _mm256_add_epi64(x, x))
    }};
}

macro_rules! fblamka {
    ($x:expr, $y:expr) => {{
        let (x, y) = ($x, $y);
        let z = _mm256_mul_epu32(x, y);
        _mm256_add_epi64(_mm256_add_epi64(x, y), _mm256_add_epi64(z, z))
    }};
}

macro_rules! half_g {
    ($a0:ident, $a1:ident, $b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident,
     $rot_d:ident, $rot_b:ident) => {
        $a0 = fblamka!($a0, $b0);
        $a1 = fblamka!($a1, $b1);
        $d0 = $rot_d!(_mm256_xor_si256($d0, $a0));
        $d1 = $rot_d!(_mm256_xor_si256($d1, $a1));
        $c0 = fblamka!($c0, $d0);
        $c1 = fblamka!($c1, $d1);
        $b0 = $rot_b!(_mm256_xor_si256($b0, $c0));
        $b1 = $rot_b!(_mm256_xor_si256($b1, $c1));
    };
}

/// Each register holds four consecutive words of one row.
macro_rules! diagonalize_rows {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {
        $b0 = _mm256_permute4x64_epi64::<0b00_11_10_01>($b0);
        $c0 = _mm256_permute4x64_epi64::<0b01_00_11_10>($c0);
        $d0 = _mm256_permute4x64_epi64::<0b10_01_00_11>($d0);
        $b1 = _mm256_permute4x64_epi64::<0b00_11_10_01>($b1);
        $c1 = _mm256_permute4x64_epi64::<0b01_00_11_10>($c1);
        $d1 = _mm256_permute4x64_epi64::<0b10_01_00_11>($d1);
    };
}

macro_rules! undiagonalize_rows {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {
        $b0 = _mm256_permute4x64_epi64::<0b10_01_00_11>($b0);
        $c0 = _mm256_permute4x64_epi64::<0b01_00_11_10>($c0);
        $d0 = _mm256_permute4x64_epi64::<0b00_11_10_01>($d0);
        $b1 = _mm256_permute4x64_epi64::<0b10_01_00_11>($b1);
        $c1 = _mm256_permute4x64_epi64::<0b01_00_11_10>($c1);
        $d1 = _mm256_permute4x64_epi64::<0b00_11_10_01>($d1);
    };
}

/// Each register holds words (2k, 2k+1) of two adjacent column pairs.
macro_rules! diagonalize_columns {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b1 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0xCC>(b0, b1));
        $b0 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0x33>(b0, b1));
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0xCC>(d0, d1));
        $d1 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0x33>(d0, d1));
    }};
}

macro_rules! undiagonalize_columns {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b0 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0xCC>(b0, b1));
        $b1 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0x33>(b0, b1));
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0x33>(d0, d1));
        $d1 = _mm256_permute4x64_epi64::<0b10_11_00_01>(_mm256_blend_epi32::<0xCC>(d0, d1));
    }};
}

macro_rules! round {
    ($s:ident, $diag:ident, $undiag:ident;
     $a0:expr, $a1:expr, $b0:expr, $b1:expr, $c0:expr, $c1:expr, $d0:expr, $d1:expr) => {{
        let (mut a0, mut a1, mut b0, mut b1) = ($s[$a0], $s[$a1], $s[$b0], $s[$b1]);
        let (mut c0, mut c1, mut d0, mut d1) = ($s[$c0], $s[$c1], $s[$d0], $s[$d1]);

        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr32, rotr24);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr16, rotr63);
        $diag!(b0, b1, c0, c1, d0, d1);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr32, rotr24);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr16, rotr63);
        $undiag!(b0, b1, c0, c1, d0, d1);

        ($s[$a0], $s[$a1], $s[$b0], $s[$b1]) = (a0, a1, b0, b1);
        ($s[$c0], $s[$c1], $s[$d0], $s[$d1]) = (c0, c1, d0, d1);
    }};
}

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn fill_block(prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
    let pp = prev.0.as_ptr().cast::<__m256i>();
    let rp = reference.0.as_ptr().cast::<__m256i>();
    let np = next.0.as_mut_ptr().cast::<__m256i>();

    let mut state = [_mm256_setzero_si256(); 32];
    let mut tmp = [_mm256_setzero_si256(); 32];
    for j in 0..32 {
        state[j] = _mm256_xor_si256(_mm256_loadu_si256(rp.add(j)), _mm256_loadu_si256(pp.add(j)));
        tmp[j] = if with_xor {
            _mm256_xor_si256(state[j], _mm256_loadu_si256(np.add(j)))
        } else {
            state[j]
        };
    }

    // Rows 2i and 2i+1 sit in registers 8i..8i+4 and 8i+4..8i+8.
    for i in 0..4 {
        let r = 8 * i;
        round!(state, diagonalize_rows, undiagonalize_rows;
            r, r + 4, r + 1, r + 5, r + 2, r + 6, r + 3, r + 7);
    }
    for i in 0..4 {
        round!(state, diagonalize_columns, undiagonalize_columns;
            i, i + 4, i + 8, i + 12, i + 16, i + 20, i + 24, i + 28);
    }

    for j in 0..32 {
        _mm256_storeu_si256(np.add(j), _mm256_xor_si256(state[j], tmp[j]));
    }
}
