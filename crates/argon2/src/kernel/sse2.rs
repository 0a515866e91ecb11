//! SSE2 block function.
//!
//! The block is held as 64 XMM registers, two words each. A row of sixteen
//! words is eight consecutive registers, a column pair is every eighth
//! register. Without `pshufb` the 24- and 16-bit rotations are shift pairs
//! and diagonalization uses 64-bit unpacks.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use crate::block::Block;

/// `x + y + 2 * lo32(x) * lo32(y)` per 64-bit lane.
macro_rules! fblamka {
    ($x:expr, $y:expr) => {{
        let (x, y) = ($x, $y);
        let z = _mm_mul_epu32(x, y);
        _mm_add_epi64(_mm_add_epi64(x, y), _mm_add_epi64(z, z))
    }};
}

macro_rules! rotr32 {
    ($x:expr) => {
        _mm_shuffle_epi32::<0b10_11_00_01>($x)
    };
}

macro_rules! rotr24 {
    ($x:expr) => {{
        let x = $x;
        _mm_or_si128(_mm_srli_epi64::<24>(x), _mm_slli_epi64::<40>(x))
    }};
}

macro_rules! rotr16 {
    ($x:expr) => {{
        let x = $x;
        _mm_or_si128(_mm_srli_epi64::<16>(x), _mm_slli_epi64::<48>(x))
    }};
}

macro_rules! rotr63 {
    ($x:expr) => {{
        let x = $x;
        _mm_xor_si128(_mm_srli_epi64::<63>(x), _mm_add_epi64(x, x))
    }};
}

/// Half of G on two column pairs at once.
macro_rules! half_g {
    ($a0:ident, $a1:ident, $b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident,
     $rot_d:ident, $rot_b:ident) => {
        $a0 = fblamka!($a0, $b0);
        $a1 = fblamka!($a1, $b1);
        $d0 = $rot_d!(_mm_xor_si128($d0, $a0));
        $d1 = $rot_d!(_mm_xor_si128($d1, $a1));
        $c0 = fblamka!($c0, $d0);
        $c1 = fblamka!($c1, $d1);
        $b0 = $rot_b!(_mm_xor_si128($b0, $c0));
        $b1 = $rot_b!(_mm_xor_si128($b1, $c1));
    };
}

macro_rules! diagonalize {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b0 = _mm_unpackhi_epi64(b0, _mm_unpacklo_epi64(b1, b1));
        $b1 = _mm_unpackhi_epi64(b1, _mm_unpacklo_epi64(b0, b0));
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm_unpackhi_epi64(d1, _mm_unpacklo_epi64(d0, d0));
        $d1 = _mm_unpackhi_epi64(d0, _mm_unpacklo_epi64(d1, d1));
    }};
}

macro_rules! undiagonalize {
    ($b0:ident, $b1:ident, $c0:ident, $c1:ident, $d0:ident, $d1:ident) => {{
        let (b0, b1, d0, d1) = ($b0, $b1, $d0, $d1);
        $b0 = _mm_unpackhi_epi64(b1, _mm_unpacklo_epi64(b0, b0));
        $b1 = _mm_unpackhi_epi64(b0, _mm_unpacklo_epi64(b1, b1));
        ::std::mem::swap(&mut $c0, &mut $c1);
        $d0 = _mm_unpackhi_epi64(d0, _mm_unpacklo_epi64(d1, d1));
        $d1 = _mm_unpackhi_epi64(d1, _mm_unpacklo_epi64(d0, d0));
    }};
}

/// Permutation P over the eight registers of `$s` at the given indices.
///
/// The rotation and diagonalization macros are resolved where this expands,
/// so each tier plugs in its own.
macro_rules! blamka_round {
    ($s:ident; $a0:expr, $a1:expr, $b0:expr, $b1:expr, $c0:expr, $c1:expr, $d0:expr, $d1:expr) => {{
        let (mut a0, mut a1, mut b0, mut b1) = ($s[$a0], $s[$a1], $s[$b0], $s[$b1]);
        let (mut c0, mut c1, mut d0, mut d1) = ($s[$c0], $s[$c1], $s[$d0], $s[$d1]);

        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr32, rotr24);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr16, rotr63);
        diagonalize!(b0, b1, c0, c1, d0, d1);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr32, rotr24);
        half_g!(a0, a1, b0, b1, c0, c1, d0, d1, rotr16, rotr63);
        undiagonalize!(b0, b1, c0, c1, d0, d1);

        ($s[$a0], $s[$a1], $s[$b0], $s[$b1]) = (a0, a1, b0, b1);
        ($s[$c0], $s[$c1], $s[$d0], $s[$d1]) = (c0, c1, d0, d1);
    }};
}

/// Body of `fill_block` shared by the 128-bit tiers.
macro_rules! fill_block_xmm {
    ($prev:ident, $reference:ident, $next:ident, $with_xor:ident) => {{
        let pp = $prev.0.as_ptr().cast::<__m128i>();
        let rp = $reference.0.as_ptr().cast::<__m128i>();
        let np = $next.0.as_mut_ptr().cast::<__m128i>();

        let mut state = [_mm_setzero_si128(); 64];
        let mut tmp = [_mm_setzero_si128(); 64];
        for j in 0..64 {
            state[j] = _mm_xor_si128(_mm_loadu_si128(rp.add(j)), _mm_loadu_si128(pp.add(j)));
            tmp[j] = if $with_xor {
                _mm_xor_si128(state[j], _mm_loadu_si128(np.add(j)))
            } else {
                state[j]
            };
        }

        for i in 0..8 {
            let r = 8 * i;
            blamka_round!(state; r, r + 1, r + 2, r + 3, r + 4, r + 5, r + 6, r + 7);
        }
        for i in 0..8 {
            blamka_round!(state; i, i + 8, i + 16, i + 24, i + 32, i + 40, i + 48, i + 56);
        }

        for j in 0..64 {
            _mm_storeu_si128(np.add(j), _mm_xor_si128(state[j], tmp[j]));
        }
    }};
}

pub(super) use {blamka_round, fblamka, fill_block_xmm, half_g, rotr32, rotr63};

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn fill_block(prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
    fill_block_xmm!(prev, reference, next, with_xor);
}
