//! SSE2 compression.
//!
//! Each state row of four words lives in two XMM registers (`l` holds words
//! 0-1, `h` words 2-3). SSE2 has no byte shuffle, so the 24/16/63-bit
//! rotations are shift pairs and diagonalization is built from 64-bit
//! unpacks.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::{IV, SIGMA};

/// Packs two words into one register, `lo` in the low lane.
macro_rules! pair {
    ($lo:expr, $hi:expr) => {
        _mm_set_epi64x($hi as i64, $lo as i64)
    };
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

macro_rules! half_g {
    ($r1l:ident, $r1h:ident, $r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident,
     $b0:expr, $b1:expr, $rot_d:ident, $rot_b:ident) => {
        $r1l = _mm_add_epi64(_mm_add_epi64($r1l, $b0), $r2l);
        $r1h = _mm_add_epi64(_mm_add_epi64($r1h, $b1), $r2h);
        $r4l = $rot_d!(_mm_xor_si128($r4l, $r1l));
        $r4h = $rot_d!(_mm_xor_si128($r4h, $r1h));
        $r3l = _mm_add_epi64($r3l, $r4l);
        $r3h = _mm_add_epi64($r3h, $r4h);
        $r2l = $rot_b!(_mm_xor_si128($r2l, $r3l));
        $r2h = $rot_b!(_mm_xor_si128($r2h, $r3h));
    };
}

/// Rotates row 2 left by one word, swaps the halves of row 3 and rotates
/// row 4 right by one word.
macro_rules! diagonalize {
    ($r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident) => {{
        let (t2l, t2h, t4l, t4h) = ($r2l, $r2h, $r4l, $r4h);
        $r2l = _mm_unpackhi_epi64(t2l, _mm_unpacklo_epi64(t2h, t2h));
        $r2h = _mm_unpackhi_epi64(t2h, _mm_unpacklo_epi64(t2l, t2l));
        ::std::mem::swap(&mut $r3l, &mut $r3h);
        $r4l = _mm_unpackhi_epi64(t4h, _mm_unpacklo_epi64(t4l, t4l));
        $r4h = _mm_unpackhi_epi64(t4l, _mm_unpacklo_epi64(t4h, t4h));
    }};
}

macro_rules! undiagonalize {
    ($r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident) => {{
        let (t2l, t2h, t4l, t4h) = ($r2l, $r2h, $r4l, $r4h);
        $r2l = _mm_unpackhi_epi64(t2h, _mm_unpacklo_epi64(t2l, t2l));
        $r2h = _mm_unpackhi_epi64(t2l, _mm_unpacklo_epi64(t2h, t2h));
        ::std::mem::swap(&mut $r3l, &mut $r3h);
        $r4l = _mm_unpackhi_epi64(t4l, _mm_unpacklo_epi64(t4h, t4h));
        $r4h = _mm_unpackhi_epi64(t4h, _mm_unpacklo_epi64(t4l, t4l));
    }};
}

pub(super) use {half_g, pair, rotr32, rotr63};

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn compress(h: &mut [u64; 8], m: &[u64; 16], counter: [u64; 2], flags: [u64; 2]) {
    let hp = h.as_mut_ptr().cast::<__m128i>();

    let mut row1l = _mm_loadu_si128(hp);
    let mut row1h = _mm_loadu_si128(hp.add(1));
    let mut row2l = _mm_loadu_si128(hp.add(2));
    let mut row2h = _mm_loadu_si128(hp.add(3));
    let mut row3l = pair!(IV[0], IV[1]);
    let mut row3h = pair!(IV[2], IV[3]);
    let mut row4l = _mm_xor_si128(pair!(IV[4], IV[5]), pair!(counter[0], counter[1]));
    let mut row4h = _mm_xor_si128(pair!(IV[6], IV[7]), pair!(flags[0], flags[1]));

    for s in &SIGMA {
        half_g!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h,
            pair!(m[s[0]], m[s[2]]), pair!(m[s[4]], m[s[6]]), rotr32, rotr24);
        half_g!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h,
            pair!(m[s[1]], m[s[3]]), pair!(m[s[5]], m[s[7]]), rotr16, rotr63);
        diagonalize!(row2l, row2h, row3l, row3h, row4l, row4h);
        half_g!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h,
            pair!(m[s[8]], m[s[10]]), pair!(m[s[12]], m[s[14]]), rotr32, rotr24);
        half_g!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h,
            pair!(m[s[9]], m[s[11]]), pair!(m[s[13]], m[s[15]]), rotr16, rotr63);
        undiagonalize!(row2l, row2h, row3l, row3h, row4l, row4h);
    }

    row1l = _mm_xor_si128(row1l, row3l);
    row1h = _mm_xor_si128(row1h, row3h);
    row2l = _mm_xor_si128(row2l, row4l);
    row2h = _mm_xor_si128(row2h, row4h);

    _mm_storeu_si128(hp, _mm_xor_si128(_mm_loadu_si128(hp), row1l));
    _mm_storeu_si128(hp.add(1), _mm_xor_si128(_mm_loadu_si128(hp.add(1)), row1h));
    _mm_storeu_si128(hp.add(2), _mm_xor_si128(_mm_loadu_si128(hp.add(2)), row2l));
    _mm_storeu_si128(hp.add(3), _mm_xor_si128(_mm_loadu_si128(hp.add(3)), row2h));
}
