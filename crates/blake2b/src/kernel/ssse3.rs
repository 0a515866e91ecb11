//! SSSE3 compression.
//!
//! Same two-registers-per-row layout as SSE2. `pshufb` turns the 24- and
//! 16-bit rotations into single byte shuffles and `palignr` replaces the
//! unpack sequences when rotating rows 2 and 4 across their register pair.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::sse2::{half_g, pair, rotr32, rotr63};
use super::{IV, SIGMA};

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
    ($r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident) => {{
        let (t2l, t2h, t4l, t4h) = ($r2l, $r2h, $r4l, $r4h);
        $r2l = _mm_alignr_epi8::<8>(t2h, t2l);
        $r2h = _mm_alignr_epi8::<8>(t2l, t2h);
        ::std::mem::swap(&mut $r3l, &mut $r3h);
        $r4l = _mm_alignr_epi8::<8>(t4l, t4h);
        $r4h = _mm_alignr_epi8::<8>(t4h, t4l);
    }};
}

macro_rules! undiagonalize {
    ($r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident) => {{
        let (t2l, t2h, t4l, t4h) = ($r2l, $r2h, $r4l, $r4h);
        $r2l = _mm_alignr_epi8::<8>(t2l, t2h);
        $r2h = _mm_alignr_epi8::<8>(t2h, t2l);
        ::std::mem::swap(&mut $r3l, &mut $r3h);
        $r4l = _mm_alignr_epi8::<8>(t4h, t4l);
        $r4h = _mm_alignr_epi8::<8>(t4l, t4h);
    }};
}

/// One full round over message schedule row `s`; `$load` builds a register
/// from two message words.
macro_rules! round {
    ($r1l:ident, $r1h:ident, $r2l:ident, $r2h:ident, $r3l:ident, $r3h:ident, $r4l:ident, $r4h:ident,
     $m:ident, $s:ident, $load:ident) => {
        half_g!($r1l, $r1h, $r2l, $r2h, $r3l, $r3h, $r4l, $r4h,
            $load!($m, $s[0], $s[2]), $load!($m, $s[4], $s[6]), rotr32, rotr24);
        half_g!($r1l, $r1h, $r2l, $r2h, $r3l, $r3h, $r4l, $r4h,
            $load!($m, $s[1], $s[3]), $load!($m, $s[5], $s[7]), rotr16, rotr63);
        diagonalize!($r2l, $r2h, $r3l, $r3h, $r4l, $r4h);
        half_g!($r1l, $r1h, $r2l, $r2h, $r3l, $r3h, $r4l, $r4h,
            $load!($m, $s[8], $s[10]), $load!($m, $s[12], $s[14]), rotr32, rotr24);
        half_g!($r1l, $r1h, $r2l, $r2h, $r3l, $r3h, $r4l, $r4h,
            $load!($m, $s[9], $s[11]), $load!($m, $s[13], $s[15]), rotr16, rotr63);
        undiagonalize!($r2l, $r2h, $r3l, $r3h, $r4l, $r4h);
    };
}

pub(super) use {diagonalize, rotr16, rotr24, round, undiagonalize};

macro_rules! set_pair {
    ($m:ident, $lo:expr, $hi:expr) => {
        pair!($m[$lo], $m[$hi])
    };
}

/// # Safety
///
/// The CPU must support SSSE3.
#[target_feature(enable = "ssse3")]
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
        round!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h, m, s, set_pair);
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
