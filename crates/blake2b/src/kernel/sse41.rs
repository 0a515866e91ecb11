//! SSE4.1 compression.
//!
//! Runs the SSSE3 round network; message word pairs are assembled with
//! `movq` + `pinsrq` instead of going through the stack.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::sse2::{half_g, pair, rotr32, rotr63};
use super::ssse3::{diagonalize, rotr16, rotr24, round, undiagonalize};
use super::{IV, SIGMA};

macro_rules! insert_pair {
    ($m:ident, $lo:expr, $hi:expr) => {
        _mm_insert_epi64::<1>(_mm_cvtsi64_si128($m[$lo] as i64), $m[$hi] as i64)
    };
}

/// # Safety
///
/// The CPU must support SSE4.1.
#[target_feature(enable = "sse4.1")]
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
        round!(row1l, row1h, row2l, row2h, row3l, row3h, row4l, row4h, m, s, insert_pair);
    }

    _mm_storeu_si128(hp, _mm_xor_si128(_mm_loadu_si128(hp), _mm_xor_si128(row1l, row3l)));
    _mm_storeu_si128(
        hp.add(1),
        _mm_xor_si128(_mm_loadu_si128(hp.add(1)), _mm_xor_si128(row1h, row3h)),
    );
    _mm_storeu_si128(
        hp.add(2),
        _mm_xor_si128(_mm_loadu_si128(hp.add(2)), _mm_xor_si128(row2l, row4l)),
    );
    _mm_storeu_si128(
        hp.add(3),
        _mm_xor_si128(_mm_loadu_si128(hp.add(3)), _mm_xor_si128(row2h, row4h)),
    );
}
