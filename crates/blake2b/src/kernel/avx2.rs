//! AVX2 compression.
//!
//! The whole 4×4 working matrix fits in four YMM registers, one per row, so a
//! column step is a single vector G. Diagonal steps rotate rows 2-4 across
//! lanes with `vpermq`.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::{IV, SIGMA};

macro_rules! quad {
    ($w0:expr, $w1:expr, $w2:expr, $w3:expr) => {
        _mm256_set_epi64x($w3 as i64, $w2 as i64, $w1 as i64, $w0 as i64)
    };
}

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

macro_rules! g {
    ($a:ident, $b:ident, $c:ident, $d:ident, $x:expr, $y:expr) => {
        $a = _mm256_add_epi64(_mm256_add_epi64($a, $b), $x);
        $d = rotr32!(_mm256_xor_si256($d, $a));
        $c = _mm256_add_epi64($c, $d);
        $b = rotr24!(_mm256_xor_si256($b, $c));
        $a = _mm256_add_epi64(_mm256_add_epi64($a, $b), $y);
        $d = rotr16!(_mm256_xor_si256($d, $a));
        $c = _mm256_add_epi64($c, $d);
        $b = rotr63!(_mm256_xor_si256($b, $c));
    };
}

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn compress(h: &mut [u64; 8], m: &[u64; 16], counter: [u64; 2], flags: [u64; 2]) {
    let hp = h.as_mut_ptr().cast::<__m256i>();

    let mut a = _mm256_loadu_si256(hp);
    let mut b = _mm256_loadu_si256(hp.add(1));
    let mut c = quad!(IV[0], IV[1], IV[2], IV[3]);
    let mut d = _mm256_xor_si256(
        quad!(IV[4], IV[5], IV[6], IV[7]),
        quad!(counter[0], counter[1], flags[0], flags[1]),
    );

    for s in &SIGMA {
        g!(a, b, c, d,
            quad!(m[s[0]], m[s[2]], m[s[4]], m[s[6]]),
            quad!(m[s[1]], m[s[3]], m[s[5]], m[s[7]]));

        b = _mm256_permute4x64_epi64::<0b00_11_10_01>(b);
        c = _mm256_permute4x64_epi64::<0b01_00_11_10>(c);
        d = _mm256_permute4x64_epi64::<0b10_01_00_11>(d);

        g!(a, b, c, d,
            quad!(m[s[8]], m[s[10]], m[s[12]], m[s[14]]),
            quad!(m[s[9]], m[s[11]], m[s[13]], m[s[15]]));

        b = _mm256_permute4x64_epi64::<0b10_01_00_11>(b);
        c = _mm256_permute4x64_epi64::<0b01_00_11_10>(c);
        d = _mm256_permute4x64_epi64::<0b00_11_10_01>(d);
    }

    a = _mm256_xor_si256(a, c);
    b = _mm256_xor_si256(b, d);
    _mm256_storeu_si256(hp, _mm256_xor_si256(_mm256_loadu_si256(hp), a));
    _mm256_storeu_si256(hp.add(1), _mm256_xor_si256(_mm256_loadu_si256(hp.add(1)), b));
}
