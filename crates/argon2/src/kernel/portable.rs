//! Scalar reference block function.

use crate::block::{BLOCK_WORDS, Block};

#[inline(always)]
fn blamka(x: u64, y: u64) -> u64 {
    let product = (x & 0xffff_ffff) * (y & 0xffff_ffff);
    x.wrapping_add(y).wrapping_add(product.wrapping_mul(2))
}

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize) {
    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// Applies the permutation P to the sixteen words of `r` at `idx`.
#[inline(always)]
fn permute(r: &mut [u64; BLOCK_WORDS], idx: [usize; 16]) {
    let mut v = idx.map(|i| r[i]);

    g(&mut v, 0, 4, 8, 12);
    g(&mut v, 1, 5, 9, 13);
    g(&mut v, 2, 6, 10, 14);
    g(&mut v, 3, 7, 11, 15);
    g(&mut v, 0, 5, 10, 15);
    g(&mut v, 1, 6, 11, 12);
    g(&mut v, 2, 7, 8, 13);
    g(&mut v, 3, 4, 9, 14);

    for (word, i) in v.into_iter().zip(idx) {
        r[i] = word;
    }
}

pub(super) fn fill_block(prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
    let mut r = *reference;
    r ^= prev;
    let mut tmp = r;
    if with_xor {
        tmp ^= &*next;
    }

    for row in 0..8 {
        permute(&mut r.0, std::array::from_fn(|k| 16 * row + k));
    }
    // Column i is the word pair (2i, 2i + 1) taken from each of the 8 rows.
    for column in 0..8 {
        permute(&mut r.0, std::array::from_fn(|k| 2 * column + 16 * (k / 2) + k % 2));
    }

    *next = tmp;
    *next ^= &r;
}
