//! Shared helpers for the workspace's integration tests.
//!
//! Holds hex conversion, an 8-byte aligned scratch buffer for the
//! caller-provided-memory APIs, the RFC 7693 input generator and the Argon2
//! known-answer vectors that every kernel tier is checked against.

mod vectors;

pub use vectors::{
    ARGON2_VECTORS, Argon2Vector, GENKAT_AAD, GENKAT_PASSWORD, GENKAT_SALT, GENKAT_SECRET,
    RFC7693_SELFTEST_DIGEST,
};

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decodes a lowercase or uppercase hex string.
///
/// # Panics
///
/// Panics on odd length or non-hex characters; fixtures are expected to be
/// well formed.
pub fn from_hex(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "odd-length hex string: {hex}");
    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).expect("ascii hex");
            u8::from_str_radix(text, 16).unwrap_or_else(|_| panic!("invalid hex digits {text:?}"))
        })
        .collect()
}

/// RFC 7693 Appendix E deterministic input generator.
pub fn rfc7693_sequence(len: usize, seed: u32) -> Vec<u8> {
    let mut a = 0xDEAD_4BADu32.wrapping_mul(seed);
    let mut b = 1u32;
    (0..len)
        .map(|_| {
            let t = a.wrapping_add(b);
            a = b;
            b = t;
            (t >> 24) as u8
        })
        .collect()
}

/// Decodes `hex` into exactly `N` bytes, panicking on any other length.
pub fn hex_array<const N: usize>(hex: &str) -> [u8; N] {
    from_hex(hex)
        .try_into()
        .unwrap_or_else(|bytes: Vec<u8>| panic!("expected {N} bytes, got {}: {hex}", bytes.len()))
}

/// Byte buffer whose start is 8-byte aligned.
///
/// Argon2 views caller memory as 1 KiB blocks of `u64` words; a `Vec<u8>`
/// gives no alignment guarantee, so tests allocate through this instead.
pub struct AlignedBytes {
    words: Vec<u64>,
    len: usize,
}

impl AlignedBytes {
    /// Zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutable byte view.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let len = self.len;
        // SAFETY: `words` owns at least `len` initialized bytes and u8 has no
        // alignment or validity requirements.
        unsafe { std::slice::from_raw_parts_mut(self.words.as_mut_ptr().cast::<u8>(), len) }
    }

    /// Shared byte view.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: as for `as_mut_bytes`.
        unsafe { std::slice::from_raw_parts(self.words.as_ptr().cast::<u8>(), self.len) }
    }
}
