#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Streaming BLAKE2b (RFC 7693) with optional keying, plus the variable-length
//! construction `H'` that Argon2 builds on.
//!
//! # Design
//!
//! [`Blake2b`] owns the chaining state and input buffer and is generic over a
//! [`Blake2bKernel`], the compression function for one CPU tier. Tier tokens
//! come from the `cpu` crate; a SIMD token exists only after runtime
//! detection, so `Blake2b<Avx2>` can never be built on a machine without AVX2.
//!
//! [`StreamingHash`] erases the tier for callers that pick a kernel at
//! runtime.
//!
//! # Examples
//!
//! ```
//! use blake2b::{Blake2b, Kernel, Portable, Sse2};
//!
//! let mut reference = Blake2b::new(Portable, 64).unwrap();
//! reference.update(b"hello").unwrap();
//! let expected = reference.finalize_vec().unwrap();
//!
//! if let Some(sse2) = Sse2::detect() {
//!     let mut fast = Blake2b::new(sse2, 64).unwrap();
//!     fast.update(b"hel").unwrap();
//!     fast.update(b"lo").unwrap();
//!     assert_eq!(fast.finalize_vec().unwrap(), expected);
//! }
//! ```

mod error;
mod kernel;
mod long;
mod state;

pub use cpu::{Avx2, Kernel, Portable, Sse2, Sse41, Ssse3, Tier};
pub use error::{Error, Result};
pub use kernel::Blake2bKernel;
pub use long::long_digest;
pub use state::{Blake2b, StreamingHash};

/// Compression block size in bytes.
pub const BLOCK_BYTES: usize = 128;

/// Largest digest a single state produces.
pub const MAX_DIGEST_BYTES: usize = 64;

/// Largest accepted key.
pub const MAX_KEY_BYTES: usize = 64;

/// One-shot keyed or unkeyed digest of `input` into `out`.
///
/// The digest length is `out.len()`.
pub fn digest_into<K: Blake2bKernel>(kernel: K, key: &[u8], input: &[u8], out: &mut [u8]) -> Result<()> {
    let mut state = Blake2b::with_key(kernel, out.len(), key)?;
    state.update(input)?;
    state.finalize_into(out)
}
