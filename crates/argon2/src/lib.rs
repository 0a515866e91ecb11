#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Argon2 version 1.3 in its three flavours (d, i, id), generic over the
//! kernel tier that runs the block function and the underlying BLAKE2b.
//!
//! # Design
//!
//! - [`Params`] validates the cost parameters once; [`Geometry`] derives the
//!   matrix shape from them.
//! - [`Argon2<K>`] runs the algorithm with the tier token `K`. The token
//!   implements [`BlamkaKernel`] (and, through it, BLAKE2b's compression), so
//!   the same engine code drives every tier.
//! - The matrix is filled slice by slice. With the `parallel` feature (on by
//!   default) the lanes of a slice run as rayon tasks and the end of the
//!   slice is the barrier.
//! - [`PasswordHasher`] erases the tier for runtime dispatch.
//!
//! # Invariants
//!
//! - The owned matrix, the pre-hash and intermediate tag material are wiped
//!   when released.
//! - Every tier produces identical output for identical inputs.
//!
//! # Examples
//!
//! ```
//! use argon2::{Argon2, Params, Variant};
//! use cpu::{Kernel, Portable, Sse2};
//!
//! let params = Params::new(Variant::Argon2id, 2, 64, 2).unwrap();
//! let mut reference = [0u8; 32];
//! Argon2::new(Portable, params.clone())
//!     .hash(b"password", b"somesalt", &[], &mut reference)
//!     .unwrap();
//!
//! if let Some(sse2) = Sse2::detect() {
//!     let mut fast = [0u8; 32];
//!     Argon2::new(sse2, params)
//!         .hash(b"password", b"somesalt", &[], &mut fast)
//!         .unwrap();
//!     assert_eq!(fast, reference);
//! }
//! ```

mod block;
mod engine;
mod error;
mod fill;
mod hasher;
mod index;
mod kernel;
mod memory;
mod params;

pub use block::{BLOCK_BYTES, BLOCK_WORDS, Block};
pub use engine::Argon2;
pub use error::{Error, Result};
pub use hasher::PasswordHasher;
pub use kernel::BlamkaKernel;
pub use params::{Geometry, MAX_SECRET_BYTES, MIN_OUTPUT_BYTES, Params, SYNC_POINTS, VERSION, Variant};
