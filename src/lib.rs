#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `argon2_simd` hashes passwords with Argon2 (d, i and id, version 1.3) and
//! exposes the BLAKE2b primitive underneath it. Both run on one of five
//! kernel tiers: the portable reference code, SSE2, SSSE3, SSE4.1 or AVX2.
//!
//! # Design
//!
//! - [`cpu`] probes the processor and hands out zero-sized tier tokens.
//! - [`blake2b`] and [`argon2`] are generic over those tokens, so each tier is
//!   a monomorphized copy of the same algorithm.
//! - [`Factory`] picks the best tier at runtime, checks it against embedded
//!   known answers, and returns tier-erased [`PasswordHasher`] and
//!   [`StreamingHash`] objects.
//!
//! # Invariants
//!
//! - Every tier produces byte-identical output.
//! - A [`Factory`] built without `skip_self_test` has verified every tier up
//!   to the one it selected.
//!
//! # Logging
//!
//! Everything logs through `tracing` under the targets in
//! [`logging::TARGETS`]. Enable the `subscriber` feature for
//! `init_tracing` and [`VerbosityConfig`]-driven filtering.
//!
//! # Examples
//!
//! ```
//! use argon2_simd::{Factory, FactoryConfig, Params, Tier, Variant};
//!
//! let factory = Factory::with_config(FactoryConfig::default().with_max_tier(Tier::Ref)).unwrap();
//! let hasher = factory.create_argon2(Params::default()).unwrap();
//!
//! let mut tag = [0u8; 32];
//! hasher.hash(b"password", b"somesalt", &[], &mut tag).unwrap();
//! assert_eq!(tag[..4], [0x2e, 0x2e, 0x5e, 0x05]);
//! assert!(hasher.verify(b"password", b"somesalt", &tag, &[]).unwrap());
//! ```

mod config;
mod error;
mod factory;

pub use argon2;
pub use argon2::{Argon2, BlamkaKernel, Params, PasswordHasher, Variant};
pub use blake2b;
pub use blake2b::{Blake2b, Blake2bKernel, StreamingHash, long_digest};
pub use config::FactoryConfig;
pub use cpu;
pub use cpu::{Avx2, CpuFeatures, Kernel, Portable, Sse2, Sse41, Ssse3, Tier, detect};
pub use error::{FactoryError, Result};
pub use factory::Factory;
pub use logging;
pub use logging::{MAX_LEVEL, VerbosityConfig};
#[cfg(feature = "subscriber")]
#[cfg_attr(docsrs, doc(cfg(feature = "subscriber")))]
pub use logging::{init_tracing, try_init_tracing};
