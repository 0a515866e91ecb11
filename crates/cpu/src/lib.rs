#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cpu` answers one question for the hashing crates: which instruction-set
//! tier may this process run? The answer is a [`Tier`], a totally ordered
//! enumeration from the portable reference code up to AVX2.
//!
//! # Design
//!
//! Detection is split in two halves:
//!
//! - [`CpuFeatures`] is a plain set of booleans. [`CpuFeatures::best_tier`] is a
//!   pure function over it, so the precedence rules are testable on any host.
//! - [`CpuFeatures::probe`] fills the set from CPUID (via `raw-cpuid`) and XCR0.
//!   [`detect`] caches the probed tier for the lifetime of the process.
//!
//! Kernels are selected through zero-sized *tokens* implementing [`Kernel`].
//! A SIMD token can only be obtained from [`Kernel::detect`], which checks the
//! target features the kernel is compiled for. Generic code that holds a token
//! may therefore call that tier's kernels without further checks.
//!
//! # Examples
//!
//! ```
//! use cpu::{CpuFeatures, Kernel, Portable, Tier};
//!
//! let features = CpuFeatures {
//!     sse2: true,
//!     ssse3: true,
//!     ..CpuFeatures::default()
//! };
//! assert_eq!(features.best_tier(), Tier::Ssse3);
//!
//! // The reference tier is always available.
//! assert_eq!(Portable::detect().map(Kernel::tier), Some(Tier::Ref));
//! ```

mod features;
mod tier;
mod token;

pub use features::{CpuFeatures, detect};
pub use tier::{ParseTierError, Tier};
pub use token::{Avx2, Kernel, Portable, Sse2, Sse41, Ssse3};
