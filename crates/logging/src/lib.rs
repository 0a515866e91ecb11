#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the workspace's diagnostics conventions: one `tracing`
//! target per subsystem, a numeric verbosity that maps onto filter
//! directives, and (behind the `subscriber` feature) helpers that install a
//! subscriber honouring both.
//!
//! # Design
//!
//! - The `trace_*!` macros wrap the `tracing` macros with a fixed target and
//!   level, so call sites never spell target strings.
//! - [`VerbosityConfig`] turns a level into an `EnvFilter` directive string.
//!   It is plain data and optionally serde-serializable.
//! - `init_tracing` and `try_init_tracing` build a registry with that filter
//!   and a stderr fmt layer. `RUST_LOG` overrides the level when set.
//!
//! Hot loops never log; events are emitted per hash call, per dispatch
//! decision and per self-tested tier.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let config = VerbosityConfig::from_verbose_level(1);
//! assert!(config.directives().contains("argon2::selftest=info"));
//! ```

mod config;
#[cfg(feature = "subscriber")]
#[cfg_attr(docsrs, doc(cfg(feature = "subscriber")))]
mod tracing_bridge;
#[doc(hidden)]
pub mod tracing_macros;

pub use config::{MAX_LEVEL, VerbosityConfig};
pub use tracing_macros::TARGETS;

#[cfg(feature = "subscriber")]
pub use tracing_bridge::{env_filter, init_tracing, try_init_tracing};

#[doc(hidden)]
pub use tracing;
