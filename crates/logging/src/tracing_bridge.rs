//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for binaries, benches and tests.
//!
//! Library crates only emit events. Whoever owns `main` decides whether and
//! where they go; these helpers install a `tracing-subscriber` registry with
//! an `EnvFilter` derived from [`VerbosityConfig`] and a formatting layer on
//! stderr. A set `RUST_LOG` takes precedence over the configured level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(1));
//! // Tier selection and self-test results now reach stderr.
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use super::config::VerbosityConfig;

/// Builds the filter: `RUST_LOG` when set and valid, the config otherwise.
pub fn env_filter(config: VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()))
}

/// Installs the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already set; use [`try_init_tracing`]
/// where that can happen, such as in tests.
pub fn init_tracing(config: VerbosityConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Installs the global subscriber unless one is already set.
pub fn try_init_tracing(config: VerbosityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_renders_configured_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!("skipping: RUST_LOG overrides the configured filter");
            return;
        }
        let filter = env_filter(VerbosityConfig::from_verbose_level(1));
        let rendered = filter.to_string();
        assert!(rendered.contains("argon2::dispatch=info"), "{rendered}");
    }

    #[test]
    fn second_install_is_rejected() {
        let _ = try_init_tracing(VerbosityConfig::default());
        assert!(try_init_tracing(VerbosityConfig::default()).is_err());
    }
}
