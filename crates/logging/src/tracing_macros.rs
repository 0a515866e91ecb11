//! crates/logging/src/tracing_macros.rs
//! Target-fixed wrappers around the `tracing` macros.
//!
//! Each subsystem logs under its own target so a filter such as
//! `argon2::selftest=info,argon2::fill=off` can isolate it. The expansions
//! name `::tracing` directly, so calling crates need `tracing` as a
//! dependency.

/// Tier selection and kernel dispatch decisions.
///
/// # Example
/// ```ignore
/// trace_dispatch!(tier = %tier, "selected kernel tier");
/// ```
#[macro_export]
macro_rules! trace_dispatch {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "argon2::dispatch", $($arg)*);
    };
}

/// Self-test progress and outcomes.
///
/// # Example
/// ```ignore
/// trace_selftest!(tier = %tier, "self-test passed");
/// ```
#[macro_export]
macro_rules! trace_selftest {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "argon2::selftest", $($arg)*);
    };
}

/// One line per Argon2 hash call.
///
/// # Example
/// ```ignore
/// trace_engine!(variant = %variant, blocks, "hashing");
/// ```
#[macro_export]
macro_rules! trace_engine {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "argon2::engine", $($arg)*);
    };
}

/// Memory-fill scheduling (per pass, never per block).
///
/// # Example
/// ```ignore
/// trace_fill!(pass, "filling pass");
/// ```
#[macro_export]
macro_rules! trace_fill {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "argon2::fill", $($arg)*);
    };
}

/// BLAKE2b helpers above the compression function.
///
/// # Example
/// ```ignore
/// trace_blake2b!(output_len, "long digest");
/// ```
#[macro_export]
macro_rules! trace_blake2b {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "argon2::blake2b", $($arg)*);
    };
}

/// Every target used by the macros above.
pub const TARGETS: [&str; 5] = [
    "argon2::dispatch",
    "argon2::selftest",
    "argon2::engine",
    "argon2::fill",
    "argon2::blake2b",
];

#[cfg(test)]
mod tests {
    use super::TARGETS;

    #[test]
    fn macros_expand_without_a_subscriber() {
        trace_dispatch!(tier = "avx2", "selected");
        trace_selftest!("passed");
        trace_engine!(blocks = 8u32, "hashing");
        trace_fill!(pass = 0u32, "filling");
        trace_blake2b!("digest");
    }

    #[test]
    fn targets_share_a_prefix() {
        assert!(TARGETS.iter().all(|t| t.starts_with("argon2::")));
    }
}
