//! crates/blake2b/src/error.rs
//!
//! Error types for BLAKE2b hashing.

use thiserror::Error;

/// Result type for BLAKE2b operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a BLAKE2b state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Digest length outside `1..=64`.
    #[error("invalid digest length {0}: must be between 1 and 64 bytes")]
    InvalidDigestLength(usize),
    /// Key longer than 64 bytes.
    #[error("key of {0} bytes exceeds the 64-byte maximum")]
    KeyTooLong(usize),
    /// Output buffer shorter than the configured digest.
    #[error("output buffer holds {got} bytes but the digest needs {needed}")]
    OutputTooSmall {
        /// Configured digest length.
        needed: usize,
        /// Length of the buffer passed to `finalize_into`.
        got: usize,
    },
    /// The state was already finalized.
    #[error("BLAKE2b state already finalized")]
    AlreadyFinalized,
    /// Long-output length of zero or beyond `u32::MAX`.
    #[error("invalid long-output length {0}")]
    InvalidOutputLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_digest_length_names_the_value() {
        let err = Error::InvalidDigestLength(65);
        assert!(err.to_string().contains("65"));
        assert!(err.to_string().contains("between 1 and 64"));
    }

    #[test]
    fn output_too_small_reports_both_sizes() {
        let err = Error::OutputTooSmall { needed: 32, got: 16 };
        let message = err.to_string();
        assert!(message.contains("16"));
        assert!(message.contains("32"));
    }

    #[test]
    fn already_finalized_message() {
        assert!(Error::AlreadyFinalized.to_string().contains("finalized"));
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", Error::KeyTooLong(70));
        assert!(debug.contains("KeyTooLong"));
    }
}
