//! crates/argon2/src/error.rs
//!
//! Error types for Argon2 parameter validation and hashing.

use thiserror::Error;

/// Result type for Argon2 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building parameters or hashing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `time_cost` was zero.
    #[error("time cost must be at least 1")]
    TimeCostTooSmall,
    /// `memory_cost` was zero.
    #[error("memory cost must be at least 1 KiB")]
    MemoryCostTooSmall,
    /// Lane count outside {1, 2, 4}.
    #[error("unsupported lane count {0}: expected 1, 2 or 4")]
    UnsupportedLanes(u32),
    /// Secret longer than 32 bytes.
    #[error("secret of {0} bytes exceeds the 32-byte maximum")]
    SecretTooLong(usize),
    /// Requested tag shorter than 4 bytes.
    #[error("output of {0} bytes is shorter than the 4-byte minimum")]
    OutputTooShort(usize),
    /// An input whose length does not fit in 32 bits.
    #[error("{what} of {len} bytes is too long")]
    InputTooLong {
        /// Which input: `"password"`, `"salt"` or `"associated data"`.
        what: &'static str,
        /// Its length.
        len: usize,
    },
    /// Caller-provided memory is smaller than the matrix.
    #[error("memory buffer of {provided} bytes is smaller than the required {required}")]
    InsufficientMemory {
        /// Bytes the matrix needs.
        required: usize,
        /// Bytes supplied.
        provided: usize,
    },
    /// Caller-provided memory does not start on an 8-byte boundary.
    #[error("memory buffer is not 8-byte aligned")]
    MisalignedMemory,
    /// The underlying BLAKE2b call failed.
    #[error(transparent)]
    Blake2b(#[from] blake2b::Error),
    /// A variant name that is not `Argon2d`, `Argon2i` or `Argon2id`.
    #[error("unknown Argon2 variant {0:?}")]
    UnknownVariant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_memory_reports_sizes() {
        let err = Error::InsufficientMemory {
            required: 8192,
            provided: 8191,
        };
        let message = err.to_string();
        assert!(message.contains("8192"));
        assert!(message.contains("8191"));
    }

    #[test]
    fn input_too_long_names_the_input() {
        let err = Error::InputTooLong {
            what: "salt",
            len: usize::MAX,
        };
        assert!(err.to_string().starts_with("salt of"));
    }

    #[test]
    fn blake2b_errors_convert() {
        let err: Error = blake2b::Error::AlreadyFinalized.into();
        assert!(matches!(err, Error::Blake2b(blake2b::Error::AlreadyFinalized)));
        assert!(err.to_string().contains("finalized"));
    }

    #[test]
    fn unknown_variant_quotes_input() {
        assert_eq!(
            Error::UnknownVariant("argon3".to_owned()).to_string(),
            "unknown Argon2 variant \"argon3\""
        );
    }
}
