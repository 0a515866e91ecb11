//! Errors raised while building a factory or creating backends.

use cpu::Tier;
use thiserror::Error;

/// Result type for factory operations.
pub type Result<T> = std::result::Result<T, FactoryError>;

/// Errors that can occur while building a [`Factory`](crate::Factory) or
/// creating hashers from it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    /// The CPU cannot run the requested tier.
    #[error("instruction set tier {0} is not available on this CPU")]
    TierUnavailable(Tier),
    /// A known-answer check produced the wrong output.
    #[error("self-test failed for tier {tier}: {check}")]
    SelfTestFailed {
        /// Tier under test.
        tier: Tier,
        /// Name of the failing check.
        check: &'static str,
    },
    /// Argon2 parameter or hashing error.
    #[error(transparent)]
    Argon2(#[from] argon2::Error),
    /// BLAKE2b parameter error.
    #[error(transparent)]
    Blake2b(#[from] blake2b::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_test_failure_names_tier_and_check() {
        let err = FactoryError::SelfTestFailed {
            tier: Tier::Avx2,
            check: "argon2id",
        };
        assert_eq!(err.to_string(), "self-test failed for tier AVX2: argon2id");
    }

    #[test]
    fn unavailable_tier_message() {
        let err = FactoryError::TierUnavailable(Tier::Sse41);
        assert!(err.to_string().contains("SSE41"));
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: FactoryError = argon2::Error::UnsupportedLanes(3).into();
        assert_eq!(err.to_string(), argon2::Error::UnsupportedLanes(3).to_string());
        let err: FactoryError = blake2b::Error::KeyTooLong(80).into();
        assert!(matches!(err, FactoryError::Blake2b(_)));
    }
}
