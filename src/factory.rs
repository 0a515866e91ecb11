//! Runtime backend selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use argon2::{Argon2, Params, PasswordHasher};
use blake2b::{Blake2b, StreamingHash};
use cpu::Tier;
use logging::trace_dispatch;

use crate::config::FactoryConfig;
use crate::error::Result;
use crate::self_test;

/// Binds `$kernel` to the token for `$tier` and evaluates `$body`, or returns
/// `TierUnavailable` when the CPU cannot run that tier.
macro_rules! with_kernel {
    (@token $token:ty, $kernel:ident => $body:expr) => {
        match <$token as ::cpu::Kernel>::detect() {
            Some($kernel) => $body,
            None => Err($crate::FactoryError::TierUnavailable(
                <$token as ::cpu::Kernel>::TIER,
            )),
        }
    };
    ($tier:expr, $kernel:ident => $body:expr) => {
        match $tier {
            ::cpu::Tier::Ref => with_kernel!(@token ::cpu::Portable, $kernel => $body),
            ::cpu::Tier::Sse2 => with_kernel!(@token ::cpu::Sse2, $kernel => $body),
            ::cpu::Tier::Ssse3 => with_kernel!(@token ::cpu::Ssse3, $kernel => $body),
            ::cpu::Tier::Sse41 => with_kernel!(@token ::cpu::Sse41, $kernel => $body),
            ::cpu::Tier::Avx2 => with_kernel!(@token ::cpu::Avx2, $kernel => $body),
        }
    };
}
pub(crate) use with_kernel;

/// Hands out Argon2 and BLAKE2b backends for the best tier this CPU runs.
///
/// Construction resolves the tier once and, unless told otherwise, runs the
/// known-answer self-test for every tier up to it. A factory that exists has
/// passed that gate.
///
/// # Examples
///
/// ```
/// use argon2_simd::{Factory, Params, Variant};
///
/// let factory = Factory::new().unwrap();
/// let hasher = factory
///     .create_argon2(Params::new(Variant::Argon2id, 1, 64, 1).unwrap())
///     .unwrap();
///
/// let mut tag = [0u8; 32];
/// hasher.hash(b"password", b"somesalt", &[], &mut tag).unwrap();
/// assert_eq!(hasher.tier(), factory.tier());
/// ```
#[derive(Clone, Debug)]
pub struct Factory {
    tier: Tier,
    config: FactoryConfig,
    /// One bit per tier that has passed the self-test.
    verified: Arc<AtomicU8>,
}

impl Factory {
    /// Detects the tier and runs the self-test.
    pub fn new() -> Result<Self> {
        Self::with_config(FactoryConfig::default())
    }

    /// Detects the tier, applies `config` and runs the self-test unless it
    /// is skipped.
    pub fn with_config(config: FactoryConfig) -> Result<Self> {
        let detected = cpu::detect();
        let tier = config.resolve(detected);
        trace_dispatch!(
            detected = %detected,
            selected = %tier,
            capped = config.max_tier.is_some(),
            "resolved instruction set tier"
        );

        let mut verified = 0;
        if config.skip_self_test {
            trace_dispatch!(tier = %tier, "self-test skipped");
        } else {
            for candidate in tier.up_to() {
                self_test::run(candidate)?;
                verified |= tier_bit(candidate);
            }
        }

        Ok(Self {
            tier,
            config,
            verified: Arc::new(AtomicU8::new(verified)),
        })
    }

    /// Detects the tier without running the self-test.
    pub fn without_self_test() -> Result<Self> {
        Self::with_config(FactoryConfig::default().with_skip_self_test(true))
    }

    /// Runs the known-answer checks for one tier.
    ///
    /// Fails with [`TierUnavailable`](crate::FactoryError::TierUnavailable)
    /// when the CPU cannot run `tier`.
    pub fn self_test(tier: Tier) -> Result<()> {
        self_test::run(tier)
    }

    /// Selected tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Configuration the factory was built with.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Whether `tier` has passed the self-test on this factory.
    ///
    /// Always false when the self-test is skipped.
    pub fn is_verified(&self, tier: Tier) -> bool {
        self.verified.load(Ordering::Acquire) & tier_bit(tier) != 0
    }

    /// Self-tests an explicitly requested tier the first time it is used.
    fn gate(&self, tier: Tier) -> Result<()> {
        if self.config.skip_self_test || self.is_verified(tier) {
            return Ok(());
        }
        trace_dispatch!(tier = %tier, selected = %self.tier, "self-testing explicit tier");
        self_test::run(tier)?;
        self.verified.fetch_or(tier_bit(tier), Ordering::AcqRel);
        Ok(())
    }

    /// Argon2 hasher on the selected tier.
    pub fn create_argon2(&self, params: Params) -> Result<Box<dyn PasswordHasher>> {
        self.create_argon2_for(self.tier, params)
    }

    /// Argon2 hasher on an explicit tier.
    ///
    /// A tier above the selected one is self-tested before first use unless
    /// the factory skips the self-test.
    pub fn create_argon2_for(&self, tier: Tier, params: Params) -> Result<Box<dyn PasswordHasher>> {
        trace_dispatch!(tier = %tier, variant = %params.variant(), "creating argon2 backend");
        self.gate(tier)?;
        with_kernel!(tier, kernel => {
            let hasher: Box<dyn PasswordHasher> = Box::new(Argon2::new(kernel, params));
            Ok(hasher)
        })
    }

    /// BLAKE2b state on the selected tier. An empty `key` means unkeyed.
    pub fn create_blake2b(&self, digest_len: usize, key: &[u8]) -> Result<Box<dyn StreamingHash>> {
        self.create_blake2b_for(self.tier, digest_len, key)
    }

    /// BLAKE2b state on an explicit tier, gated like
    /// [`create_argon2_for`](Self::create_argon2_for).
    pub fn create_blake2b_for(&self, tier: Tier, digest_len: usize, key: &[u8]) -> Result<Box<dyn StreamingHash>> {
        trace_dispatch!(tier = %tier, digest_len, keyed = !key.is_empty(), "creating blake2b backend");
        self.gate(tier)?;
        with_kernel!(tier, kernel => {
            let state: Box<dyn StreamingHash> = Box::new(Blake2b::with_key(kernel, digest_len, key)?);
            Ok(state)
        })
    }
}

const fn tier_bit(tier: Tier) -> u8 {
    1 << tier as u8
}

#[cfg(test)]
mod tests {
    use argon2::Variant;
    use cpu::Kernel;

    use super::*;
    use crate::error::FactoryError;

    fn unchecked(max_tier: Tier) -> Factory {
        let config = FactoryConfig::default()
            .with_max_tier(max_tier)
            .with_skip_self_test(true);
        Factory::with_config(config).unwrap()
    }

    #[test]
    fn reference_cap_always_works() {
        let factory = unchecked(Tier::Ref);
        assert_eq!(factory.tier(), Tier::Ref);
        assert!(factory.config().skip_self_test);

        let hasher = factory.create_argon2(Params::default()).unwrap();
        assert_eq!(hasher.tier(), Tier::Ref);
        assert_eq!(hasher.variant(), Variant::Argon2d);
    }

    #[test]
    fn with_kernel_reports_the_requested_tier() {
        for tier in Tier::ALL {
            let result: Result<Tier> = with_kernel!(tier, kernel => Ok(kernel.tier()));
            match result {
                Ok(actual) => assert_eq!(actual, tier),
                Err(err) => assert_eq!(err, FactoryError::TierUnavailable(tier)),
            }
        }
    }

    #[test]
    fn construction_verifies_every_tier_up_to_the_selected_one() {
        let factory = Factory::with_config(FactoryConfig::default().with_max_tier(Tier::Ref)).unwrap();
        assert!(factory.is_verified(Tier::Ref));
        assert!(!factory.is_verified(Tier::Sse2));

        assert!(!unchecked(Tier::Ref).is_verified(Tier::Ref));
    }

    #[test]
    fn explicit_tier_above_the_cap_is_self_tested() {
        if cpu::Sse2::detect().is_none() {
            eprintln!("skipping: SSE2 not supported on this CPU");
            return;
        }
        let factory = Factory::with_config(FactoryConfig::default().with_max_tier(Tier::Ref)).unwrap();
        let copy = factory.clone();
        factory.create_argon2_for(Tier::Sse2, Params::default()).unwrap();
        assert!(factory.is_verified(Tier::Sse2));
        assert!(copy.is_verified(Tier::Sse2));
        assert_eq!(factory.tier(), Tier::Ref);

        let skipped = unchecked(Tier::Ref);
        skipped.create_blake2b_for(Tier::Sse2, 32, &[]).unwrap();
        assert!(!skipped.is_verified(Tier::Sse2));
    }

    #[test]
    fn tier_bits_are_distinct() {
        let mut seen = 0u8;
        for tier in Tier::ALL {
            assert_eq!(seen & tier_bit(tier), 0);
            seen |= tier_bit(tier);
        }
    }

    #[test]
    fn blake2b_parameter_errors_propagate() {
        let factory = unchecked(Tier::Ref);
        let err = factory.create_blake2b(0, &[]).err().unwrap();
        assert_eq!(err, FactoryError::Blake2b(blake2b::Error::InvalidDigestLength(0)));
        let err = factory.create_blake2b(32, &[0u8; 65]).err().unwrap();
        assert_eq!(err, FactoryError::Blake2b(blake2b::Error::KeyTooLong(65)));
    }

    #[test]
    fn blake2b_backend_digests() {
        let factory = unchecked(Tier::Ref);
        let mut state = factory.create_blake2b(16, &[]).unwrap();
        state.update(b"abc").unwrap();
        let mut out = [0u8; 16];
        state.finalize_into(&mut out).unwrap();
        assert_eq!(test_support::to_hex(&out), "cf4ab791c62b8d2b2109c90275287816");
        assert_eq!(state.digest_len(), 16);
        assert_eq!(state.tier(), Tier::Ref);
    }
}
