//! Zero-sized kernel tokens, one per tier.
//!
//! A token is proof that the running CPU supports the target features its
//! tier's kernels are compiled with. Only [`Portable`] can be constructed
//! freely; every SIMD token has a private field and is handed out by
//! [`Kernel::detect`] after a runtime feature check. Hashing crates implement
//! their kernel traits for these types and dispatch on the token type, so a
//! generic `Engine<K: Kernel>` never reaches an instruction the CPU lacks.

use std::fmt::Debug;

use crate::Tier;

/// Common interface of the tier tokens.
pub trait Kernel: Copy + Debug + Send + Sync + 'static {
    /// Tier whose kernels this token unlocks.
    const TIER: Tier;

    /// Returns a token when the running CPU can execute this tier.
    fn detect() -> Option<Self>;

    /// Tier of this token.
    fn tier(self) -> Tier {
        Self::TIER
    }
}

/// Portable scalar kernels; always available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Portable;

/// SSE2 kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sse2(());

/// SSSE3 kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ssse3(());

/// SSE4.1 kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sse41(());

/// AVX2 kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Avx2(());

impl Kernel for Portable {
    const TIER: Tier = Tier::Ref;

    fn detect() -> Option<Self> {
        Some(Self)
    }
}

// `is_x86_feature_detected!` caches its answer, so detection is cheap enough
// to repeat on every factory call.
macro_rules! x86_token {
    ($token:ident, $tier:expr, $($feature:tt),+) => {
        impl Kernel for $token {
            const TIER: Tier = $tier;

            fn detect() -> Option<Self> {
                #[cfg(target_arch = "x86_64")]
                {
                    if $(std::arch::is_x86_feature_detected!($feature))&&+ {
                        return Some(Self(()));
                    }
                }
                None
            }
        }
    };
}

x86_token!(Sse2, Tier::Sse2, "sse2");
x86_token!(Ssse3, Tier::Ssse3, "sse2", "ssse3");
x86_token!(Sse41, Tier::Sse41, "sse2", "ssse3", "sse4.1");
x86_token!(Avx2, Tier::Avx2, "sse2", "ssse3", "sse4.1", "avx2");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portable_is_always_available() {
        assert_eq!(Portable::detect(), Some(Portable));
        assert_eq!(Portable.tier(), Tier::Ref);
    }

    #[test]
    fn token_tiers_match_their_types() {
        assert_eq!(Sse2::TIER, Tier::Sse2);
        assert_eq!(Ssse3::TIER, Tier::Ssse3);
        assert_eq!(Sse41::TIER, Tier::Sse41);
        assert_eq!(Avx2::TIER, Tier::Avx2);
    }

    #[test]
    fn higher_tokens_imply_lower_tokens() {
        if Avx2::detect().is_some() {
            assert!(Sse41::detect().is_some());
        }
        if Sse41::detect().is_some() {
            assert!(Ssse3::detect().is_some());
        }
        if Ssse3::detect().is_some() {
            assert!(Sse2::detect().is_some());
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[test]
    fn simd_tokens_are_unavailable_off_x86_64() {
        assert!(Sse2::detect().is_none());
        assert!(Avx2::detect().is_none());
    }
}
