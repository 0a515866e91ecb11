//! Factory configuration.

use cpu::Tier;

/// Options for [`Factory::with_config`](crate::Factory::with_config).
///
/// # Examples
///
/// ```
/// use argon2_simd::{FactoryConfig, Tier};
///
/// let config = FactoryConfig::default().with_max_tier(Tier::Sse2);
/// assert_eq!(config.max_tier, Some(Tier::Sse2));
/// assert!(!config.skip_self_test);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactoryConfig {
    /// Skip the known-answer checks at construction.
    pub skip_self_test: bool,
    /// Never select a tier above this one.
    pub max_tier: Option<Tier>,
}

impl FactoryConfig {
    /// Caps the selected tier.
    pub const fn with_max_tier(mut self, tier: Tier) -> Self {
        self.max_tier = Some(tier);
        self
    }

    /// Sets whether the self-test is skipped.
    pub const fn with_skip_self_test(mut self, skip: bool) -> Self {
        self.skip_self_test = skip;
        self
    }

    /// Applies the cap to a detected tier.
    pub fn resolve(&self, detected: Tier) -> Tier {
        self.max_tier.map_or(detected, |cap| detected.min(cap))
    }
}
