//! crates/cpu/src/tier.rs
//! Ordered instruction-set tiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Instruction-set tier a kernel is written for.
///
/// Tiers are totally ordered: a CPU that supports a tier supports every tier
/// below it, which is what lets the self-test iterate "every tier up to the
/// best available".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Tier {
    /// Portable scalar reference code.
    #[default]
    Ref,
    /// 128-bit SSE2.
    Sse2,
    /// SSE2 plus byte shuffles and `palignr`.
    Ssse3,
    /// SSE4.1 (and SSE4.2 present on the host).
    Sse41,
    /// 256-bit AVX2 with the BMI/FMA/MOVBE/LZCNT companions.
    Avx2,
}

impl Tier {
    /// Every tier, lowest first.
    pub const ALL: [Self; 5] = [Self::Ref, Self::Sse2, Self::Ssse3, Self::Sse41, Self::Avx2];

    /// Canonical upper-case name (`"REF"`, `"SSE2"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ref => "REF",
            Self::Sse2 => "SSE2",
            Self::Ssse3 => "SSSE3",
            Self::Sse41 => "SSE41",
            Self::Avx2 => "AVX2",
        }
    }

    /// Tiers from [`Tier::Ref`] up to and including `self`.
    pub fn up_to(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().take_while(move |tier| *tier <= self)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Tier`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown instruction set tier: {0:?}")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['.', '_'], "");
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == normalized)
            .ok_or_else(|| ParseTierError(s.to_owned()))
    }
}

impl TryFrom<String> for Tier {
    type Error = ParseTierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.as_str().to_owned()
    }
}
