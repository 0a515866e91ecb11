//! Hashing parameters and the memory geometry derived from them.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::block::BLOCK_BYTES;
use crate::error::{Error, Result};

/// Version number hashed into `H0`.
pub const VERSION: u32 = 0x13;

/// Longest secret accepted.
pub const MAX_SECRET_BYTES: usize = 32;

/// Shortest tag accepted.
pub const MIN_OUTPUT_BYTES: usize = 4;

/// Segments (slices) per lane per pass.
pub const SYNC_POINTS: u32 = 4;

/// Argon2 flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[repr(u32)]
pub enum Variant {
    /// Data-dependent addressing throughout.
    #[default]
    Argon2d = 0,
    /// Data-independent addressing throughout.
    Argon2i = 1,
    /// Data-independent for the first half of pass 0, data-dependent after.
    Argon2id = 2,
}

impl Variant {
    /// Every variant.
    pub const ALL: [Self; 3] = [Self::Argon2d, Self::Argon2i, Self::Argon2id];

    /// Type code hashed into `H0` and the address input block.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Canonical name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argon2d => "Argon2d",
            Self::Argon2i => "Argon2i",
            Self::Argon2id => "Argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownVariant(s.to_owned()))
    }
}

impl TryFrom<String> for Variant {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.as_str().to_owned()
    }
}

/// Validated, immutable engine parameters.
///
/// # Examples
///
/// ```
/// use argon2::{Params, Variant};
///
/// let params = Params::new(Variant::Argon2id, 3, 4096, 4)
///     .unwrap()
///     .with_secret(b"pepper")
///     .unwrap();
/// assert_eq!(params.geometry().memory_blocks(), 4096);
/// ```
#[derive(Clone)]
pub struct Params {
    variant: Variant,
    time_cost: u32,
    memory_cost: u32,
    lanes: u32,
    secret: Zeroizing<Vec<u8>>,
}

impl Params {
    /// Validates and builds a parameter set without a secret.
    pub fn new(variant: Variant, time_cost: u32, memory_cost: u32, lanes: u32) -> Result<Self> {
        if time_cost < 1 {
            return Err(Error::TimeCostTooSmall);
        }
        if memory_cost < 1 {
            return Err(Error::MemoryCostTooSmall);
        }
        if !matches!(lanes, 1 | 2 | 4) {
            return Err(Error::UnsupportedLanes(lanes));
        }
        Ok(Self {
            variant,
            time_cost,
            memory_cost,
            lanes,
            secret: Zeroizing::new(Vec::new()),
        })
    }

    /// Attaches a secret (pepper) of at most 32 bytes.
    pub fn with_secret(mut self, secret: &[u8]) -> Result<Self> {
        if secret.len() > MAX_SECRET_BYTES {
            return Err(Error::SecretTooLong(secret.len()));
        }
        self.secret = Zeroizing::new(secret.to_vec());
        Ok(self)
    }

    /// Variant.
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of passes.
    pub const fn time_cost(&self) -> u32 {
        self.time_cost
    }

    /// Memory cost in KiB as configured, before rounding.
    pub const fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    /// Degree of parallelism.
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Secret bytes; empty when none was set.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Matrix shape for these parameters.
    pub const fn geometry(&self) -> Geometry {
        Geometry::new(self.memory_cost, self.lanes)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            variant: Variant::Argon2d,
            time_cost: 1,
            memory_cost: 1024,
            lanes: 1,
            secret: Zeroizing::new(Vec::new()),
        }
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("variant", &self.variant)
            .field("time_cost", &self.time_cost)
            .field("memory_cost", &self.memory_cost)
            .field("lanes", &self.lanes)
            .field("secret_len", &self.secret.len())
            .finish()
    }
}

/// Shape of the memory matrix.
///
/// `memory_blocks` is the memory cost rounded down to a multiple of
/// `4 * lanes`, with a floor of `8 * lanes` blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    lanes: u32,
    segment_length: u32,
    memory_blocks: u32,
}

impl Geometry {
    /// Derives the geometry from a memory cost and lane count.
    pub const fn new(memory_cost: u32, lanes: u32) -> Self {
        let min_blocks = 2 * SYNC_POINTS * lanes;
        let memory_blocks = if memory_cost >= min_blocks {
            memory_cost - memory_cost % (SYNC_POINTS * lanes)
        } else {
            min_blocks
        };
        Self {
            lanes,
            segment_length: memory_blocks / (SYNC_POINTS * lanes),
            memory_blocks,
        }
    }

    /// Lanes.
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Blocks per segment.
    pub const fn segment_length(&self) -> u32 {
        self.segment_length
    }

    /// Blocks per lane.
    pub const fn lane_length(&self) -> u32 {
        self.segment_length * SYNC_POINTS
    }

    /// Total blocks.
    pub const fn memory_blocks(&self) -> u32 {
        self.memory_blocks
    }

    /// Bytes the matrix occupies.
    pub const fn memory_size(&self) -> usize {
        self.memory_blocks as usize * BLOCK_BYTES
    }
}
