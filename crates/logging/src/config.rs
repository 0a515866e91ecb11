//! crates/logging/src/config.rs
//! Verbosity levels mapped to filter directives.

use std::fmt;

/// Highest level with its own directive; larger values behave like it.
pub const MAX_LEVEL: u8 = 3;

/// Numeric verbosity, as a `-v` count would give it.
///
/// | level | effect |
/// |-------|--------|
/// | 0 | warnings and errors only |
/// | 1 | tier selection and self-test results |
/// | 2 | plus one line per hash call |
/// | 3 | plus fill scheduling and BLAKE2b helpers |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VerbosityConfig {
    /// Verbosity level; values above [`MAX_LEVEL`] are clamped.
    pub level: u8,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level.
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { level }
    }

    /// Level after clamping to [`MAX_LEVEL`].
    pub const fn effective_level(&self) -> u8 {
        if self.level > MAX_LEVEL { MAX_LEVEL } else { self.level }
    }

    /// `EnvFilter`-compatible directive string for this level.
    pub fn directives(&self) -> String {
        match self.effective_level() {
            0 => "warn".to_owned(),
            1 => "warn,argon2::dispatch=info,argon2::selftest=info".to_owned(),
            2 => "warn,argon2::dispatch=debug,argon2::selftest=debug,argon2::engine=debug".to_owned(),
            _ => "warn,argon2=trace".to_owned(),
        }
    }
}

impl fmt::Display for VerbosityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.directives())
    }
}
