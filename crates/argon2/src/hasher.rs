//! Tier-erased password hasher interface.

use cpu::Tier;

use crate::engine::Argon2;
use crate::error::Result;
use crate::kernel::BlamkaKernel;
use crate::params::Variant;

/// Object-safe view of an [`Argon2`] engine.
///
/// Backends chosen at runtime are handed out as `Box<dyn PasswordHasher>`.
pub trait PasswordHasher: Send + Sync {
    /// Hashes into `out` with an internally allocated matrix.
    fn hash(&self, password: &[u8], salt: &[u8], aad: &[u8], out: &mut [u8]) -> Result<()>;

    /// Hashes into `out` using caller-provided memory.
    fn hash_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        aad: &[u8],
        out: &mut [u8],
    ) -> Result<()>;

    /// Checks `hash` against a fresh computation.
    fn verify(&self, password: &[u8], salt: &[u8], hash: &[u8], aad: &[u8]) -> Result<bool>;

    /// Checks `hash` against a fresh computation in caller-provided memory.
    fn verify_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        hash: &[u8],
        aad: &[u8],
    ) -> Result<bool>;

    /// Bytes of memory `hash_with_memory` needs.
    fn memory_size(&self) -> usize;

    /// Kernel tier.
    fn tier(&self) -> Tier;

    /// Variant.
    fn variant(&self) -> Variant;
}

impl<K: BlamkaKernel> PasswordHasher for Argon2<K> {
    fn hash(&self, password: &[u8], salt: &[u8], aad: &[u8], out: &mut [u8]) -> Result<()> {
        Self::hash(self, password, salt, aad, out)
    }

    fn hash_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        aad: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        Self::hash_with_memory(self, memory, password, salt, aad, out)
    }

    fn verify(&self, password: &[u8], salt: &[u8], hash: &[u8], aad: &[u8]) -> Result<bool> {
        Self::verify(self, password, salt, hash, aad)
    }

    fn verify_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        hash: &[u8],
        aad: &[u8],
    ) -> Result<bool> {
        Self::verify_with_memory(self, memory, password, salt, hash, aad)
    }

    fn memory_size(&self) -> usize {
        Self::memory_size(self)
    }

    fn tier(&self) -> Tier {
        K::TIER
    }

    fn variant(&self) -> Variant {
        Self::variant(self)
    }
}

#[cfg(test)]
mod tests {
    use cpu::Portable;

    use super::*;
    use crate::params::Params;

    #[test]
    fn boxed_hasher_matches_engine() {
        let params = Params::new(Variant::Argon2i, 1, 16, 1).unwrap();
        let engine = Argon2::new(Portable, params.clone());
        let boxed: Box<dyn PasswordHasher> = Box::new(Argon2::new(Portable, params));

        let mut direct = [0u8; 16];
        let mut erased = [0u8; 16];
        engine.hash(b"pw", b"saltsalt", &[], &mut direct).unwrap();
        boxed.hash(b"pw", b"saltsalt", &[], &mut erased).unwrap();

        assert_eq!(direct, erased);
        assert_eq!(boxed.tier(), Tier::Ref);
        assert_eq!(boxed.variant(), Variant::Argon2i);
        assert_eq!(boxed.memory_size(), engine.memory_size());
        assert!(boxed.verify(b"pw", b"saltsalt", &erased, &[]).unwrap());
    }
}
