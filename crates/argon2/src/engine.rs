//! The Argon2 engine: initial hash, fill and finalization.

use blake2b::{Blake2b, long_digest};
use cpu::Tier;
use logging::trace_engine;
use zeroize::Zeroizing;

use crate::block::{BLOCK_BYTES, Block};
use crate::error::{Error, Result};
use crate::fill::Schedule;
use crate::kernel::BlamkaKernel;
use crate::memory::{allocate, blocks_from_bytes};
use crate::params::{Geometry, MIN_OUTPUT_BYTES, Params, VERSION, Variant};

const PREHASH_BYTES: usize = 64;

/// Argon2 hasher bound to one kernel tier.
///
/// # Examples
///
/// ```
/// use argon2::{Argon2, Params, Variant};
/// use cpu::Portable;
///
/// let params = Params::new(Variant::Argon2id, 1, 64, 1).unwrap();
/// let argon2 = Argon2::new(Portable, params);
///
/// let mut tag = [0u8; 32];
/// argon2.hash(b"password", b"somesalt", &[], &mut tag).unwrap();
/// assert!(argon2.verify(b"password", b"somesalt", &tag, &[]).unwrap());
/// assert!(!argon2.verify(b"passw0rd", b"somesalt", &tag, &[]).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Argon2<K: BlamkaKernel> {
    kernel: K,
    params: Params,
    geometry: Geometry,
}

impl<K: BlamkaKernel> Argon2<K> {
    /// Binds `params` to `kernel`.
    pub fn new(kernel: K, params: Params) -> Self {
        let geometry = params.geometry();
        Self {
            kernel,
            params,
            geometry,
        }
    }

    /// Parameters this engine was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Matrix shape.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Bytes of working memory a hash needs; depends only on memory cost
    /// and lanes.
    pub fn memory_size(&self) -> usize {
        self.geometry.memory_size()
    }

    /// Kernel tier.
    pub fn tier(&self) -> Tier {
        K::TIER
    }

    /// Variant.
    pub fn variant(&self) -> Variant {
        self.params.variant()
    }

    /// Hashes into `out` using a freshly allocated matrix.
    ///
    /// The tag length is `out.len()`, at least 4 bytes.
    pub fn hash(&self, password: &[u8], salt: &[u8], aad: &[u8], out: &mut [u8]) -> Result<()> {
        check_inputs(password, salt, aad, out)?;
        let mut blocks = allocate(self.geometry.memory_blocks() as usize);
        self.hash_blocks(&mut blocks, password, salt, aad, out)
    }

    /// Hashes into `out` using `memory` as the matrix.
    ///
    /// `memory` must hold at least [`memory_size`](Self::memory_size) bytes
    /// and start on an 8-byte boundary. Its contents are overwritten and left
    /// in place; `out` is untouched when validation fails.
    pub fn hash_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        aad: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        check_inputs(password, salt, aad, out)?;
        let blocks = blocks_from_bytes(memory, self.geometry.memory_blocks() as usize)?;
        self.hash_blocks(blocks, password, salt, aad, out)
    }

    /// Recomputes the tag for `password` and compares it with `hash`.
    ///
    /// The comparison visits every byte. A mismatch is `Ok(false)`.
    pub fn verify(&self, password: &[u8], salt: &[u8], hash: &[u8], aad: &[u8]) -> Result<bool> {
        let mut computed = Zeroizing::new(vec![0u8; hash.len()]);
        self.hash(password, salt, aad, &mut computed)?;
        Ok(tags_match(&computed, hash))
    }

    /// [`verify`](Self::verify) with caller-provided memory.
    pub fn verify_with_memory(
        &self,
        memory: &mut [u8],
        password: &[u8],
        salt: &[u8],
        hash: &[u8],
        aad: &[u8],
    ) -> Result<bool> {
        let mut computed = Zeroizing::new(vec![0u8; hash.len()]);
        self.hash_with_memory(memory, password, salt, aad, &mut computed)?;
        Ok(tags_match(&computed, hash))
    }

    fn hash_blocks(
        &self,
        blocks: &mut [Block],
        password: &[u8],
        salt: &[u8],
        aad: &[u8],
        out: &mut [u8],
    ) -> Result<()> {
        trace_engine!(
            tier = %K::TIER,
            variant = %self.params.variant(),
            passes = self.params.time_cost(),
            blocks = self.geometry.memory_blocks(),
            lanes = self.geometry.lanes(),
            "hashing"
        );

        let h0 = self.initial_hash(password, salt, aad, out.len())?;
        self.init_lanes(blocks, &h0)?;

        let schedule = Schedule {
            kernel: self.kernel,
            geometry: self.geometry,
            passes: self.params.time_cost(),
            variant: self.params.variant(),
        };
        schedule.fill(blocks);

        self.finalize(blocks, out)
    }

    fn initial_hash(
        &self,
        password: &[u8],
        salt: &[u8],
        aad: &[u8],
        out_len: usize,
    ) -> Result<Zeroizing<[u8; PREHASH_BYTES]>> {
        let mut state = Blake2b::new(self.kernel, PREHASH_BYTES)?;
        for word in [
            self.params.lanes(),
            out_len as u32,
            self.params.memory_cost(),
            self.params.time_cost(),
            VERSION,
            self.params.variant().as_u32(),
        ] {
            state.update_u32(word)?;
        }
        for input in [password, salt, self.params.secret(), aad] {
            state.update_u32(input.len() as u32)?;
            state.update(input)?;
        }

        let mut h0 = Zeroizing::new([0u8; PREHASH_BYTES]);
        state.finalize_into(h0.as_mut_slice())?;
        Ok(h0)
    }

    fn init_lanes(&self, blocks: &mut [Block], h0: &[u8; PREHASH_BYTES]) -> Result<()> {
        let lane_length = self.geometry.lane_length() as usize;
        let mut bytes = Zeroizing::new([0u8; BLOCK_BYTES]);
        for lane in 0..self.geometry.lanes() {
            for column in 0..2u32 {
                long_digest(
                    self.kernel,
                    bytes.as_mut_slice(),
                    &[h0.as_slice(), &column.to_le_bytes()[..], &lane.to_le_bytes()[..]],
                )?;
                blocks[lane as usize * lane_length + column as usize] = Block::from_le_bytes(&bytes);
            }
        }
        Ok(())
    }

    fn finalize(&self, blocks: &[Block], out: &mut [u8]) -> Result<()> {
        let lane_length = self.geometry.lane_length() as usize;
        let mut last = Zeroizing::new(blocks[lane_length - 1]);
        for lane in 1..self.geometry.lanes() as usize {
            *last ^= &blocks[lane * lane_length + lane_length - 1];
        }

        let mut bytes = Zeroizing::new([0u8; BLOCK_BYTES]);
        last.write_le_bytes(&mut bytes);
        long_digest(self.kernel, out, &[bytes.as_slice()])?;
        Ok(())
    }
}

fn check_inputs(password: &[u8], salt: &[u8], aad: &[u8], out: &[u8]) -> Result<()> {
    if out.len() < MIN_OUTPUT_BYTES {
        return Err(Error::OutputTooShort(out.len()));
    }
    for (what, len) in [
        ("password", password.len()),
        ("salt", salt.len()),
        ("associated data", aad.len()),
        ("output", out.len()),
    ] {
        if u32::try_from(len).is_err() {
            return Err(Error::InputTooLong { what, len });
        }
    }
    Ok(())
}

/// Equality over every byte, without an early exit.
fn tags_match(computed: &[u8], expected: &[u8]) -> bool {
    let mut equal = computed.len() == expected.len();
    for (a, b) in computed.iter().zip(expected) {
        equal &= a == b;
    }
    equal
}
