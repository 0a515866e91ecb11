//! Streaming BLAKE2b state machine shared by every kernel tier.

use std::fmt;

use cpu::Tier;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::kernel::{Blake2bKernel, IV};
use crate::{BLOCK_BYTES, MAX_DIGEST_BYTES, MAX_KEY_BYTES};

/// Streaming BLAKE2b hasher bound to one compression kernel.
///
/// The state moves from *ready* through any number of [`update`] calls to a
/// single [`finalize_into`]; after that every call fails with
/// [`Error::AlreadyFinalized`]. Chaining words and the input buffer are wiped
/// when the value is dropped.
///
/// [`update`]: Blake2b::update
/// [`finalize_into`]: Blake2b::finalize_into
///
/// # Examples
///
/// ```
/// use blake2b::Blake2b;
/// use cpu::Portable;
///
/// let mut hasher = Blake2b::new(Portable, 16).unwrap();
/// hasher.update(b"abc").unwrap();
/// let digest = hasher.finalize_vec().unwrap();
/// assert_eq!(digest[..4], [0xcf, 0x4a, 0xb7, 0x91]);
/// ```
pub struct Blake2b<K: Blake2bKernel> {
    kernel: K,
    h: [u64; 8],
    counter: [u64; 2],
    flags: [u64; 2],
    buf: [u8; BLOCK_BYTES],
    buf_len: usize,
    digest_len: usize,
}

impl<K: Blake2bKernel> Blake2b<K> {
    /// Creates an unkeyed state producing `digest_len` bytes.
    pub fn new(kernel: K, digest_len: usize) -> Result<Self> {
        Self::with_key(kernel, digest_len, &[])
    }

    /// Creates a keyed (MAC) state.
    ///
    /// A non-empty key is zero-padded to a full block and absorbed before any
    /// message bytes.
    pub fn with_key(kernel: K, digest_len: usize, key: &[u8]) -> Result<Self> {
        if digest_len == 0 || digest_len > MAX_DIGEST_BYTES {
            return Err(Error::InvalidDigestLength(digest_len));
        }
        if key.len() > MAX_KEY_BYTES {
            return Err(Error::KeyTooLong(key.len()));
        }

        // Parameter block: digest length, key length, fanout 1, depth 1.
        let param = digest_len as u64 | (key.len() as u64) << 8 | 1 << 16 | 1 << 24;
        let mut h = IV;
        h[0] ^= param;

        let mut state = Self {
            kernel,
            h,
            counter: [0, 0],
            flags: [0, 0],
            buf: [0; BLOCK_BYTES],
            buf_len: 0,
            digest_len,
        };

        if !key.is_empty() {
            let mut block = Zeroizing::new([0u8; BLOCK_BYTES]);
            block[..key.len()].copy_from_slice(key);
            state.update(&block[..])?;
        }

        Ok(state)
    }

    /// Configured digest length in bytes.
    pub const fn digest_len(&self) -> usize {
        self.digest_len
    }

    /// Tier of the compression kernel.
    pub fn tier(&self) -> Tier {
        self.kernel.tier()
    }

    /// Returns `true` once [`finalize_into`](Self::finalize_into) has run.
    pub const fn is_finalized(&self) -> bool {
        self.flags[0] != 0
    }

    /// Absorbs `input`.
    ///
    /// The last full block is kept buffered so finalization always has a
    /// block to flag, even for block-aligned messages.
    pub fn update(&mut self, mut input: &[u8]) -> Result<()> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        if input.is_empty() {
            return Ok(());
        }

        let fill = BLOCK_BYTES - self.buf_len;
        if input.len() > fill {
            self.buf[self.buf_len..].copy_from_slice(&input[..fill]);
            self.buf_len = 0;
            input = &input[fill..];
            let block = self.buf;
            self.compress_block(&block);

            while input.len() > BLOCK_BYTES {
                let (head, rest) = input.split_at(BLOCK_BYTES);
                let mut block = [0u8; BLOCK_BYTES];
                block.copy_from_slice(head);
                self.compress_block(&block);
                input = rest;
            }
        }

        self.buf[self.buf_len..self.buf_len + input.len()].copy_from_slice(input);
        self.buf_len += input.len();
        Ok(())
    }

    /// Absorbs the little-endian encoding of `value`.
    pub fn update_u32(&mut self, value: u32) -> Result<()> {
        self.update(&value.to_le_bytes())
    }

    /// Writes the digest into `out[..digest_len]`.
    ///
    /// Fails with [`Error::OutputTooSmall`] when `out` is shorter than the
    /// digest and with [`Error::AlreadyFinalized`] on a second call.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<()> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        if out.len() < self.digest_len {
            return Err(Error::OutputTooSmall {
                needed: self.digest_len,
                got: out.len(),
            });
        }

        self.increment_counter(self.buf_len as u64);
        self.flags[0] = u64::MAX;
        self.buf[self.buf_len..].fill(0);
        let block = self.buf;
        self.kernel.compress(&mut self.h, &block, self.counter, self.flags);

        let mut bytes = Zeroizing::new([0u8; MAX_DIGEST_BYTES]);
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.h) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out[..self.digest_len].copy_from_slice(&bytes[..self.digest_len]);
        self.buf.zeroize();
        Ok(())
    }

    /// Finalizes into a freshly allocated vector.
    pub fn finalize_vec(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.digest_len];
        self.finalize_into(&mut out)?;
        Ok(out)
    }

    fn compress_block(&mut self, block: &[u8; BLOCK_BYTES]) {
        self.increment_counter(BLOCK_BYTES as u64);
        self.kernel.compress(&mut self.h, block, self.counter, self.flags);
    }

    fn increment_counter(&mut self, by: u64) {
        let (low, carry) = self.counter[0].overflowing_add(by);
        self.counter[0] = low;
        self.counter[1] = self.counter[1].wrapping_add(u64::from(carry));
    }
}

impl<K: Blake2bKernel> Drop for Blake2b<K> {
    fn drop(&mut self) {
        self.h.zeroize();
        self.buf.zeroize();
        self.buf_len = 0;
    }
}

impl<K: Blake2bKernel> fmt::Debug for Blake2b<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake2b")
            .field("tier", &K::TIER)
            .field("digest_len", &self.digest_len)
            .field("buffered", &self.buf_len)
            .field("finalized", &self.is_finalized())
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a BLAKE2b state, used to hand out tier-erased hashers.
pub trait StreamingHash: Send {
    /// Absorbs bytes.
    fn update(&mut self, input: &[u8]) -> Result<()>;
    /// Absorbs the little-endian encoding of an integer.
    fn update_u32(&mut self, value: u32) -> Result<()>;
    /// Writes the digest into `out[..digest_len]`; callable once.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<()>;
    /// Configured digest length.
    fn digest_len(&self) -> usize;
    /// Tier of the compression kernel.
    fn tier(&self) -> Tier;
}

impl<K: Blake2bKernel> StreamingHash for Blake2b<K> {
    fn update(&mut self, input: &[u8]) -> Result<()> {
        Self::update(self, input)
    }

    fn update_u32(&mut self, value: u32) -> Result<()> {
        Self::update_u32(self, value)
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<()> {
        Self::finalize_into(self, out)
    }

    fn digest_len(&self) -> usize {
        self.digest_len
    }

    fn tier(&self) -> Tier {
        K::TIER
    }
}
