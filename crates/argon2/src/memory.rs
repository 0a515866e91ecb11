//! Memory matrix storage.
//!
//! The matrix is either an owned, zeroize-on-drop `Vec<Block>` or a caller
//! byte buffer reinterpreted in place. During the fill it is shared across
//! lane tasks through [`MemoryView`].

#![allow(unsafe_code)]

use std::marker::PhantomData;

use zeroize::Zeroizing;

use crate::block::{BLOCK_BYTES, Block};
use crate::error::{Error, Result};

/// Allocates a zeroed matrix that is wiped when dropped.
pub(crate) fn allocate(blocks: usize) -> Zeroizing<Vec<Block>> {
    Zeroizing::new(vec![Block::ZERO; blocks])
}

/// Views the first `blocks` blocks of a caller buffer.
///
/// Checks the size first, so an undersized buffer reports
/// [`Error::InsufficientMemory`] regardless of its alignment.
pub(crate) fn blocks_from_bytes(memory: &mut [u8], blocks: usize) -> Result<&mut [Block]> {
    let required = blocks * BLOCK_BYTES;
    if memory.len() < required {
        return Err(Error::InsufficientMemory {
            required,
            provided: memory.len(),
        });
    }

    let base = memory.as_mut_ptr().cast::<Block>();
    if !base.is_aligned() {
        return Err(Error::MisalignedMemory);
    }
    // SAFETY: the pointer is aligned for `Block`, the buffer holds at least
    // `blocks` blocks and stays mutably borrowed for the returned lifetime.
    // `Block` is `repr(C)` over `u64`s, so any byte content is a valid value.
    Ok(unsafe { std::slice::from_raw_parts_mut(base, blocks) })
}

/// Shared handle to the matrix used while lanes fill concurrently.
///
/// Within one slice every lane writes only its own segment and reads blocks
/// outside all segments of that slice, except for its own earlier blocks.
/// Callers uphold that schedule; the view itself only carries the pointer.
#[derive(Clone, Copy)]
pub(crate) struct MemoryView<'a> {
    base: *mut Block,
    len: usize,
    _memory: PhantomData<&'a mut [Block]>,
}

// SAFETY: see the type documentation; concurrent access never overlaps a
// write with any other access to the same block.
unsafe impl Send for MemoryView<'_> {}
unsafe impl Sync for MemoryView<'_> {}

impl<'a> MemoryView<'a> {
    pub(crate) fn new(blocks: &'a mut [Block]) -> Self {
        Self {
            base: blocks.as_mut_ptr(),
            len: blocks.len(),
            _memory: PhantomData,
        }
    }

    /// Pointer to block `index`. Dereferencing it is up to the caller.
    pub(crate) fn ptr(self, index: usize) -> *mut Block {
        assert!(index < self.len, "block {index} outside matrix of {}", self.len);
        self.base.wrapping_add(index)
    }
}
