//! SSE4.1 block function.
//!
//! Same network as SSSE3; compiling it under `sse4.1` lets the code generator
//! use the wider instruction set for loads and blends.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::sse2::{blamka_round, fblamka, fill_block_xmm, half_g, rotr32, rotr63};
use super::ssse3::{diagonalize, rotr16, rotr24, undiagonalize};
use crate::block::Block;

/// # Safety
///
/// The CPU must support SSE4.1.
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn fill_block(prev: &Block, reference: &Block, next: &mut Block, with_xor: bool) {
    fill_block_xmm!(prev, reference, next, with_xor);
}
