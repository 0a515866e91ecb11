//! Reference-block selection.

use crate::block::{BLOCK_WORDS, Block};
use crate::kernel::BlamkaKernel;
use crate::params::{Geometry, SYNC_POINTS, Variant};

/// Where in the schedule a block is being computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) pass: u32,
    pub(crate) lane: u32,
    pub(crate) slice: u32,
    pub(crate) index: u32,
}

/// Maps the low 32 bits of the pseudo-random word to a block index within
/// the reference lane.
///
/// The reference area covers every block already finished in the reference
/// lane that no other lane can be writing right now, minus the immediately
/// preceding block. The `x^2` mapping biases selection towards recent blocks.
pub(crate) fn index_alpha(geometry: &Geometry, position: Position, pseudo_rand: u32, same_lane: bool) -> u32 {
    let segment = geometry.segment_length();
    let lane_length = geometry.lane_length();
    let Position { pass, slice, index, .. } = position;
    let first_in_segment = u32::from(index == 0);

    let area = if pass == 0 {
        if slice == 0 {
            index - 1
        } else if same_lane {
            slice * segment + index - 1
        } else {
            slice * segment - first_in_segment
        }
    } else if same_lane {
        lane_length - segment + index - 1
    } else {
        lane_length - segment - first_in_segment
    };

    let area = u64::from(area);
    let mut relative = u64::from(pseudo_rand);
    relative = (relative * relative) >> 32;
    relative = area - 1 - ((area * relative) >> 32);

    let start = if pass == 0 || slice == SYNC_POINTS - 1 {
        0
    } else {
        u64::from((slice + 1) * segment)
    };

    ((start + relative) % u64::from(lane_length)) as u32
}

/// Returns `true` when the segment takes its pseudo-random words from the
/// address generator rather than from the previous block.
pub(crate) fn data_independent(variant: Variant, pass: u32, slice: u32) -> bool {
    match variant {
        Variant::Argon2d => false,
        Variant::Argon2i => true,
        Variant::Argon2id => pass == 0 && slice < SYNC_POINTS / 2,
    }
}

/// Counter-mode generator of pseudo-random words for data-independent
/// addressing; one refill yields 128 words.
pub(crate) struct AddressStream {
    input: Block,
    addresses: Block,
}

impl AddressStream {
    pub(crate) fn new(position: Position, geometry: &Geometry, passes: u32, variant: Variant) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = u64::from(position.pass);
        input.0[1] = u64::from(position.lane);
        input.0[2] = u64::from(position.slice);
        input.0[3] = u64::from(geometry.memory_blocks());
        input.0[4] = u64::from(passes);
        input.0[5] = u64::from(variant.as_u32());
        Self {
            input,
            addresses: Block::ZERO,
        }
    }

    /// Bumps the counter and recomputes `G(0, G(0, input))`.
    pub(crate) fn refill<K: BlamkaKernel>(&mut self, kernel: K) {
        self.input.0[6] += 1;
        let mut tmp = Block::ZERO;
        kernel.fill_block(&Block::ZERO, &self.input, &mut tmp, false);
        kernel.fill_block(&Block::ZERO, &tmp, &mut self.addresses, false);
    }

    pub(crate) fn word(&self, index: u32) -> u64 {
        self.addresses.0[index as usize % BLOCK_WORDS]
    }
}
