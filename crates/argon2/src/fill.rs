//! Pass / slice / lane scheduling of the memory fill.

#![allow(unsafe_code)]

use logging::trace_fill;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::block::Block;
use crate::index::{AddressStream, Position, data_independent, index_alpha};
use crate::kernel::BlamkaKernel;
use crate::memory::MemoryView;
use crate::params::{Geometry, SYNC_POINTS, Variant};

/// Fixed inputs of one fill.
#[derive(Clone, Copy)]
pub(crate) struct Schedule<K> {
    pub(crate) kernel: K,
    pub(crate) geometry: Geometry,
    pub(crate) passes: u32,
    pub(crate) variant: Variant,
}

impl<K: BlamkaKernel> Schedule<K> {
    /// Runs every pass over a matrix whose first two blocks per lane are set.
    ///
    /// The lanes of a slice are independent; finishing all of them before the
    /// next slice starts is the only synchronization the algorithm needs.
    pub(crate) fn fill(&self, blocks: &mut [Block]) {
        let lanes = self.geometry.lanes();
        let view = MemoryView::new(blocks);

        for pass in 0..self.passes {
            trace_fill!(pass, lanes, "filling pass");
            for slice in 0..SYNC_POINTS {
                #[cfg(feature = "parallel")]
                (0..lanes).into_par_iter().for_each(|lane| {
                    self.fill_segment(view, pass, lane, slice);
                });

                #[cfg(not(feature = "parallel"))]
                for lane in 0..lanes {
                    self.fill_segment(view, pass, lane, slice);
                }
            }
        }
    }

    fn fill_segment(&self, view: MemoryView<'_>, pass: u32, lane: u32, slice: u32) {
        let segment = self.geometry.segment_length();
        let lane_length = self.geometry.lane_length();
        let lanes = self.geometry.lanes();
        let with_xor = pass != 0;

        let mut addresses = data_independent(self.variant, pass, slice).then(|| {
            let position = Position { pass, lane, slice, index: 0 };
            AddressStream::new(position, &self.geometry, self.passes, self.variant)
        });

        let mut start = 0;
        if pass == 0 && slice == 0 {
            // Blocks 0 and 1 come from H0.
            start = 2;
            if let Some(stream) = addresses.as_mut() {
                stream.refill(self.kernel);
            }
        }

        let mut current = (lane * lane_length + slice * segment + start) as usize;
        let mut previous = if current % lane_length as usize == 0 {
            current + lane_length as usize - 1
        } else {
            current - 1
        };

        for index in start..segment {
            if current % lane_length as usize == 1 {
                previous = current - 1;
            }

            let pseudo_rand = match addresses.as_mut() {
                Some(stream) => {
                    if index as usize % crate::block::BLOCK_WORDS == 0 {
                        stream.refill(self.kernel);
                    }
                    stream.word(index)
                }
                // SAFETY: `previous` belongs to this lane's finished blocks;
                // no task writes it during this slice.
                None => unsafe { (*view.ptr(previous)).0[0] },
            };

            let ref_lane = if pass == 0 && slice == 0 {
                lane
            } else {
                ((pseudo_rand >> 32) % u64::from(lanes)) as u32
            };
            let position = Position { pass, lane, slice, index };
            let ref_index = index_alpha(&self.geometry, position, pseudo_rand as u32, ref_lane == lane);
            let reference = (ref_lane * lane_length + ref_index) as usize;

            // SAFETY: `current` is in this lane's segment for this slice and
            // only this task writes it. `previous` and `reference` differ from
            // `current` and lie outside every segment being written in this
            // slice, so the shared borrows do not alias the exclusive one.
            unsafe {
                let prev = &*view.ptr(previous);
                let refb = &*view.ptr(reference);
                let next = &mut *view.ptr(current);
                self.kernel.fill_block(prev, refb, next, with_xor);
            }

            previous = current;
            current += 1;
        }
    }
}
