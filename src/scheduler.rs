//! Pass/slice/lane orchestration: seeding the first two blocks per lane,
//! filling every segment under the appropriate addressing mode, and the
//! `Argon2ds` S-box refresh between passes.
//!
//! Dispatches lanes through [`crate::workers::Workers`] and generalizes to
//! all five variants via [`crate::params::Variant::independent_at`].

use crate::addressing::{index_alpha, AddressGen};
use crate::block::{Block, Matrix};
use crate::compress::compress;
use crate::params::{Params, Variant, SYNC_POINTS};
use crate::sbox::SBox;
use crate::workers::Workers;

/// Seed lane `lane`'s first two blocks, `B[lane][0]` and `B[lane][1]`:
/// `H'(H0 || le32(0) || le32(lane))` and `H'(H0 || le32(1) || le32(lane))`,
/// each loaded into a block.
pub fn seed_lane(matrix: &mut Matrix, lane: u32, h0: &[u8; 64]) {
    let mut buf = [0u8; 72];
    buf[..64].copy_from_slice(h0);

    for col in 0..2u32 {
        buf[64..68].copy_from_slice(&col.to_le_bytes());
        buf[68..72].copy_from_slice(&lane.to_le_bytes());
        let mut out = [0u8; 1024];
        crate::blake2b::h_prime(&mut out, &buf);
        matrix.get_mut(lane, col).load_le_bytes(&out);
    }
}

/// Fill one `(pass, lane, slice)` segment in place: for each index in the
/// segment, pick a reference block via either the data-dependent or
/// data-independent addressing mode and compress.
#[allow(clippy::too_many_arguments)]
fn fill_segment(
    matrix: &mut Matrix,
    params: &Params,
    sbox: Option<&SBox>,
    pass: u32,
    lane: u32,
    slice: u32,
) {
    let lanes = params.lanes();
    let lane_length = params.lane_length();
    let segment_length = params.segment_length();
    let total_blocks = params.memory_blocks();
    let total_passes = params.t_cost();
    let variant = params.variant();

    let independent = variant.independent_at(pass, slice);
    let mut addr_gen = if independent {
        Some(AddressGen::new(pass, lane, slice, total_blocks, total_passes, variant))
    } else {
        None
    };

    let start = if pass == 0 && slice == 0 { 2 } else { 0 };

    for idx in start..segment_length {
        let curr_col = slice * segment_length + idx;
        let prev_col = if curr_col == 0 { lane_length - 1 } else { curr_col - 1 };

        let (j1, j2) = match &mut addr_gen {
            Some(gen) => gen.next_pair(),
            None => {
                let prev = matrix.get(lane, prev_col);
                (prev.word(0) as u32, (prev.word(0) >> 32) as u32)
            }
        };

        let ref_lane = if pass == 0 && slice == 0 { lane } else { (j2 as u64 % lanes as u64) as u32 };
        let same_lane = ref_lane == lane;
        let ref_col = index_alpha(pass, slice, same_lane, idx, segment_length, j1);

        let (wr, rd_prev, rd_ref) = matrix.get3((lane, curr_col), (lane, prev_col), (ref_lane, ref_col));
        if pass == 0 {
            compress(wr, rd_prev, rd_ref, sbox);
        } else {
            let mut next = Block::zeroed();
            compress(&mut next, rd_prev, rd_ref, sbox);
            wr.xor_assign(&next);
        }
    }
}

/// Run every pass of the fill phase: after the first two columns of every
/// lane are seeded, iterate `t_cost` passes over the four slices,
/// dispatching one worker per lane per slice and crossing a synchronization
/// barrier between slices. `Argon2ds` refreshes its S-box from `B[0][0]`
/// once per pass, after pass 0's own seeding has run.
pub fn fill_memory(matrix: &mut Matrix, params: &Params, h0: &[u8; 64]) {
    for lane in 0..params.lanes() {
        seed_lane(matrix, lane, h0);
    }

    let mut sbox = if params.variant().uses_sbox() { Some(SBox::zeroed()) } else { None };
    if let Some(sbox) = &mut sbox {
        sbox.refresh(matrix.get(0, 0));
    }

    let mut workers = Workers::new(params.lanes());

    for pass in 0..params.t_cost() {
        log::debug!("fill_memory: starting pass {pass}/{}", params.t_cost());
        for slice in 0..SYNC_POINTS {
            let sbox_ref = sbox.as_ref();
            workers.map(matrix, &|m: &mut Matrix, lane: u32| {
                fill_segment(m, params, sbox_ref, pass, lane, slice);
            });
            log::trace!("fill_memory: pass {pass} slice {slice} complete (barrier)");
        }
        if let Some(sbox) = &mut sbox {
            sbox.refresh(matrix.get(0, 0));
        }
    }
}
