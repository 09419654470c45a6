//! The block primitive's permutation `P` and the compressor `G`, including
//! the `Argon2ds` S-box mixing step.
//!
//! Implemented with plain `u64` arithmetic rather than a SIMD newtype, so
//! it builds on stable Rust without platform-specific intrinsics.

use crate::block::{Block, BLOCK_WORDS};
use crate::sbox::SBox;

fn lower_mult(a: u64, b: u64) -> u64 {
    fn lo(x: u64) -> u64 { x & 0xffff_ffff }
    lo(a).wrapping_mul(lo(b)).wrapping_mul(2)
}

/// The BLAKE2b quarter-round, doubled in width to operate on 64-bit words.
macro_rules! blamka_round {
    ($a:expr, $b:expr, $c:expr, $d:expr) => {{
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(32);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(24);
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(16);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(63);
    }};
}

/// One Blake2b-mixing pass over 16 words (`P`).
macro_rules! permute16 {
    ($v0:expr, $v1:expr, $v2:expr, $v3:expr, $v4:expr, $v5:expr, $v6:expr, $v7:expr,
     $v8:expr, $v9:expr, $v10:expr, $v11:expr, $v12:expr, $v13:expr, $v14:expr, $v15:expr) => {
        blamka_round!($v0, $v4, $v8, $v12);
        blamka_round!($v1, $v5, $v9, $v13);
        blamka_round!($v2, $v6, $v10, $v14);
        blamka_round!($v3, $v7, $v11, $v15);
        blamka_round!($v0, $v5, $v10, $v15);
        blamka_round!($v1, $v6, $v11, $v12);
        blamka_round!($v2, $v7, $v8, $v13);
        blamka_round!($v3, $v4, $v9, $v14);
    };
}

fn permute_row(row: usize, b: &mut Block) {
    permute16!(
        b[16 * row], b[16 * row + 1], b[16 * row + 2], b[16 * row + 3],
        b[16 * row + 4], b[16 * row + 5], b[16 * row + 6], b[16 * row + 7],
        b[16 * row + 8], b[16 * row + 9], b[16 * row + 10], b[16 * row + 11],
        b[16 * row + 12], b[16 * row + 13], b[16 * row + 14], b[16 * row + 15]
    );
}

fn permute_col(col: usize, b: &mut Block) {
    permute16!(
        b[2 * col], b[2 * col + 1],
        b[2 * col + 16], b[2 * col + 17],
        b[2 * col + 32], b[2 * col + 33],
        b[2 * col + 48], b[2 * col + 49],
        b[2 * col + 64], b[2 * col + 65],
        b[2 * col + 80], b[2 * col + 81],
        b[2 * col + 96], b[2 * col + 97],
        b[2 * col + 112], b[2 * col + 113]
    );
}

/// `SBOX_MASK`: a 1024-word S-box split into two 512-word halves, each
/// indexed by 9 bits of the running accumulator.
const SBOX_MASK: u64 = 511;

/// The `Argon2ds` inner mixing loop: 96 iterations of S-box-driven
/// multiplication folded into the block's first and last words, threaded
/// through a running accumulator seeded from `Z[0]`.
///
/// The two S-box halves are read with the accumulator's low and high 32
/// bits, their product (mod 2^64, via the natural `u64` multiply of two
/// 32-bit values) becomes the next accumulator, and is folded into both the
/// first and last words of `z`.
fn sbox_mix(z: &mut Block, sbox: &SBox) {
    let mut w = z.word(0);
    let last = BLOCK_WORDS - 1;
    for _ in 0..96 {
        let lo_idx = (w & SBOX_MASK) as usize;
        let hi_idx = 512 + ((w >> 32) & SBOX_MASK) as usize;
        let v_lo = sbox.word(lo_idx) & 0xffff_ffff;
        let v_hi = sbox.word(hi_idx) & 0xffff_ffff;
        w = v_lo.wrapping_mul(v_hi);
        z.set_word(0, z.word(0) ^ w);
        z.set_word(last, z.word(last) ^ w);
    }
}

/// `G(prev, ref) -> next`: the per-block compressor. `sbox` is `Some` only
/// for the `Argon2ds` variant.
pub fn compress(dest: &mut Block, prev: &Block, reference: &Block, sbox: Option<&SBox>) {
    for ((d, l), r) in dest.words_mut().iter_mut().zip(prev.iter()).zip(reference.iter()) {
        *d = *l ^ *r;
    }
    let r = *dest;

    for row in 0..8 {
        permute_row(row, dest);
    }
    if let Some(sbox) = sbox {
        sbox_mix(dest, sbox);
    }
    for col in 0..8 {
        permute_col(col, dest);
    }

    dest.xor_assign(&r);
}

/// `G(0, G(0, src))`, used to expand an address-generator input block into
/// a stream of pseudo-random address words under data-independent
/// addressing. Never used with the S-box -- data-independent addressing and
/// the S-box variant (`ds`) are mutually exclusive.
pub fn compress_address(dest: &mut Block, src: &Block) {
    let zero = Block::zeroed();
    compress(dest, &zero, src, None);
    let tmp = *dest;
    compress(dest, &zero, &tmp, None);
}
