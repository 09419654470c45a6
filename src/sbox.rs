//! The `Argon2ds` S-box: an 8 KiB lookup table derived from the matrix and
//! refreshed once per pass.

use crate::block::Block;
use crate::compress::compress;

/// Number of `u64` words in the S-box (8 KiB).
pub const SBOX_WORDS: usize = 1024;

/// Words extracted from the refresh block per inner iteration.
const WORDS_PER_ITER: usize = 64;
/// Iterations needed to fill the S-box: `SBOX_WORDS / WORDS_PER_ITER`.
const REFRESH_ITERS: usize = SBOX_WORDS / WORDS_PER_ITER;

pub struct SBox(Box<[u64; SBOX_WORDS]>);

impl SBox {
    pub fn zeroed() -> SBox { SBox(Box::new([0u64; SBOX_WORDS])) }

    #[inline(always)]
    pub fn word(&self, idx: usize) -> u64 { self.0[idx] }

    /// Regenerate the S-box from `b00` (always `B[0][0]`): sixteen
    /// iterations of `G(cur, cur)`, each contributing its first 64 words to
    /// the table.
    pub fn refresh(&mut self, b00: &Block) {
        let mut cur = *b00;
        for i in 0..REFRESH_ITERS {
            let mut next = Block::zeroed();
            compress(&mut next, &cur, &cur, None);
            let base = i * WORDS_PER_ITER;
            for w in 0..WORDS_PER_ITER {
                self.0[base + w] = next.word(w);
            }
            cur = next;
        }
    }

    /// Convenience constructor for tests and for the very first pass's
    /// seed, equivalent to `zeroed()` followed by `refresh(seed)`.
    pub fn from_seed(seed: &Block) -> SBox {
        let mut s = SBox::zeroed();
        s.refresh(seed);
        s
    }
}
