//! The memory provider abstraction.
//!
//! The working matrix's backing storage is obtained through a trait rather
//! than a hard-coded `Vec::with_capacity`, so the core depends on a
//! capability -- something that can allocate and release blocks -- instead
//! of a concrete heap.

use crate::block::Block;
use crate::error::{Error, Result};

/// A provider of the working matrix's backing storage.
pub trait MemoryAllocator {
    /// Allocate `blocks` zeroed [`Block`]s.
    fn allocate(&self, blocks: usize) -> Result<Vec<Block>>;

    /// Release previously-allocated storage. The default implementation
    /// just drops `blocks`, which is all a plain heap allocator needs to
    /// do; a provider backed by e.g. mmap'd or locked pages would override
    /// this to unmap/unlock before the `Vec`'s own drop runs.
    fn release(&self, blocks: Vec<Block>) {
        drop(blocks);
    }
}

/// The default allocator: a plain heap `Vec`.
#[derive(Default, Clone, Copy, Debug)]
pub struct DefaultAllocator;

impl MemoryAllocator for DefaultAllocator {
    fn allocate(&self, blocks: usize) -> Result<Vec<Block>> {
        // `try_reserve` surfaces allocation failure as a recoverable error
        // instead of aborting the process.
        let mut v = Vec::new();
        v.try_reserve_exact(blocks).map_err(|e| Error::MemoryAllocation {
            blocks,
            bytes: blocks * crate::block::BLOCK_BYTES,
            reason: e.to_string(),
        })?;
        v.resize_with(blocks, Block::zeroed);
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allocator_returns_zeroed_blocks() {
        let blocks = DefaultAllocator.allocate(4).unwrap();
        assert_eq!(blocks.len(), 4);
        for b in &blocks {
            assert!(b.iter().all(|&w| w == 0));
        }
    }
}
