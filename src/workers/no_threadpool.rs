//! The non-`threaded` Workers: runs every lane sequentially on the calling
//! thread. Multi-lane instances still work here, just without parallelism.

use crate::block::Matrix;

pub struct Workers(u32);

impl Workers {
    #[inline(always)]
    pub fn new(lanes: u32) -> Workers { Workers(lanes) }

    #[inline(always)]
    pub fn map<F>(&mut self, matrix: &mut Matrix, f: &F)
        where F: Fn(&mut Matrix, u32) + Sync
    {
        for lane in 0..self.0 {
            f(matrix, lane);
        }
    }
}
