//! The `threaded` Workers: one `scoped_threadpool::Pool` thread per lane,
//! dispatched once per slice.

use crate::block::Matrix;

pub struct Workers(u32, Option<scoped_threadpool::Pool>);

impl Workers {
    #[inline(always)]
    pub fn new(lanes: u32) -> Workers {
        match lanes {
            1 => Workers(lanes, None),
            n => Workers(lanes, Some(scoped_threadpool::Pool::new(n))),
        }
    }

    /// Run `f(matrix, lane)` for every lane, in parallel when there is more
    /// than one. `f` must only touch the lane it is given -- the slice
    /// barrier guarantees lanes are disjoint for the duration of one call.
    #[inline(always)]
    pub fn map<F>(&mut self, matrix: &mut Matrix, f: &F)
        where F: Fn(&mut Matrix, u32) + Sync
    {
        match self {
            Workers(1, _) => f(matrix, 0),
            Workers(lanes, Some(pool)) => {
                let lanes = *lanes;
                pool.scoped(|sc| {
                    for lane in 0..lanes {
                        // Safety: each closure only ever calls `f` with its
                        // own `lane`, and `f`'s contract confines it to that
                        // lane's blocks, so the aliased views never overlap.
                        let m = unsafe { matrix.alias_mut() };
                        sc.execute(move || f(m, lane));
                    }
                })
            }
            _ => unreachable!(),
        }
    }
}
