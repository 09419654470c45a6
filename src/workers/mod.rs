//! Per-lane fan-out: a thin work-queue over the lanes of one segment.
//!
//! One task per lane per slice, joined at the slice barrier, instead of
//! spawning a raw thread per slice -- this keeps thread-pool lifetime out
//! of the hot loop. A single-lane instance never touches a pool at all.

#[cfg(feature = "threaded")]
pub use self::threadpool::Workers;

#[cfg(feature = "threaded")]
mod threadpool;

#[cfg(not(feature = "threaded"))]
pub use self::no_threadpool::Workers;

#[cfg(not(feature = "threaded"))]
mod no_threadpool;
