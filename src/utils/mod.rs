//! Parallelism helpers.
//!
//! Leaf hashing fans out over rayon when the `parallel` feature is enabled
//! and the runtime toggle is on. Internal-node levels are never
//! parallelized: each level is a strict data dependency of the one below it.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 64;

/// Chunk size handed to rayon so tiny inputs stay on one thread.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    DEFAULT_CHUNK_SIZE.min(total_items.max(1))
}

/// Whether leaf hashing may fan out right now.
#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

/// Whether leaf hashing may fan out right now.
#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Overrides the parallelism toggle until the returned guard drops.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

/// Overrides the parallelism toggle until the returned guard drops.
#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous toggle state on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(not(feature = "parallel"))]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {}
}
