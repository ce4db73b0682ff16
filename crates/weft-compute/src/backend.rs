//! Compute backend trait and its CPU implementations.
//!
//! The [`ComputeBackend`] trait defines the interface for dispatching
//! data-parallel work. Every dispatch is a full barrier: it returns only
//! after all work-items have completed, which is what separates the
//! solver phases from one another.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;
use weft_types::{WeftError, WeftResult};

/// Trait for compute backends.
///
/// Kernels receive the work-item index. Work-items of one dispatch must
/// not depend on each other; shared writes go through atomics such as
/// [`ConstraintAccumulator`](crate::ConstraintAccumulator).
///
/// # Implementations
/// - [`CpuFallback`] — Sequential reference (always deterministic)
/// - [`RayonBackend`] — Parallel dispatch on a rayon thread pool
pub trait ComputeBackend: Send + Sync {
    /// Returns the backend name (e.g., "cpu_fallback", "rayon").
    fn name(&self) -> &str;

    /// Returns true if work-items may run concurrently.
    fn is_parallel(&self) -> bool;

    /// Runs `kernel(i)` for every `i` in `0..count`.
    fn dispatch<K>(&self, count: usize, kernel: K)
    where
        K: Fn(usize) + Send + Sync;

    /// Runs `kernel(i, &mut items[i])` for every item.
    fn dispatch_mut<T, K>(&self, items: &mut [T], kernel: K)
    where
        T: Send,
        K: Fn(usize, &mut T) + Send + Sync;
}

/// CPU fallback backend — sequential reference implementation.
///
/// Used for:
/// - Correctness validation (parallel results must match)
/// - Small meshes where thread hand-off isn't worthwhile
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFallback;

impl CpuFallback {
    /// Creates a new CPU fallback backend.
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuFallback {
    fn name(&self) -> &str {
        "cpu_fallback"
    }

    fn is_parallel(&self) -> bool {
        false
    }

    fn dispatch<K>(&self, count: usize, kernel: K)
    where
        K: Fn(usize) + Send + Sync,
    {
        (0..count).for_each(kernel);
    }

    fn dispatch_mut<T, K>(&self, items: &mut [T], kernel: K)
    where
        T: Send,
        K: Fn(usize, &mut T) + Send + Sync,
    {
        for (i, item) in items.iter_mut().enumerate() {
            kernel(i, item);
        }
    }
}

/// Work-items handed to one rayon task at minimum.
const DEFAULT_MIN_LEN: usize = 64;

/// Parallel backend on a rayon work-stealing pool.
///
/// Uses the global pool unless built with [`RayonBackend::with_threads`].
pub struct RayonBackend {
    pool: Option<ThreadPool>,
    min_len: usize,
}

impl RayonBackend {
    /// Creates a backend on the global rayon pool.
    pub fn new() -> Self {
        Self {
            pool: None,
            min_len: DEFAULT_MIN_LEN,
        }
    }

    /// Creates a backend with a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> WeftResult<Self> {
        if threads == 0 {
            return Err(WeftError::InvalidConfig(
                "Thread count must be at least 1".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("weft-worker-{i}"))
            .build()
            .map_err(|e| WeftError::InvalidConfig(format!("Thread pool: {e}")))?;
        debug!(threads, "rayon pool created");
        Ok(Self {
            pool: Some(pool),
            min_len: DEFAULT_MIN_LEN,
        })
    }

    /// Sets the minimum number of work-items per task.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Number of worker threads available to dispatches.
    pub fn thread_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn run<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for RayonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for RayonBackend {
    fn name(&self) -> &str {
        "rayon"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn dispatch<K>(&self, count: usize, kernel: K)
    where
        K: Fn(usize) + Send + Sync,
    {
        let min_len = self.min_len;
        self.run(|| {
            (0..count)
                .into_par_iter()
                .with_min_len(min_len)
                .for_each(kernel)
        });
    }

    fn dispatch_mut<T, K>(&self, items: &mut [T], kernel: K)
    where
        T: Send,
        K: Fn(usize, &mut T) + Send + Sync,
    {
        let min_len = self.min_len;
        self.run(|| {
            items
                .par_iter_mut()
                .with_min_len(min_len)
                .enumerate()
                .for_each(|(i, item)| kernel(i, item))
        });
    }
}
