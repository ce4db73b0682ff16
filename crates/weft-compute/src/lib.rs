//! # weft-compute
//!
//! Compute substrate for the Weft solver.
//!
//! Provides the two primitives the solver is written against:
//! - [`ComputeBackend`] — "dispatch N work-items calling kernel K", with
//!   [`CpuFallback`] (sequential reference) and [`RayonBackend`]
//!   (work-stealing thread pool) implementations.
//! - [`ConstraintAccumulator`] — parallel-safe additive accumulation of
//!   per-particle position corrections.
//!
//! [`ComputeBuffer`] is the scoped handle for per-particle storage.

pub mod accumulator;
pub mod backend;
pub mod buffers;

pub use accumulator::ConstraintAccumulator;
pub use backend::{ComputeBackend, CpuFallback, RayonBackend};
pub use buffers::ComputeBuffer;
