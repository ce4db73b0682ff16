//! # weft-bench
//!
//! Benchmark suite for the Weft cloth engine.
//!
//! Provides three procedural cloth scenarios, a runner that drives any
//! [`SolverStrategy`](weft_solver::SolverStrategy) through the fixed-step
//! clock while emitting telemetry, and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
