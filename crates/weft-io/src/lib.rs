//! # weft-io
//!
//! Simulation input/output contract, input validation and file formats.
//!
//! Defines the boundary types that external systems (CLI, scripts, asset
//! pipelines) use to communicate with the Weft simulation core.

pub mod contract;
pub mod format;
pub mod session;
pub mod validator;

pub use contract::{GridParams, MeshSource, SimulationInput, SimulationMetrics, SimulationOutput};
pub use session::run_input;
pub use validator::validate_input;
