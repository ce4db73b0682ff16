//! # weft-solver
//!
//! Position-Based Dynamics cloth solver, its configuration and the
//! fixed-timestep simulation driver.
//!
//! ## Key Types
//!
//! - [`SimulationState`] — per-particle buffers
//! - [`SolverStrategy`] — pluggable solver trait
//! - [`PbdSolver`] — constraint relaxation with Jacobi-style averaging
//! - [`FreefallSolver`] — gravity-only baseline
//! - [`SolverConfig`] — timestep, iterations, stiffness, pinning
//! - [`Simulation`] — mesh + solver + state behind a fixed-step clock

pub mod config;
pub mod constraints;
pub mod freefall;
pub mod pbd_solver;
pub mod state;
pub mod stepper;
pub mod strategy;

pub use config::SolverConfig;
pub use freefall::FreefallSolver;
pub use pbd_solver::PbdSolver;
pub use state::{Particle, SimulationState};
pub use stepper::{FixedStepper, FrameReport, Simulation};
pub use strategy::{SolverStrategy, StepResult};
