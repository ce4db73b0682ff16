//! Solver strategy trait — the core abstraction for time integration.
//!
//! Every solver implements this trait, enabling the simulation pipeline
//! and the benchmarks to swap between the PBD solver and the gravity-only
//! baseline at runtime.

use weft_mesh::Topology;
use weft_mesh::TriangleMesh;
use weft_types::{WeftError, WeftResult};

use crate::config::SolverConfig;
use crate::state::SimulationState;

/// Result of a solver step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepResult {
    /// Relaxation passes performed.
    pub iterations: u32,
    /// Distance constraints in the solve.
    pub distance_constraints: usize,
    /// Bending constraints in the solve.
    pub bending_constraints: usize,
    /// Largest averaged correction applied to any particle in the last
    /// relaxation pass (meters).
    pub max_correction: f32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration solvers.
///
/// The simulation pipeline calls these methods in order:
///
/// ```text
/// solver.init(mesh, topology, config)?;
/// loop {
///     solver.step(state, dt)?;
/// }
/// ```
///
/// # Implementations
///
/// - [`PbdSolver`](crate::pbd_solver::PbdSolver) — constraint relaxation
/// - [`FreefallSolver`](crate::freefall::FreefallSolver) — gravity only
pub trait SolverStrategy: Send {
    /// Initialize the solver with mesh topology and configuration.
    ///
    /// Called once. The solver builds its rest-state data here.
    fn init(
        &mut self,
        mesh: &TriangleMesh,
        topology: &Topology,
        config: &SolverConfig,
    ) -> WeftResult<()>;

    /// Advance the simulation by one timestep of `dt` seconds.
    ///
    /// Runs the whole step: forces, prediction, relaxation and
    /// reconciliation.
    fn step(&mut self, state: &mut SimulationState, dt: f32) -> WeftResult<StepResult>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}

/// Rejects stepping before `init()` or with a state of the wrong size.
pub(crate) fn check_step(
    initialized: bool,
    expected_particles: usize,
    state: &SimulationState,
) -> WeftResult<()> {
    if !initialized {
        return Err(WeftError::InvalidConfig(
            "Solver not initialized. Call init() first.".into(),
        ));
    }
    if state.particle_count() != expected_particles {
        return Err(WeftError::InvalidMesh(format!(
            "State has {} particles, solver was initialized for {}",
            state.particle_count(),
            expected_particles
        )));
    }
    Ok(())
}
