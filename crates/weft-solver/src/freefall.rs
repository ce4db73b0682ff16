//! Gravity-only baseline solver.
//!
//! Implements the full solver interface but skips constraint projection.
//! It runs force application, prediction and reconciliation exactly like
//! [`PbdSolver`](crate::pbd_solver::PbdSolver), producing a ballistic
//! trajectory modified only by damping and pinning.

use std::time::Instant;

use weft_compute::{ComputeBackend, CpuFallback};
use weft_mesh::Topology;
use weft_mesh::TriangleMesh;
use weft_types::WeftResult;

use crate::config::SolverConfig;
use crate::state::SimulationState;
use crate::strategy::{check_step, SolverStrategy, StepResult};

/// Unconstrained solver.
///
/// Exists to:
/// 1. Validate the pipeline (mesh → state → solver → output)
/// 2. Provide a baseline for benchmark comparisons
pub struct FreefallSolver<B: ComputeBackend = CpuFallback> {
    backend: B,
    config: SolverConfig,
    particle_count: usize,
    initialized: bool,
}

impl FreefallSolver {
    /// Creates a new solver on the sequential backend.
    pub fn new() -> Self {
        Self::with_backend(CpuFallback)
    }
}

impl Default for FreefallSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ComputeBackend> FreefallSolver<B> {
    /// Creates a new solver dispatching on `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            config: SolverConfig::default(),
            particle_count: 0,
            initialized: false,
        }
    }
}

impl<B: ComputeBackend> SolverStrategy for FreefallSolver<B> {
    fn init(
        &mut self,
        mesh: &TriangleMesh,
        _topology: &Topology,
        config: &SolverConfig,
    ) -> WeftResult<()> {
        config.validate()?;
        self.config = config.clone();
        self.particle_count = mesh.vertex_count();
        self.initialized = true;
        Ok(())
    }

    fn step(&mut self, state: &mut SimulationState, dt: f32) -> WeftResult<StepResult> {
        check_step(self.initialized, self.particle_count, state)?;
        let start = Instant::now();

        state.apply_forces(&self.backend, self.config.gravity, dt);
        state.predict(&self.backend, dt);
        state.reconcile(&self.backend, dt, self.config.damping);

        Ok(StepResult {
            wall_time: start.elapsed().as_secs_f64(),
            ..StepResult::default()
        })
    }

    fn name(&self) -> &str {
        "freefall"
    }
}
