//! Fixed-timestep driver.
//!
//! Frames arrive with arbitrary elapsed wall time; the solver only ever
//! advances by `fixed_timestep`. [`FixedStepper`] banks the difference,
//! and [`Simulation`] ties the stepper, the solver and its state together.

use glam::Vec3;
use tracing::{debug, warn};
use weft_mesh::Topology;
use weft_mesh::TriangleMesh;
use weft_types::constants::EPSILON;
use weft_types::{WeftError, WeftResult};

use crate::config::SolverConfig;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepResult};

/// Fixed-timestep accumulator.
///
/// The banked time is never negative and, after [`advance`](Self::advance)
/// returns, always below one timestep.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    timestep: f64,
    accumulated: f64,
}

impl FixedStepper {
    /// Creates a stepper consuming steps of `timestep` seconds.
    pub fn new(timestep: f32) -> WeftResult<Self> {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "Fixed timestep must be positive, got {timestep}"
            )));
        }
        Ok(Self {
            timestep: timestep as f64,
            accumulated: 0.0,
        })
    }

    /// The step size in seconds.
    pub fn timestep(&self) -> f32 {
        self.timestep as f32
    }

    /// Banked time not yet consumed by a step.
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Banks `elapsed` seconds and returns how many steps are now due.
    ///
    /// Negative or non-finite elapsed time is ignored.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            warn!(elapsed, "ignoring invalid frame time");
            return 0;
        }

        self.accumulated += elapsed as f64;
        let mut steps = 0;
        while self.accumulated >= self.timestep {
            self.accumulated -= self.timestep;
            steps += 1;
        }
        steps
    }
}

/// Outcome of one [`Simulation::frame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    /// Fixed steps run during the frame.
    pub steps: u32,
    /// Relaxation passes summed over those steps.
    pub iterations: u32,
    /// Result of the last step, if any ran.
    pub last_step: Option<StepResult>,
    /// Banked time carried to the next frame.
    pub leftover: f64,
}

/// A cloth simulation: rest mesh, topology, solver and live state.
pub struct Simulation {
    mesh: TriangleMesh,
    topology: Topology,
    config: SolverConfig,
    solver: Box<dyn SolverStrategy>,
    state: SimulationState,
    stepper: FixedStepper,
    steps_taken: u64,
}

impl Simulation {
    /// Builds topology and constraints and initializes `solver`.
    ///
    /// Fails fast on a malformed mesh or configuration.
    pub fn new(
        mesh: TriangleMesh,
        config: SolverConfig,
        mut solver: Box<dyn SolverStrategy>,
    ) -> WeftResult<Self> {
        config.validate()?;
        mesh.validate()?;

        let topology = Topology::build(&mesh);
        let state = SimulationState::from_mesh(&mesh, &config)?;
        solver.init(&mesh, &topology, &config)?;
        let stepper = FixedStepper::new(config.fixed_timestep)?;

        debug!(
            solver = solver.name(),
            particles = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            pinned = config.pinned.len(),
            "simulation ready"
        );

        Ok(Self {
            mesh,
            topology,
            config,
            solver,
            state,
            stepper,
            steps_taken: 0,
        })
    }

    /// Advances by `elapsed` seconds of wall time, running every due step.
    pub fn frame(&mut self, elapsed: f32) -> WeftResult<FrameReport> {
        self.frame_with(elapsed, |_, _| {})
    }

    /// Like [`frame`](Self::frame), calling `on_step(step_index, result)`
    /// after every fixed step.
    pub fn frame_with<F>(&mut self, elapsed: f32, mut on_step: F) -> WeftResult<FrameReport>
    where
        F: FnMut(u64, &StepResult),
    {
        let steps = self.stepper.advance(elapsed);
        let mut last_step = None;
        let mut iterations = 0;
        for _ in 0..steps {
            let index = self.steps_taken;
            let result = self.step()?;
            on_step(index, &result);
            iterations += result.iterations;
            last_step = Some(result);
        }
        Ok(FrameReport {
            steps,
            iterations,
            last_step,
            leftover: self.stepper.accumulated(),
        })
    }

    /// Runs exactly one fixed step, bypassing the time bank.
    pub fn step(&mut self) -> WeftResult<StepResult> {
        let result = self.solver.step(&mut self.state, self.stepper.timestep())?;
        self.steps_taken += 1;
        Ok(result)
    }

    /// Current particle positions, in mesh order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.state.positions()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Name of the solver driving this simulation.
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Fixed steps run so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Largest current-over-rest length ratio among the mesh edges.
    ///
    /// Zero-length rest edges are ignored.
    pub fn max_stretch(&self) -> f32 {
        let rest = &self.mesh.positions;
        let current = &self.state.particles;
        self.topology
            .edges
            .iter()
            .filter_map(|e| {
                let (a, b) = (e.a as usize, e.b as usize);
                let rest_length = rest[a].distance(rest[b]);
                (rest_length > EPSILON)
                    .then(|| current[a].position.distance(current[b].position) / rest_length)
            })
            .fold(0.0, f32::max)
    }

    /// Largest distance any particle has moved from its rest position.
    pub fn max_displacement(&self) -> f32 {
        self.mesh
            .positions
            .iter()
            .zip(self.state.particles.iter())
            .map(|(rest, p)| rest.distance(p.position))
            .fold(0.0, f32::max)
    }

    /// Kinetic energy of the live state.
    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    /// Gravitational potential energy relative to the rest pose.
    pub fn potential_energy(&self) -> f64 {
        let g = self.config.gravity;
        self.mesh
            .positions
            .iter()
            .zip(self.state.particles.iter())
            .filter(|(_, p)| p.inv_mass > 0.0)
            .map(|(rest, p)| -(g.dot(p.position - *rest) as f64) / p.inv_mass as f64)
            .sum()
    }

    /// Simulated time so far (seconds).
    pub fn simulated_time(&self) -> f64 {
        self.steps_taken as f64 * self.stepper.timestep() as f64
    }
}
