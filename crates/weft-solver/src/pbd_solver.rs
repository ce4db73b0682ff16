//! Position-Based Dynamics solver.
//!
//! Each step runs the state machine:
//! 1. **ApplyForces** — `v += g * dt`
//! 2. **Predict** — `projected = position + v * dt`
//! 3. **Project** — every constraint adds its corrections to the
//!    accumulator (no position is written)
//! 4. **Average** — every particle moves by the mean of its corrections
//! 5. **Repeat** steps 3–4 `iteration_count` times
//! 6. **Reconcile** — velocity from displacement, commit positions
//!
//! Each phase is one backend dispatch, and a dispatch returns only after
//! all of its work-items finished, so phases never overlap.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use tracing::{debug, trace};
use weft_compute::{ComputeBackend, ConstraintAccumulator, RayonBackend};
use weft_mesh::Topology;
use weft_mesh::TriangleMesh;
use weft_types::WeftResult;

use crate::config::SolverConfig;
use crate::constraints::{BendingConstraint, DistanceConstraint};
use crate::state::{Particle, SimulationState};
use crate::strategy::{check_step, SolverStrategy, StepResult};

/// PBD cloth solver with Jacobi-style constraint averaging.
///
/// Constraints are built once in `init()` from the rest pose and are
/// read-only afterwards. Generic over the dispatch backend so the same
/// solve runs sequentially ([`CpuFallback`](weft_compute::CpuFallback))
/// or on a thread pool ([`RayonBackend`]).
pub struct PbdSolver<B: ComputeBackend = RayonBackend> {
    backend: B,
    distance: Vec<DistanceConstraint>,
    bending: Vec<BendingConstraint>,
    accumulator: ConstraintAccumulator,
    config: SolverConfig,
    initialized: bool,
}

impl PbdSolver {
    /// Creates a new solver (uninitialized) on the global rayon pool.
    pub fn new() -> Self {
        Self::with_backend(RayonBackend::new())
    }
}

impl Default for PbdSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ComputeBackend> PbdSolver<B> {
    /// Creates a new solver (uninitialized) dispatching on `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            distance: Vec::new(),
            bending: Vec::new(),
            accumulator: ConstraintAccumulator::new(0),
            config: SolverConfig::default(),
            initialized: false,
        }
    }

    /// The dispatch backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Distance constraints built by `init()`.
    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.distance
    }

    /// Bending constraints built by `init()`; empty when bending is off.
    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.bending
    }

    /// Project: accumulate the corrections of every constraint.
    ///
    /// Pinned endpoints (`inv_mass == 0`) receive nothing.
    fn project(&self, particles: &[Particle]) {
        let acc = &self.accumulator;

        self.backend.dispatch(self.distance.len(), |c| {
            let constraint = &self.distance[c];
            let (a, b) = (constraint.edge.a as usize, constraint.edge.b as usize);
            let (pa, pb) = (&particles[a], &particles[b]);
            if let Some(deltas) = constraint.project(pa.projected, pb.projected, pa.inv_mass, pb.inv_mass) {
                for (i, delta) in [a, b].into_iter().zip(deltas) {
                    if particles[i].inv_mass > 0.0 {
                        acc.add(i, delta);
                    }
                }
            }
        });

        self.backend.dispatch(self.bending.len(), |c| {
            let constraint = &self.bending[c];
            let stencil = constraint.stencil().map(|i| i as usize);
            let p = stencil.map(|i| particles[i].projected);
            let w = stencil.map(|i| particles[i].inv_mass);
            if let Some(deltas) = constraint.project(p, w) {
                for (i, delta) in stencil.into_iter().zip(deltas) {
                    if particles[i].inv_mass > 0.0 {
                        acc.add(i, delta);
                    }
                }
            }
        });
    }

    /// Average: apply the mean correction of every simulated particle and
    /// clear the accumulator. Returns the largest correction applied.
    fn average(&self, particles: &mut [Particle]) -> f32 {
        let acc = &self.accumulator;
        // Non-negative f32 order matches the order of their bit patterns.
        let max_bits = AtomicU32::new(0);

        self.backend.dispatch_mut(particles, |i, p| {
            let Some(delta) = acc.take(i) else {
                return;
            };
            if p.simulated {
                p.projected += delta;
                max_bits.fetch_max(delta.length().to_bits(), Ordering::Relaxed);
            }
        });

        f32::from_bits(max_bits.into_inner())
    }
}

impl<B: ComputeBackend> SolverStrategy for PbdSolver<B> {
    fn init(
        &mut self,
        mesh: &TriangleMesh,
        topology: &Topology,
        config: &SolverConfig,
    ) -> WeftResult<()> {
        config.validate()?;
        mesh.validate()?;

        self.distance = DistanceConstraint::build_all(topology, &mesh.positions, config);
        self.bending = if config.bending_enabled {
            BendingConstraint::build_all(topology, &mesh.positions, config)
        } else {
            Vec::new()
        };
        self.accumulator = ConstraintAccumulator::new(mesh.vertex_count());
        self.config = config.clone();
        self.initialized = true;

        debug!(
            backend = self.backend.name(),
            particles = mesh.vertex_count(),
            distance = self.distance.len(),
            bending = self.bending.len(),
            "pbd solver initialized"
        );
        Ok(())
    }

    fn step(&mut self, state: &mut SimulationState, dt: f32) -> WeftResult<StepResult> {
        check_step(self.initialized, self.accumulator.len(), state)?;
        let start = Instant::now();

        self.accumulator.reset();
        state.apply_forces(&self.backend, self.config.gravity, dt);
        state.predict(&self.backend, dt);

        let mut max_correction = 0.0;
        for iteration in 0..self.config.iteration_count {
            self.project(state.particles.as_slice());
            max_correction = self.average(state.particles.as_mut_slice());
            trace!(iteration, max_correction, "relaxation pass");
        }

        state.reconcile(&self.backend, dt, self.config.damping);

        Ok(StepResult {
            iterations: self.config.iteration_count,
            distance_constraints: self.distance.len(),
            bending_constraints: self.bending.len(),
            max_correction,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "pbd"
    }
}
