//! Simulation state — per-particle buffers and the per-particle phases.
//!
//! This is the primary mutable data structure during simulation. The
//! solver owns it for the lifetime of a run; constraints only read it.

use glam::Vec3;
use weft_compute::{ComputeBackend, ComputeBuffer};
use weft_mesh::TriangleMesh;
use weft_types::{WeftError, WeftResult};

use crate::config::SolverConfig;

/// One cloth particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position at the end of the last step.
    pub position: Vec3,
    /// Candidate position while the step is being solved.
    pub projected: Vec3,
    /// Position at the start of the current step.
    pub previous: Vec3,
    pub velocity: Vec3,
    /// `0.0` for pinned particles.
    pub inv_mass: f32,
    /// False for pinned particles, which skip forces, prediction and
    /// reconciliation.
    pub simulated: bool,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn at_rest(position: Vec3, inv_mass: f32, simulated: bool) -> Self {
        Self {
            position,
            projected: position,
            previous: position,
            velocity: Vec3::ZERO,
            inv_mass,
            simulated,
        }
    }
}

/// Per-particle simulation buffers.
///
/// Held in a [`ComputeBuffer`] so that the storage is released, and the
/// release logged, whenever the state is dropped.
#[derive(Debug)]
pub struct SimulationState {
    pub particles: ComputeBuffer<Particle>,
}

impl SimulationState {
    /// Initialize simulation state from a mesh and configuration.
    ///
    /// Copies positions from the mesh. Velocities start at zero. Pinned
    /// particles get `inv_mass = 0.0` and `simulated = false`.
    pub fn from_mesh(mesh: &TriangleMesh, config: &SolverConfig) -> WeftResult<Self> {
        let n = mesh.vertex_count();

        let mut pinned = vec![false; n];
        for &p in &config.pinned {
            let slot = pinned.get_mut(p as usize).ok_or_else(|| {
                WeftError::InvalidConfig(format!(
                    "Pinned index {p} is out of range (vertex count: {n})"
                ))
            })?;
            *slot = true;
        }

        let inv_mass = 1.0 / config.particle_mass;
        let particles = mesh
            .positions
            .iter()
            .zip(&pinned)
            .map(|(&pos, &is_pinned)| {
                if is_pinned {
                    Particle::at_rest(pos, 0.0, false)
                } else {
                    Particle::at_rest(pos, inv_mass, true)
                }
            })
            .collect();

        Ok(Self {
            particles: ComputeBuffer::from_data("particles", particles),
        })
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Current positions, in mesh order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Overwrites current positions, e.g. to hand the state a new pose.
    ///
    /// Pinned particles move too: pinning only freezes them during steps.
    pub fn write_positions(&mut self, positions: &[Vec3]) -> WeftResult<()> {
        if positions.len() != self.particle_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Position count ({}) != particle count ({})",
                positions.len(),
                self.particle_count()
            )));
        }
        for (p, &pos) in self.particles.as_mut_slice().iter_mut().zip(positions) {
            *p = Particle { velocity: p.velocity, ..Particle::at_rest(pos, p.inv_mass, p.simulated) };
        }
        Ok(())
    }

    /// ApplyForces: `v += g * dt` for simulated particles.
    pub fn apply_forces<B: ComputeBackend>(&mut self, backend: &B, gravity: Vec3, dt: f32) {
        let dv = gravity * dt;
        backend.dispatch_mut(self.particles.as_mut_slice(), |_, p| {
            if p.simulated {
                p.velocity += dv;
            }
        });
    }

    /// Predict: `projected = position + v * dt`, explicit Euler.
    ///
    /// Pinned particles keep `projected = position`. Every particle
    /// records its start-of-step position.
    pub fn predict<B: ComputeBackend>(&mut self, backend: &B, dt: f32) {
        backend.dispatch_mut(self.particles.as_mut_slice(), |_, p| {
            p.previous = p.position;
            p.projected = if p.simulated {
                p.position + p.velocity * dt
            } else {
                p.position
            };
        });
    }

    /// Reconcile: derive velocity from the solved displacement, commit
    /// the projected position, then apply damping `v *= 1 - damping`.
    pub fn reconcile<B: ComputeBackend>(&mut self, backend: &B, dt: f32, damping: f32) {
        let inv_dt = 1.0 / dt;
        let factor = 1.0 - damping;
        backend.dispatch_mut(self.particles.as_mut_slice(), |_, p| {
            if !p.simulated {
                return;
            }
            p.velocity = (p.projected - p.previous) * inv_dt * factor;
            p.position = p.projected;
            p.previous = p.projected;
        });
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .filter(|p| p.inv_mass > 0.0)
            .map(|p| 0.5 * p.velocity.length_squared() as f64 / p.inv_mass as f64)
            .sum()
    }
}
