//! Solver configuration.
//!
//! Parameters that control solver behavior: timestep, iteration count,
//! constraint stiffness, pinning and particle mass.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_types::constants::{DEFAULT_DT, DEFAULT_ITERATIONS, DEFAULT_PARTICLE_MASS, GRAVITY};
use weft_types::{WeftError, WeftResult};

/// Configuration for the simulation solver.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Gravity vector in m/s².
    pub gravity: Vec3,

    /// Size of one simulation step in seconds.
    pub fixed_timestep: f32,

    /// Relaxation passes (Project + Average) per step.
    pub iteration_count: u32,

    /// Distance stiffness applied when an edge is shorter than rest.
    pub distance_compression_stiffness: f32,

    /// Distance stiffness applied when an edge is longer than rest.
    pub distance_stretch_stiffness: f32,

    /// Bending stiffness applied when the hinge is flatter than rest.
    pub bending_compression_stiffness: f32,

    /// Bending stiffness applied when the hinge is folded past rest.
    pub bending_stretch_stiffness: f32,

    /// Whether bending constraints are built and projected.
    pub bending_enabled: bool,

    /// Indices of anchored particles.
    pub pinned: Vec<u32>,

    /// Mass of every simulated particle (kg).
    pub particle_mass: f32,

    /// Velocity damping factor (0.0 = no damping, 1.0 = full damping).
    pub damping: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            fixed_timestep: DEFAULT_DT,
            iteration_count: DEFAULT_ITERATIONS,
            distance_compression_stiffness: 1.0,
            distance_stretch_stiffness: 1.0,
            bending_compression_stiffness: 0.5,
            bending_stretch_stiffness: 0.5,
            bending_enabled: true,
            pinned: Vec::new(),
            particle_mass: DEFAULT_PARTICLE_MASS,
            damping: 0.0,
        }
    }
}

impl SolverConfig {
    /// Creates a config for debugging (few iterations, no bending).
    pub fn debug() -> Self {
        Self {
            iteration_count: 3,
            bending_enabled: false,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (smaller steps, more iterations).
    pub fn high_quality() -> Self {
        Self {
            fixed_timestep: DEFAULT_DT * 0.5,
            iteration_count: 30,
            bending_compression_stiffness: 0.8,
            bending_stretch_stiffness: 0.8,
            ..Default::default()
        }
    }

    /// Returns a copy with the given particles pinned.
    pub fn with_pinned(mut self, pinned: impl IntoIterator<Item = u32>) -> Self {
        self.pinned = pinned.into_iter().collect();
        self
    }

    /// Checks every value range.
    ///
    /// Pinned indices are checked against the mesh when the simulation
    /// state is built.
    pub fn validate(&self) -> WeftResult<()> {
        if !self.gravity.is_finite() {
            return Err(WeftError::InvalidConfig(format!(
                "Gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "Fixed timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.iteration_count < 1 {
            return Err(WeftError::InvalidConfig(
                "Iteration count must be at least 1".into(),
            ));
        }

        let stiffnesses = [
            ("distance_compression_stiffness", self.distance_compression_stiffness),
            ("distance_stretch_stiffness", self.distance_stretch_stiffness),
            ("bending_compression_stiffness", self.bending_compression_stiffness),
            ("bending_stretch_stiffness", self.bending_stretch_stiffness),
        ];
        for (name, value) in stiffnesses {
            if !(0.0..=1.0).contains(&value) {
                return Err(WeftError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "Particle mass must be positive, got {}",
                self.particle_mass
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(WeftError::InvalidConfig(format!(
                "Damping must be in [0, 1], got {}",
                self.damping
            )));
        }

        Ok(())
    }
}
