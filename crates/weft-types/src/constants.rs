//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Default fixed simulation timestep (seconds).
pub const DEFAULT_DT: f32 = 0.01;

/// Default number of relaxation iterations per timestep.
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Default mass of a single particle (kg).
pub const DEFAULT_PARTICLE_MASS: f32 = 1.0;

/// Lengths below this are treated as zero (degenerate edges, normals).
pub const EPSILON: f32 = 1.0e-7;
