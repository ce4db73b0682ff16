//! Simulation input/output contract types.
//!
//! These types define the I/O boundary of the Weft engine. They are
//! serializable for CLI files and scripted pipelines.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_mesh::generators::grid;
use weft_mesh::TriangleMesh;
use weft_solver::SolverConfig;
use weft_types::WeftResult;

/// Parameters of the procedural cloth sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Cells along X.
    pub x_size: usize,
    /// Cells along Z.
    pub y_size: usize,
    /// Extent parameter along X (meters).
    pub width: f32,
    /// Extent parameter along Z (meters).
    pub height: f32,
}

impl GridParams {
    /// Generates the sheet.
    pub fn build(&self) -> WeftResult<TriangleMesh> {
        grid(self.x_size, self.y_size, self.width, self.height)
    }

    /// Number of particles the sheet will have.
    pub fn particle_count(&self) -> usize {
        (self.x_size + 1) * (self.y_size + 1)
    }

    /// Indices of the first particle row (`j = 0`).
    pub fn first_row(&self) -> impl Iterator<Item = u32> {
        0..(self.x_size as u32 + 1)
    }

    /// Indices of the two corners of the first row.
    pub fn first_row_corners(&self) -> [u32; 2] {
        [0, self.x_size as u32]
    }
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            x_size: 16,
            y_size: 16,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Where the cloth mesh comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshSource {
    /// Procedural sheet.
    Grid(GridParams),
    /// Externally supplied positions and triangles, used unchanged.
    Imported(TriangleMesh),
}

impl MeshSource {
    /// Produces the rest-pose mesh.
    pub fn build_mesh(&self) -> WeftResult<TriangleMesh> {
        match self {
            Self::Grid(params) => params.build(),
            Self::Imported(mesh) => {
                mesh.validate()?;
                Ok(mesh.clone())
            }
        }
    }
}

fn default_frame_time() -> f32 {
    1.0 / 60.0
}

/// Complete input specification for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Total simulated time in seconds.
    pub duration: f32,

    /// Wall time handed to each frame (seconds). The solver still advances
    /// in `config.fixed_timestep` steps.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,

    /// The cloth to simulate.
    pub source: MeshSource,

    /// Solver parameters, including pinned particles.
    #[serde(default)]
    pub config: SolverConfig,
}

impl SimulationInput {
    /// An input for `source` with default config and frame time.
    pub fn new(source: MeshSource, duration: f32) -> Self {
        Self {
            duration,
            frame_time: default_frame_time(),
            source,
            config: SolverConfig::default(),
        }
    }
}

/// Output from a completed simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Final particle positions, in input order.
    pub positions: Vec<Vec3>,

    /// Triangles of the simulated mesh.
    pub triangles: Vec<[u32; 3]>,

    /// Simulation-wide metrics.
    pub metrics: SimulationMetrics,
}

impl SimulationOutput {
    /// The final pose as a mesh.
    pub fn to_mesh(&self) -> TriangleMesh {
        TriangleMesh {
            positions: self.positions.clone(),
            indices: self.triangles.iter().flatten().copied().collect(),
        }
    }
}

/// Aggregate metrics from a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Name of the solver that ran.
    pub solver: String,
    /// Total simulation wall-clock time (seconds).
    pub wall_time_seconds: f64,
    /// Frames handed to the fixed-step clock.
    pub frame_count: u32,
    /// Fixed steps executed.
    pub step_count: u64,
    /// Simulated time covered by the steps (seconds).
    pub simulated_time: f64,
    /// Kinetic energy at the final step.
    pub final_kinetic_energy: f64,
    /// Largest edge length over rest length at the final step.
    pub max_stretch: f32,
    /// Average relaxation passes per step.
    pub avg_iterations: f32,
}
