//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Solver name.
    pub solver: String,
    /// Particle count.
    pub vertex_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Frames handed to the fixed-step clock.
    pub frames: u32,
    /// Fixed steps executed.
    pub steps: u64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Final kinetic energy (should settle for a stable drape).
    pub final_kinetic_energy: f64,
    /// Maximum particle displacement from its rest position.
    pub max_displacement: f32,
    /// Largest edge length over rest length at the end of the run.
    pub max_stretch: f32,
    /// Largest averaged correction of the final step.
    pub final_max_correction: f32,
    /// Average relaxation passes per step (0 for the gravity-only solver).
    pub avg_iterations: f32,
}

impl BenchmarkMetrics {
    /// The CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,solver,vertex_count,triangle_count,frames,steps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,max_stretch,final_max_correction,avg_iterations".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{:.6e},{:.1}",
            self.scenario,
            self.solver,
            self.vertex_count,
            self.triangle_count,
            self.frames,
            self.steps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_stretch,
            self.final_max_correction,
            self.avg_iterations,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
