//! Runs a [`SimulationInput`] to completion.

use std::time::Instant;

use tracing::info;
use weft_solver::{Simulation, SolverStrategy};
use weft_types::WeftResult;

use crate::contract::{SimulationInput, SimulationMetrics, SimulationOutput};
use crate::validator::validate_input;

/// Validates `input`, then feeds `duration` seconds of frames of
/// `frame_time` to `solver` through the fixed-step clock.
///
/// The last frame is shortened so that exactly `duration` seconds are
/// handed to the clock; banked time below one step is not simulated.
pub fn run_input(
    input: &SimulationInput,
    solver: Box<dyn SolverStrategy>,
) -> WeftResult<SimulationOutput> {
    validate_input(input)?;

    let mesh = input.source.build_mesh()?;
    let triangles: Vec<[u32; 3]> = mesh.triangles().collect();
    let start = Instant::now();
    let mut sim = Simulation::new(mesh, input.config.clone(), solver)?;

    let duration = input.duration as f64;
    let frame_time = input.frame_time as f64;
    let frame_count = (duration / frame_time).ceil() as u32;
    let mut iterations = 0u64;
    for frame in 0..frame_count {
        let elapsed = frame_time.min(duration - frame as f64 * frame_time);
        let report = sim.frame(elapsed as f32)?;
        iterations += report.iterations as u64;
    }

    let steps = sim.steps_taken();
    let metrics = SimulationMetrics {
        solver: sim.solver_name().to_string(),
        wall_time_seconds: start.elapsed().as_secs_f64(),
        frame_count,
        step_count: steps,
        simulated_time: sim.simulated_time(),
        final_kinetic_energy: sim.kinetic_energy(),
        max_stretch: sim.max_stretch(),
        avg_iterations: if steps > 0 {
            (iterations as f64 / steps as f64) as f32
        } else {
            0.0
        },
    };

    info!(
        solver = %metrics.solver,
        frames = frame_count,
        steps,
        wall_time = metrics.wall_time_seconds,
        "simulation finished"
    );

    Ok(SimulationOutput {
        positions: sim.positions(),
        triangles,
        metrics,
    })
}
