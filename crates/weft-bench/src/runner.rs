//! Benchmark runner — executes scenarios with a solver and collects metrics.
//!
//! Every fixed step and frame is reported on the runner's [`EventBus`],
//! so a run can be traced or recorded without touching the solver.

use std::time::Instant;

use tracing::info;
use weft_solver::{Simulation, SolverStrategy, StepResult};
use weft_telemetry::bus::EventBus;
use weft_telemetry::events::{EventKind, SimulationEvent};
use weft_telemetry::sinks::EventSink;
use weft_types::WeftResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner {
    bus: EventBus,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkRunner {
    /// Creates a runner whose bus has no sinks.
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
        }
    }

    /// Creates a runner reporting to `sink`.
    pub fn with_sink(sink: Box<dyn EventSink>) -> Self {
        let mut runner = Self::new();
        runner.bus.add_sink(sink);
        runner
    }

    /// The runner's telemetry bus.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Run a single scenario with the given solver.
    ///
    /// Returns metrics for the completed run.
    pub fn run(
        &mut self,
        scenario: &Scenario,
        solver: Box<dyn SolverStrategy>,
    ) -> WeftResult<BenchmarkMetrics> {
        let mut sim = Simulation::new(scenario.mesh.clone(), scenario.config.clone(), solver)?;
        let dt = sim.config().fixed_timestep as f64;

        let mut step_times: Vec<f64> = Vec::new();
        let mut total_iterations: u64 = 0;
        let mut last_step = StepResult::default();

        let total_start = Instant::now();

        for _ in 0..scenario.frames {
            let bus = &self.bus;
            let report = sim.frame_with(scenario.frame_time, |step, result| {
                bus.emit(SimulationEvent::new(
                    step,
                    EventKind::StepBegin {
                        sim_time: step as f64 * dt,
                    },
                ));
                bus.emit(SimulationEvent::new(
                    step,
                    EventKind::Relaxation {
                        constraints: result.distance_constraints + result.bending_constraints,
                        max_correction: result.max_correction,
                    },
                ));
                bus.emit(SimulationEvent::new(
                    step,
                    EventKind::StepEnd {
                        wall_time: result.wall_time,
                        iterations: result.iterations,
                    },
                ));
                step_times.push(result.wall_time);
                total_iterations += result.iterations as u64;
            })?;

            if let Some(result) = report.last_step {
                last_step = result;
            }
            self.bus.emit(SimulationEvent::new(
                sim.steps_taken(),
                EventKind::FrameAdvanced {
                    elapsed: scenario.frame_time as f64,
                    steps: report.steps,
                    leftover: report.leftover,
                },
            ));
            self.bus.flush();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let final_ke = sim.kinetic_energy();
        self.bus.emit(SimulationEvent::new(
            sim.steps_taken(),
            EventKind::Energy {
                kinetic: final_ke,
                potential: sim.potential_energy(),
            },
        ));
        self.bus.flush();

        let steps = step_times.len();
        let avg_step = if steps == 0 {
            0.0
        } else {
            step_times.iter().sum::<f64>() / steps as f64
        };
        let min_step = if steps == 0 {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step = step_times.iter().copied().fold(0.0, f64::max);
        let avg_iter = if steps == 0 {
            0.0
        } else {
            total_iterations as f32 / steps as f32
        };

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            solver: sim.solver_name().to_string(),
            vertex_count: scenario.mesh.vertex_count(),
            triangle_count: scenario.mesh.triangle_count(),
            frames: scenario.frames,
            steps: sim.steps_taken(),
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: final_ke,
            max_displacement: sim.max_displacement(),
            max_stretch: sim.max_stretch(),
            final_max_correction: last_step.max_correction,
            avg_iterations: avg_iter,
        };

        info!(
            scenario = %metrics.scenario,
            solver = %metrics.solver,
            steps = metrics.steps,
            wall_time = metrics.total_wall_time,
            max_stretch = metrics.max_stretch,
            "benchmark complete"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    ///
    /// `make_solver` supplies a fresh solver for every scenario.
    pub fn run_all<F>(&mut self, mut make_solver: F) -> WeftResult<Vec<BenchmarkMetrics>>
    where
        F: FnMut() -> Box<dyn SolverStrategy>,
    {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            let metrics = self.run(&scenario, make_solver())?;
            results.push(metrics);
        }
        self.bus.finish();
        Ok(results)
    }
}
