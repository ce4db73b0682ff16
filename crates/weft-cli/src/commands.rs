//! CLI command implementations.

use std::path::Path;

use tracing::Level;
use weft_bench::metrics::BenchmarkMetrics;
use weft_bench::runner::BenchmarkRunner;
use weft_bench::scenarios::{Scenario, ScenarioKind};
use weft_compute::RayonBackend;
use weft_io::contract::SimulationInput;
use weft_io::format::{read_document, write_document, Format};
use weft_io::{run_input, validate_input};
use weft_mesh::TriangleMesh;
use weft_solver::{FreefallSolver, PbdSolver, SolverConfig, SolverStrategy};
use weft_telemetry::sinks::TracingSink;

use crate::SolverKind;

fn make_solver(
    kind: SolverKind,
    threads: Option<usize>,
) -> Result<Box<dyn SolverStrategy>, Box<dyn std::error::Error>> {
    let solver: Box<dyn SolverStrategy> = match (kind, threads) {
        (SolverKind::Pbd, Some(n)) => Box::new(PbdSolver::with_backend(RayonBackend::with_threads(n)?)),
        (SolverKind::Pbd, None) => Box::new(PbdSolver::new()),
        (SolverKind::Freefall, _) => Box::new(FreefallSolver::new()),
    };
    Ok(solver)
}

/// Run a simulation from an input file.
pub fn simulate(
    input_path: &str,
    output_path: Option<&str>,
    solver: SolverKind,
    threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Weft Simulation");
    println!("───────────────");
    println!("Input: {input_path}");
    println!();

    let input: SimulationInput = read_document(input_path)?;
    let output = run_input(&input, make_solver(solver, threads)?)?;
    let m = &output.metrics;

    println!("Solver:        {}", m.solver);
    println!("Particles:     {}", output.positions.len());
    println!("Frames:        {}", m.frame_count);
    println!("Steps:         {}", m.step_count);
    println!("Sim time:      {:.3}s", m.simulated_time);
    println!("Wall time:     {:.3}s", m.wall_time_seconds);
    println!("Final KE:      {:.6e}", m.final_kinetic_energy);
    println!("Max stretch:   {:.4}", m.max_stretch);
    println!();

    if let Some(path) = output_path {
        write_document(path, &output)?;
        println!("Results written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    solver: SolverKind,
    output_path: Option<&str>,
    trace_events: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Weft Benchmark Suite");
    println!("════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut runner = if trace_events {
        BenchmarkRunner::with_sink(Box::new(TracingSink::new(Level::INFO)))
    } else {
        BenchmarkRunner::new()
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind)?;

        println!(
            "Running: {} ({} verts, {} tris, {} frames)",
            kind.name(),
            scenario.mesh.vertex_count(),
            scenario.mesh.triangle_count(),
            scenario.frames,
        );

        let metrics = runner
            .run(&scenario, make_solver(solver, None)?)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Max stretch:   {:.4}", metrics.max_stretch);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a simulation input, mesh or solver config.
///
/// The file is tried as a full [`SimulationInput`] first; failing that, a
/// `.json` file is read as a mesh and a `.toml` file as a solver config.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Weft Validator");
    println!("──────────────");
    println!();

    let format = Format::from_path(Path::new(path))?;
    let content = std::fs::read_to_string(path)?;

    if let Ok(input) = format.parse::<SimulationInput>(&content) {
        println!("Validating simulation input: {path}");
        match validate_input(&input) {
            Ok(()) => println!("✅ Input is valid ({:.3}s).", input.duration),
            Err(e) => return Err(format!("❌ Input validation failed: {e}").into()),
        }
        return Ok(());
    }

    match format {
        Format::Json => {
            println!("Validating mesh: {path}");
            let mesh: TriangleMesh = format.parse(&content)?;
            match mesh.validate() {
                Ok(()) => println!(
                    "✅ Mesh is valid ({} verts, {} tris).",
                    mesh.vertex_count(),
                    mesh.triangle_count()
                ),
                Err(e) => return Err(format!("❌ Mesh validation failed: {e}").into()),
            }
        }
        Format::Toml => {
            println!("Validating config: {path}");
            let config: SolverConfig = format.parse(&content)?;
            match config.validate() {
                Ok(()) => println!("✅ Config is valid."),
                Err(e) => return Err(format!("❌ Config validation failed: {e}").into()),
            }
        }
    }

    Ok(())
}
