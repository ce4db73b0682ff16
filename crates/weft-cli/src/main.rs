//! Weft CLI — cloth simulation, benchmarking, and validation.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about = "Weft — position-based cloth simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which solver drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolverKind {
    /// Position-based dynamics with distance and bending constraints.
    Pbd,
    /// Gravity only; no constraints.
    Freefall,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from an input file (TOML or JSON).
    Simulate {
        /// Path to the simulation input.
        input: String,

        /// Where to write the output (TOML or JSON); printed as a summary if omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Solver to use.
        #[arg(long, value_enum, default_value = "pbd")]
        solver: SolverKind,

        /// Worker threads for the PBD solver (defaults to all cores).
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_sheet, corner_pinned, free_drop, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Solver to use.
        #[arg(long, value_enum, default_value = "pbd")]
        solver: SolverKind,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,

        /// Log every step event through tracing.
        #[arg(long)]
        trace_events: bool,
    },

    /// Validate a simulation input, mesh (JSON) or solver config (TOML).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            input,
            output,
            solver,
            threads,
        } => commands::simulate(&input, output.as_deref(), solver, threads),
        Commands::Benchmark {
            scenario,
            solver,
            output,
            trace_events,
        } => commands::benchmark(&scenario, solver, output.as_deref(), trace_events),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
