//! Integration tests for weft-io.

use std::path::PathBuf;

use glam::Vec3;
use weft_compute::CpuFallback;
use weft_io::contract::{GridParams, MeshSource, SimulationInput, SimulationOutput};
use weft_io::format::{read_document, write_document, Format};
use weft_io::session::run_input;
use weft_io::validator::validate_input;
use weft_mesh::TriangleMesh;
use weft_solver::{FreefallSolver, PbdSolver, SolverConfig};
use weft_types::WeftError;

fn make_valid_input() -> SimulationInput {
    let params = GridParams {
        x_size: 4,
        y_size: 4,
        width: 1.0,
        height: 1.0,
    };
    let mut input = SimulationInput::new(MeshSource::Grid(params), 0.5);
    input.config = SolverConfig::default().with_pinned(params.first_row());
    input
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("weft-io-{}-{name}", std::process::id()))
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn grid_params_helpers() {
    let params = GridParams {
        x_size: 3,
        y_size: 2,
        width: 1.0,
        height: 1.0,
    };
    assert_eq!(params.particle_count(), 12);
    assert_eq!(params.first_row().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(params.first_row_corners(), [0, 3]);
    assert_eq!(params.build().unwrap().vertex_count(), 12);
}

#[test]
fn simulation_input_json_roundtrip() {
    let input = make_valid_input();
    let json = serde_json::to_string(&input).unwrap();
    let recovered: SimulationInput = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, input);
}

#[test]
fn simulation_input_toml_roundtrip() {
    let input = make_valid_input();
    let text = Format::Toml.render(&input).unwrap();
    let recovered: SimulationInput = Format::Toml.parse(&text).unwrap();
    assert_eq!(recovered, input);
}

#[test]
fn minimal_toml_input_uses_defaults() {
    let text = r#"
duration = 1.0

[source.grid]
x_size = 2
y_size = 2
width = 1.0
height = 1.0
"#;
    let input: SimulationInput = Format::Toml.parse(text).unwrap();
    assert_eq!(input.config, SolverConfig::default());
    assert!((input.frame_time - 1.0 / 60.0).abs() < 1e-7);
    assert!(validate_input(&input).is_ok());
}

#[test]
fn imported_mesh_json() {
    let json = r#"{
        "duration": 0.1,
        "source": { "imported": {
            "positions": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            "indices": [0, 2, 1]
        } },
        "config": { "pinned": [0] }
    }"#;
    let input: SimulationInput = Format::Json.parse(json).unwrap();
    let mesh = input.source.build_mesh().unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(input.config.pinned, vec![0]);
    assert!(validate_input(&input).is_ok());
}

#[test]
fn output_to_mesh() {
    let output = SimulationOutput {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Z],
        triangles: vec![[0, 2, 1]],
        metrics: Default::default(),
    };
    let mesh = output.to_mesh();
    assert_eq!(mesh.indices, vec![0, 2, 1]);
    assert!(mesh.validate().is_ok());
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_input_passes() {
    assert!(validate_input(&make_valid_input()).is_ok());
}

#[test]
fn pinned_out_of_range_rejected() {
    let mut input = make_valid_input();
    input.config.pinned.push(25);
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidConfig(_))));
}

#[test]
fn bad_grid_rejected() {
    let mut input = make_valid_input();
    input.source = MeshSource::Grid(GridParams {
        x_size: 0,
        ..GridParams::default()
    });
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidMesh(_))));
}

#[test]
fn broken_import_rejected() {
    let mut input = make_valid_input();
    input.config.pinned.clear();
    input.source = MeshSource::Imported(TriangleMesh {
        positions: vec![Vec3::ZERO, Vec3::X],
        indices: vec![0, 1, 2],
    });
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidMesh(_))));
}

#[test]
fn bad_config_rejected() {
    let mut input = make_valid_input();
    input.config.fixed_timestep = -0.01;
    assert!(validate_input(&input).is_err());

    let mut input = make_valid_input();
    input.config.iteration_count = 0;
    assert!(validate_input(&input).is_err());
}

#[test]
fn bad_timing_rejected() {
    let mut input = make_valid_input();
    input.duration = 0.0;
    assert!(validate_input(&input).is_err());

    let mut input = make_valid_input();
    input.frame_time = f32::NAN;
    assert!(validate_input(&input).is_err());
}

// ─── Format Tests ─────────────────────────────────────────────

#[test]
fn format_from_extension() {
    assert_eq!(Format::from_path("a/b.json".as_ref()).unwrap(), Format::Json);
    assert_eq!(Format::from_path("b.toml".as_ref()).unwrap(), Format::Toml);
    assert!(matches!(
        Format::from_path("mesh.obj".as_ref()),
        Err(WeftError::Serialization(_))
    ));
}

#[test]
fn parse_errors_are_serialization_errors() {
    let err = Format::Json.parse::<SimulationInput>("{ not json").unwrap_err();
    assert!(matches!(err, WeftError::Serialization(_)));
    let err = Format::Toml.parse::<SimulationInput>("duration = ").unwrap_err();
    assert!(matches!(err, WeftError::Serialization(_)));
}

#[test]
fn documents_roundtrip_through_files() {
    let input = make_valid_input();
    for name in ["input.json", "input.toml"] {
        let path = temp_path(name);
        write_document(&path, &input).unwrap();
        let back: SimulationInput = read_document(&path).unwrap();
        assert_eq!(back, input);
        std::fs::remove_file(&path).unwrap();
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = read_document::<SimulationInput>(temp_path("missing.json")).unwrap_err();
    assert!(matches!(err, WeftError::Io(_)));
}

// ─── Session Tests ────────────────────────────────────────────

#[test]
fn run_hanging_sheet() {
    let input = make_valid_input();
    let output = run_input(&input, Box::new(PbdSolver::with_backend(CpuFallback))).unwrap();

    assert_eq!(output.positions.len(), 25);
    assert_eq!(output.triangles.len(), 32);
    // 0.5 s at 10 ms steps; float banking may leave the last step unconsumed
    assert!((49..=50).contains(&output.metrics.step_count));
    assert_eq!(output.metrics.frame_count, 30);
    assert_eq!(output.metrics.solver, "pbd");
    assert!((output.metrics.avg_iterations - 10.0).abs() < 1e-6);
    assert!(output.metrics.max_stretch < 1.5);

    // Pinned row stays put
    let rest = input.source.build_mesh().unwrap();
    for i in 0..5 {
        assert_eq!(output.positions[i], rest.positions[i]);
    }
}

#[test]
fn run_freefall_reports_zero_iterations() {
    let mut input = make_valid_input();
    input.config.pinned.clear();
    input.duration = 0.1;
    let output = run_input(&input, Box::new(FreefallSolver::new())).unwrap();
    assert_eq!(output.metrics.avg_iterations, 0.0);
    assert!(output.metrics.final_kinetic_energy > 0.0);
    assert!(output.positions.iter().all(|p| p.y < 0.0));
}

#[test]
fn run_rejects_invalid_input() {
    let mut input = make_valid_input();
    input.duration = -1.0;
    assert!(run_input(&input, Box::new(FreefallSolver::new())).is_err());
}
