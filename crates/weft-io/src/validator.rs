//! Input validation.
//!
//! Validates simulation inputs before the solver receives them,
//! catching data-level errors early with clear diagnostics.

use weft_types::{WeftError, WeftResult};

use crate::contract::{MeshSource, SimulationInput};

/// Validates a complete simulation input.
///
/// Checks:
/// - Mesh integrity (grid parameters, or imported indices and positions)
/// - Solver configuration ranges
/// - Pinned indices are within the particle count
/// - Duration and frame time are positive
pub fn validate_input(input: &SimulationInput) -> WeftResult<()> {
    let particle_count = match &input.source {
        MeshSource::Grid(params) => {
            params.build()?;
            params.particle_count()
        }
        MeshSource::Imported(mesh) => {
            mesh.validate()
                .map_err(|e| WeftError::InvalidMesh(format!("Imported mesh: {e}")))?;
            mesh.vertex_count()
        }
    };

    input.config.validate()?;

    if let Some(&bad) = input.config.pinned.iter().find(|&&p| p as usize >= particle_count) {
        return Err(WeftError::InvalidConfig(format!(
            "Pinned index {bad} is out of range (particle count: {particle_count})"
        )));
    }

    validate_timing(input)
}

fn validate_timing(input: &SimulationInput) -> WeftResult<()> {
    if !(input.duration.is_finite() && input.duration > 0.0) {
        return Err(WeftError::InvalidConfig(format!(
            "Duration must be positive, got {}",
            input.duration
        )));
    }
    if !(input.frame_time.is_finite() && input.frame_time > 0.0) {
        return Err(WeftError::InvalidConfig(format!(
            "Frame time must be positive, got {}",
            input.frame_time
        )));
    }
    Ok(())
}
