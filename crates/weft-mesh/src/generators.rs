//! Procedural cloth generators.
//!
//! These generators produce deterministic, resolution-configurable sheets
//! with consistent winding order.

use glam::Vec3;
use weft_types::{WeftError, WeftResult};

use crate::mesh::TriangleMesh;

/// Generates a flat cloth sheet in the XZ plane at Y = 0.
///
/// Particle (i, j), with column `i` along X and row `j` along Z, has index
/// `j * (x_size + 1) + i` and lies at
/// `(i * width / (x_size + 1) - width / 2, 0, j * height / (y_size + 1) - height / 2)`.
///
/// Each cell is split into two triangles. The diagonal alternates with
/// the parity of `row + column` so the sheet has no preferred fold
/// direction.
///
/// # Arguments
/// - `x_size` — Number of cells along X (particle count = x_size + 1).
/// - `y_size` — Number of cells along Z (particle count = y_size + 1).
/// - `width` — Extent parameter along X in meters.
/// - `height` — Extent parameter along Z in meters.
///
/// # Example
/// ```
/// use weft_mesh::generators::grid;
/// let mesh = grid(2, 2, 1.0, 1.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 particles
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 cells × 2 tris each
/// ```
pub fn grid(x_size: usize, y_size: usize, width: f32, height: f32) -> WeftResult<TriangleMesh> {
    if x_size == 0 || y_size == 0 {
        return Err(WeftError::InvalidMesh(format!(
            "Grid needs at least one cell per axis, got {x_size}x{y_size}"
        )));
    }
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(WeftError::InvalidMesh(format!(
            "Grid extent must be positive and finite, got {width}x{height}"
        )));
    }

    let verts_x = x_size + 1;
    let verts_z = y_size + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_z, 2 * x_size * y_size);

    let dx = width / verts_x as f32;
    let dz = height / verts_z as f32;

    for j in 0..verts_z {
        for i in 0..verts_x {
            mesh.positions.push(Vec3::new(
                i as f32 * dx - width / 2.0,
                0.0,
                j as f32 * dz - height / 2.0,
            ));
        }
    }

    for row in 0..y_size {
        for col in 0..x_size {
            let i0 = (row * verts_x + col) as u32;
            let i1 = i0 + 1;
            let i2 = i0 + verts_x as u32;
            let i3 = i2 + 1;

            if (row + col) % 2 != 0 {
                // Diagonal i1–i2
                mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            } else {
                // Diagonal i0–i3
                mesh.indices.extend_from_slice(&[i0, i2, i3, i0, i3, i1]);
            }
        }
    }

    Ok(mesh)
}
