//! Core triangle mesh type.
//!
//! Positions are stored as one `Vec3` per particle: every consumer in the
//! solver reads whole particles, never single coordinate channels.
//! Triangles are stored flat, `[t0v0, t0v1, t0v2, t1v0, ...]`, which is the
//! layout hosts hand over for rendering.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_types::{WeftError, WeftResult};

/// A triangle mesh: the rest pose of a piece of cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Particle positions.
    pub positions: Vec<Vec3>,

    /// Triangle indices, three per triangle: [v0, v1, v2].
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices (particles).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Iterates over all triangles in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Index count is a multiple of 3
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    /// - All positions are finite
    pub fn validate(&self) -> WeftResult<()> {
        let n = self.positions.len();

        if self.indices.len() % 3 != 0 {
            return Err(WeftError::InvalidMesh(format!(
                "Index count ({}) is not divisible by 3",
                self.indices.len()
            )));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(WeftError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for (t, [a, b, c]) in self.triangles().enumerate() {
            if a == b || b == c || a == c {
                return Err(WeftError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(WeftError::InvalidMesh(format!(
                "Vertex {} has a non-finite position: {:?}",
                i, self.positions[i]
            )));
        }

        Ok(())
    }

    /// Imports an externally supplied mesh unchanged.
    ///
    /// The data is validated once here so that malformed input fails
    /// before any constraint is built.
    pub fn from_parts(positions: Vec<Vec3>, triangles: &[[u32; 3]]) -> WeftResult<Self> {
        let mesh = Self {
            positions,
            indices: triangles.iter().flatten().copied().collect(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Constructs a mesh from interleaved position data.
    ///
    /// Converts from the flat format `[x0, y0, z0, x1, y1, z1, ...]` that
    /// host vertex buffers usually expose.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> WeftResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(WeftError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let mesh = Self {
            positions: positions
                .chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect(),
            indices: indices.to_vec(),
        };

        mesh.validate()?;
        Ok(mesh)
    }

    /// Flattens positions back to `[x0, y0, z0, x1, ...]`.
    pub fn interleaved_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }
}
