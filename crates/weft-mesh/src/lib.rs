//! # weft-mesh
//!
//! Triangle mesh representation and rest-pose topology for cloth.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — particle positions plus a flat triangle index buffer.
//! - [`Topology`] — deduplicated edge set, edge→triangle adjacency and the
//!   interior ("wing") edges that carry bending constraints.
//! - [`generators::grid`] — the procedural cloth sheet.

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::TriangleMesh;
pub use topology::{Edge, EdgeAdjacency, InteriorEdge, Topology};
