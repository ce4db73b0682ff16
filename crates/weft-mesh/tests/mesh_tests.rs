//! Integration tests for weft-mesh.

use glam::Vec3;
use weft_mesh::generators::grid;
use weft_mesh::topology::{edge_key, extract_edges, Edge};
use weft_mesh::{Topology, TriangleMesh};

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        indices: vec![0, 1, 2],
    }
}

/// Two triangles sharing edge 1–2, wound consistently, folded 90° about it.
fn make_hinge() -> TriangleMesh {
    TriangleMesh {
        positions: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.5, 1.0, 0.5),
        ],
        indices: vec![0, 1, 2, 2, 1, 3],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn triangle_access() {
    let mesh = make_hinge();
    assert_eq!(mesh.triangle(1), [2, 1, 3]);
    let all: Vec<[u32; 3]> = mesh.triangles().collect();
    assert_eq!(all, vec![[0, 1, 2], [2, 1, 3]]);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn validate_catches_partial_triangle() {
    let mut mesh = make_single_triangle();
    mesh.indices.push(0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan_position() {
    let mut mesh = make_single_triangle();
    mesh.positions[1] = Vec3::new(f32::NAN, 0.0, 0.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.position(1), Vec3::X);
    assert_eq!(mesh.interleaved_positions(), positions);
}

#[test]
fn from_interleaved_rejects_ragged_positions() {
    assert!(TriangleMesh::from_interleaved(&[0.0, 1.0], &[]).is_err());
}

#[test]
fn from_parts_keeps_data_unchanged() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE];
    let mesh = TriangleMesh::from_parts(positions.clone(), &[[0, 1, 2], [2, 1, 3]]).unwrap();
    assert_eq!(mesh.positions, positions);
    assert_eq!(mesh.indices, vec![0, 1, 2, 2, 1, 3]);
}

#[test]
fn from_parts_rejects_bad_index() {
    assert!(TriangleMesh::from_parts(vec![Vec3::ZERO; 3], &[[0, 1, 3]]).is_err());
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = make_hinge();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn grid_counts() {
    for (x, y) in [(1, 1), (2, 3), (8, 8), (20, 5)] {
        let mesh = grid(x, y, 5.0, 5.0).unwrap();
        assert_eq!(mesh.vertex_count(), (x + 1) * (y + 1));
        assert_eq!(mesh.triangle_count(), 2 * x * y);
        assert!(mesh.validate().is_ok());
    }
}

#[test]
fn grid_positions() {
    let mesh = grid(3, 1, 4.0, 2.0).unwrap();
    // Particle (i, j) at index j * 4 + i
    let p = mesh.position(1 * 4 + 2);
    assert!((p.x - (2.0 * 4.0 / 4.0 - 2.0)).abs() < 1e-6);
    assert_eq!(p.y, 0.0);
    assert!((p.z - (1.0 * 2.0 / 2.0 - 1.0)).abs() < 1e-6);
    assert_eq!(mesh.position(0), Vec3::new(-2.0, 0.0, -1.0));
}

#[test]
fn grid_alternates_diagonals() {
    let mesh = grid(2, 1, 2.0, 2.0).unwrap();
    // Cell (0, 0) is even: split along i0–i3
    assert_eq!(mesh.triangle(0), [0, 3, 4]);
    assert_eq!(mesh.triangle(1), [0, 4, 1]);
    // Cell (0, 1) is odd: split along i1–i2
    assert_eq!(mesh.triangle(2), [1, 4, 2]);
    assert_eq!(mesh.triangle(3), [2, 4, 5]);
}

#[test]
fn grid_rejects_empty_or_degenerate() {
    assert!(grid(0, 4, 1.0, 1.0).is_err());
    assert!(grid(4, 0, 1.0, 1.0).is_err());
    assert!(grid(4, 4, 0.0, 1.0).is_err());
    assert!(grid(4, 4, 1.0, f32::NAN).is_err());
}

// ─── Edge Extraction Tests ────────────────────────────────────

#[test]
fn edge_key_is_orientation_free() {
    assert_eq!(edge_key(3, 7), edge_key(7, 3));
    assert_ne!(edge_key(3, 7), edge_key(3, 8));
    assert_eq!(Edge::new(7, 3), Edge { a: 3, b: 7 });
    assert_eq!(Edge::new(7, 3).key(), edge_key(3, 7));
}

#[test]
fn shared_edge_with_opposite_winding_is_kept_once() {
    let edges = extract_edges([[0, 1, 2], [2, 1, 3]]);
    assert_eq!(edges.len(), 5);
    let shared = edges.iter().filter(|e| **e == Edge::new(1, 2)).count();
    assert_eq!(shared, 1);
}

#[test]
fn edges_are_in_discovery_order() {
    let edges = extract_edges([[0, 1, 2], [2, 1, 3]]);
    assert_eq!(
        edges,
        vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 0),
            Edge::new(1, 3),
            Edge::new(3, 2),
        ]
    );
}

#[test]
fn edges_of_empty_list() {
    assert!(extract_edges(std::iter::empty()).is_empty());
}

#[test]
fn grid_edge_count() {
    // Horizontal + vertical + one diagonal per cell
    let (x, y) = (6, 4);
    let mesh = grid(x, y, 1.0, 1.0).unwrap();
    let edges = extract_edges(mesh.triangles());
    assert_eq!(edges.len(), x * (y + 1) + y * (x + 1) + x * y);
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_cell() {
    let mesh = grid(1, 1, 2.0, 2.0).unwrap();
    let topo = Topology::build(&mesh);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(topo.edges.len(), 5);
    assert_eq!(topo.boundary_edge_count(), 4);
    assert_eq!(topo.interior_edges.len(), 1);
    assert!(!topo.is_closed());

    // The diagonal of the even cell is 0–3
    let ie = topo.interior_edges[0];
    assert_eq!(Edge::new(ie.v0, ie.v1), Edge::new(0, 3));
}

#[test]
fn interior_edge_follows_lower_triangle_winding() {
    let topo = Topology::build(&make_hinge());
    assert_eq!(topo.interior_edges.len(), 1);
    let ie = topo.interior_edges[0];
    assert_eq!(ie.tri_a.index(), 0);
    assert_eq!(ie.tri_b.index(), 1);
    // Triangle 0 is [0, 1, 2]: it walks 1 → 2
    assert_eq!((ie.v0, ie.v1), (1, 2));
    assert_eq!((ie.wing_a, ie.wing_b), (0, 3));
    assert_eq!(ie.stencil(), [0, 3, 1, 2]);
}

#[test]
fn interior_edges_have_disjoint_wings() {
    let mesh = grid(5, 4, 1.0, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    for ie in &topo.interior_edges {
        let edge = Edge::new(ie.v0, ie.v1);
        assert!(!edge.contains(ie.wing_a));
        assert!(!edge.contains(ie.wing_b));
        assert_ne!(ie.wing_a, ie.wing_b);
    }
}

#[test]
fn interior_plus_boundary_covers_grid() {
    let (x, y) = (5, 3);
    let mesh = grid(x, y, 1.0, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    assert_eq!(topo.boundary_edge_count(), 2 * (x + y));
    assert_eq!(
        topo.interior_edges.len() + topo.boundary_edge_count(),
        topo.edges.len()
    );
    assert_eq!(topo.non_manifold_edge_count(), 0);
}

#[test]
fn single_triangle_has_no_interior_edges() {
    let topo = Topology::build(&make_single_triangle());
    assert_eq!(topo.edges.len(), 3);
    assert!(topo.interior_edges.is_empty());
    assert_eq!(topo.boundary_edge_count(), 3);
}

#[test]
fn non_manifold_edge_is_not_interior() {
    // Three triangles hinged on edge 0–1
    let mesh = TriangleMesh {
        positions: vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(0.5, -1.0, 0.0),
        ],
        indices: vec![0, 1, 2, 1, 0, 3, 0, 1, 4],
    };
    let topo = Topology::build(&mesh);
    assert_eq!(topo.non_manifold_edge_count(), 1);
    assert!(topo.interior_edges.is_empty());
    let e = topo.edge_index(1, 0).unwrap();
    assert_eq!(topo.adjacency[e].count(), 3);
    assert_eq!(topo.adjacency[e].triangles(), &[0, 1]);
}

#[test]
fn edge_index_lookup() {
    let mesh = grid(3, 3, 1.0, 1.0).unwrap();
    let topo = Topology::build(&mesh);
    for (i, edge) in topo.edges.iter().enumerate() {
        assert_eq!(topo.edge_index(edge.a, edge.b), Some(i));
        assert_eq!(topo.edge_index(edge.b, edge.a), Some(i));
    }
    assert_eq!(topo.edge_index(0, 15), None);
}
