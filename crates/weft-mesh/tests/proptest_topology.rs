//! Property-based tests for edge extraction and adjacency.
//!
//! Run with: cargo test -p weft-mesh -- proptest

use std::collections::HashSet;

use proptest::prelude::*;
use weft_mesh::topology::{extract_edges, Edge};

/// Arbitrary triangle lists over a small vertex pool, so that shared edges
/// in both orientations are common.
fn arb_triangles() -> impl Strategy<Value = Vec<[u32; 3]>> {
    prop::collection::vec(prop::array::uniform3(0u32..12), 0..40)
}

proptest! {
    #[test]
    fn proptest_no_edge_appears_twice(tris in arb_triangles()) {
        let edges = extract_edges(tris.iter().copied());
        let mut seen = HashSet::new();
        for e in &edges {
            prop_assert!(e.a < e.b);
            prop_assert!(seen.insert((e.a, e.b)), "duplicate edge {:?}", e);
        }
    }

    #[test]
    fn proptest_every_triangle_edge_is_present(tris in arb_triangles()) {
        let edges: HashSet<Edge> = extract_edges(tris.iter().copied()).into_iter().collect();
        for [a, b, c] in &tris {
            for (v0, v1) in [(*a, *b), (*b, *c), (*c, *a)] {
                if v0 != v1 {
                    prop_assert!(edges.contains(&Edge::new(v0, v1)));
                }
            }
        }
    }

    #[test]
    fn proptest_winding_does_not_change_edge_set(tris in arb_triangles()) {
        let forward: HashSet<Edge> = extract_edges(tris.iter().copied()).into_iter().collect();
        let flipped: HashSet<Edge> = extract_edges(tris.iter().map(|&[a, b, c]| [c, b, a]))
            .into_iter()
            .collect();
        prop_assert_eq!(forward, flipped);
    }
}
