//! Mesh topology queries.
//!
//! Builds the rest-pose connectivity the solver needs from the triangle
//! index buffer: the deduplicated edge set (one distance constraint per
//! edge) and the edge→triangle adjacency that separates boundary edges
//! from interior ("wing") edges (one bending constraint per wing edge).
//!
//! Edges are identified by a canonical key, the `(min, max)` vertex pair
//! packed into a `u64`. All lookups go through a key-sorted arena that is
//! sized from the triangle count and built in a single sort, so no
//! growable hash structures are involved.

use tracing::{debug, warn};
use weft_types::TriangleId;

use crate::mesh::TriangleMesh;

/// Packs an undirected edge into its canonical key.
///
/// `edge_key(a, b) == edge_key(b, a)` for all `a`, `b`.
#[inline]
pub fn edge_key(a: u32, b: u32) -> u64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    ((lo as u64) << 32) | hi as u64
}

/// An undirected edge, canonicalized so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Lower vertex index.
    pub a: u32,
    /// Higher vertex index.
    pub b: u32,
}

impl Edge {
    /// Creates the canonical edge between `a` and `b`.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    #[inline]
    fn from_key(key: u64) -> Self {
        Self {
            a: (key >> 32) as u32,
            b: key as u32,
        }
    }

    /// Returns the canonical key of this edge.
    #[inline]
    pub fn key(self) -> u64 {
        edge_key(self.a, self.b)
    }

    /// Returns true if `v` is one of the endpoints.
    #[inline]
    pub fn contains(self, v: u32) -> bool {
        self.a == v || self.b == v
    }
}

/// Key-sorted lookup from canonical edge key to edge position.
#[derive(Debug, Clone, Default)]
struct EdgeIndex {
    entries: Vec<(u64, u32)>,
}

impl EdgeIndex {
    /// Deduplicates the half-edges of `triangles`.
    ///
    /// Returns the unique edges in order of first discovery together with
    /// the index that maps each key to its position in that list.
    fn build<I>(triangles: I) -> (Vec<Edge>, Self)
    where
        I: IntoIterator<Item = [u32; 3]>,
    {
        let triangles = triangles.into_iter();
        let mut half_edges: Vec<(u64, u32)> =
            Vec::with_capacity(3 * triangles.size_hint().0);

        let mut discovery = 0u32;
        for tri in triangles {
            for k in 0..3 {
                let (v0, v1) = (tri[k], tri[(k + 1) % 3]);
                if v0 != v1 {
                    half_edges.push((edge_key(v0, v1), discovery));
                }
                discovery += 1;
            }
        }

        // (key, discovery) pairs are unique, so this sort is total.
        // After dedup each key keeps its earliest discovery.
        half_edges.sort_unstable();
        half_edges.dedup_by_key(|(key, _)| *key);

        let mut order: Vec<usize> = (0..half_edges.len()).collect();
        order.sort_unstable_by_key(|&i| half_edges[i].1);

        let mut edges = Vec::with_capacity(order.len());
        let mut entries = half_edges;
        for (position, &slot) in order.iter().enumerate() {
            edges.push(Edge::from_key(entries[slot].0));
            entries[slot].1 = position as u32;
        }

        (edges, Self { entries })
    }

    fn lookup(&self, key: u64) -> Option<usize> {
        self.entries
            .binary_search_by_key(&key, |&(k, _)| k)
            .ok()
            .map(|slot| self.entries[slot].1 as usize)
    }
}

/// Extracts the unique undirected edges of a triangle list.
///
/// Each triangle contributes `(v0, v1)`, `(v1, v2)`, `(v2, v0)`. An edge is
/// kept the first time it is seen in either orientation, so the result has
/// exactly one entry per undirected edge, in order of first discovery.
/// Self-loops (repeated vertex within a triangle) are not edges.
pub fn extract_edges<I>(triangles: I) -> Vec<Edge>
where
    I: IntoIterator<Item = [u32; 3]>,
{
    EdgeIndex::build(triangles).0
}

/// The triangles incident to one edge.
///
/// Holds at most two triangles; `count` keeps the true incidence so that
/// non-manifold edges are never mistaken for interior ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeAdjacency {
    slots: [u32; 2],
    count: u32,
}

impl EdgeAdjacency {
    /// Records triangle `t` as incident, ignoring repeats of a listed triangle.
    fn attach(&mut self, t: u32) {
        if self.triangles().contains(&t) {
            return;
        }
        if self.count < 2 {
            self.slots[self.count as usize] = t;
        }
        self.count += 1;
    }

    /// The (up to two) incident triangles, in attachment order.
    pub fn triangles(&self) -> &[u32] {
        &self.slots[..self.count.min(2) as usize]
    }

    /// Total number of distinct incident triangles.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Edge lies on the boundary of the sheet.
    pub fn is_boundary(&self) -> bool {
        self.count == 1
    }

    /// Edge is shared by exactly two triangles.
    pub fn is_interior(&self) -> bool {
        self.count == 2
    }
}

/// An interior edge with its two adjacent triangles.
///
/// Used for bending constraint generation: the dihedral angle between
/// `tri_a` and `tri_b` across this edge defines the bending stencil.
/// `tri_a` is always the lower triangle index, and `(v0, v1)` follows
/// the winding of `tri_a`, i.e. `tri_a` contains the directed edge
/// `v0 → v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorEdge {
    /// First vertex of the shared edge.
    pub v0: u32,
    /// Second vertex of the shared edge.
    pub v1: u32,
    /// The "wing" vertex of triangle A (not on the edge).
    pub wing_a: u32,
    /// The "wing" vertex of triangle B (not on the edge).
    pub wing_b: u32,
    /// Adjacent triangle A.
    pub tri_a: TriangleId,
    /// Adjacent triangle B.
    pub tri_b: TriangleId,
}

impl InteriorEdge {
    /// The four-vertex bending stencil `[p0, p1, p2, p3]`:
    /// both wings followed by the shared edge.
    #[inline]
    pub fn stencil(&self) -> [u32; 4] {
        [self.wing_a, self.wing_b, self.v0, self.v1]
    }
}

/// Precomputed topology information for a triangle mesh.
///
/// Built once from the rest pose.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Unique edges in order of first discovery.
    pub edges: Vec<Edge>,

    /// Incident triangles of each edge, parallel to `edges`.
    pub adjacency: Vec<EdgeAdjacency>,

    /// Edges shared by exactly two triangles.
    pub interior_edges: Vec<InteriorEdge>,

    index: EdgeIndex,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let (edges, index) = EdgeIndex::build(mesh.triangles());

        let mut adjacency = vec![EdgeAdjacency::default(); edges.len()];
        for (t, [a, b, c]) in mesh.triangles().enumerate() {
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                if let Some(e) = index.lookup(edge_key(v0, v1)) {
                    adjacency[e].attach(t as u32);
                }
            }
        }

        let mut interior_edges = Vec::new();
        let mut non_manifold = 0usize;
        for (edge, adj) in edges.iter().zip(&adjacency) {
            if adj.count() > 2 {
                non_manifold += 1;
                continue;
            }
            if !adj.is_interior() {
                continue;
            }

            let (tri_a, tri_b) = {
                let [t0, t1] = [adj.triangles()[0], adj.triangles()[1]];
                (t0.min(t1), t0.max(t1))
            };

            let (v0, v1) = winding_order(mesh.triangle(tri_a as usize), *edge);
            interior_edges.push(InteriorEdge {
                v0,
                v1,
                wing_a: find_wing_vertex(mesh.triangle(tri_a as usize), v0, v1),
                wing_b: find_wing_vertex(mesh.triangle(tri_b as usize), v0, v1),
                tri_a: TriangleId(tri_a),
                tri_b: TriangleId(tri_b),
            });
        }

        if non_manifold > 0 {
            warn!(
                non_manifold,
                "edges shared by more than two triangles get no bending constraint"
            );
        }

        debug!(
            triangles = mesh.triangle_count(),
            edges = edges.len(),
            interior = interior_edges.len(),
            "topology built"
        );

        Self {
            edges,
            adjacency,
            interior_edges,
            index,
        }
    }

    /// Position of the edge `{a, b}` in [`Topology::edges`], if it exists.
    pub fn edge_index(&self, a: u32, b: u32) -> Option<usize> {
        self.index.lookup(edge_key(a, b))
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.adjacency.iter().filter(|adj| adj.is_boundary()).count()
    }

    /// Returns the number of edges shared by more than two triangles.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.adjacency.iter().filter(|adj| adj.count() > 2).count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}

/// Orders the endpoints of `edge` the way `tri` traverses them.
fn winding_order(tri: [u32; 3], edge: Edge) -> (u32, u32) {
    let [a, b, c] = tri;
    for (v0, v1) in [(a, b), (b, c), (c, a)] {
        if Edge::new(v0, v1) == edge {
            return (v0, v1);
        }
    }
    (edge.a, edge.b)
}

/// Find the vertex in `tri` that is not v0 or v1 (the "wing" vertex).
fn find_wing_vertex(tri: [u32; 3], v0: u32, v1: u32) -> u32 {
    let [a, b, c] = tri;
    if a != v0 && a != v1 {
        a
    } else if b != v0 && b != v1 {
        b
    } else {
        c
    }
}
