//! Dihedral bending constraints across interior edges.
//!
//! ## Geometry
//!
//! For an interior edge (p2, p3) with wing vertices (p0, p1):
//! ```text
//!        p0
//!       / \
//!      /   \
//!    p2 ─── p3
//!      \   /
//!       \ /
//!        p1
//! ```
//! `n1 = (p2 - p0) × (p3 - p0)` and `n2 = (p3 - p1) × (p2 - p1)`. For a
//! consistently wound mesh both are the outward face normals, so a flat
//! hinge has angle 0 and a fully folded one has angle π.
//!
//! Projection follows the isometric bending constraint of Bender and
//! Müller: the gradients of the angle with respect to the four particles
//! are scaled by a common multiplier so that the hinge moves toward its
//! rest angle without any net translation.

use glam::Vec3;
use weft_mesh::{InteriorEdge, Topology};
use weft_types::constants::EPSILON;

use super::branch_stiffness;
use crate::config::SolverConfig;

/// Keeps the dihedral angle of a wing edge at its rest value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendingConstraint {
    /// Wing vertex of the lower-index triangle.
    pub p0: u32,
    /// Wing vertex of the higher-index triangle.
    pub p1: u32,
    /// Shared edge, ordered as the lower-index triangle traverses it.
    pub p2: u32,
    pub p3: u32,
    /// Rest dihedral angle in `[0, π]`.
    pub rest_angle: f32,
    pub compression_stiffness: f32,
    pub stretch_stiffness: f32,
}

/// Dihedral angle of the hinge `[p0, p1, p2, p3]`.
///
/// Degenerate wings (zero area) report 0.
pub fn dihedral_angle(p: [Vec3; 4]) -> f32 {
    let [p0, p1, p2, p3] = p;
    let n1 = (p2 - p0).cross(p3 - p0).normalize_or_zero();
    let n2 = (p3 - p1).cross(p2 - p1).normalize_or_zero();
    if n1 == Vec3::ZERO || n2 == Vec3::ZERO {
        return 0.0;
    }
    angle_between(n1, n2)
}

/// Angle between unit normals, `acos(n1 · n2)` without its loss of
/// precision near 0 and π.
#[inline]
fn angle_between(n1: Vec3, n2: Vec3) -> f32 {
    n1.cross(n2).length().atan2(n1.dot(n2))
}

impl BendingConstraint {
    /// Builds the constraint for one interior edge from rest-pose positions.
    pub fn new(edge: &InteriorEdge, rest_positions: &[Vec3], config: &SolverConfig) -> Self {
        let [p0, p1, p2, p3] = edge.stencil();
        let rest_angle = dihedral_angle([p0, p1, p2, p3].map(|i| rest_positions[i as usize]));
        Self {
            p0,
            p1,
            p2,
            p3,
            rest_angle,
            compression_stiffness: config.bending_compression_stiffness,
            stretch_stiffness: config.bending_stretch_stiffness,
        }
    }

    /// One constraint per interior edge, in edge discovery order.
    pub fn build_all(
        topology: &Topology,
        rest_positions: &[Vec3],
        config: &SolverConfig,
    ) -> Vec<Self> {
        topology
            .interior_edges
            .iter()
            .map(|edge| Self::new(edge, rest_positions, config))
            .collect()
    }

    /// The four particle indices `[p0, p1, p2, p3]`.
    #[inline]
    pub fn stencil(&self) -> [u32; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Stiffness for the current angle.
    #[inline]
    pub fn stiffness_for(&self, angle: f32) -> f32 {
        branch_stiffness(
            angle - self.rest_angle,
            self.compression_stiffness,
            self.stretch_stiffness,
        )
    }

    /// Corrections for the stencil positions `p` with inverse masses `w`,
    /// in stencil order.
    ///
    /// `None` for a collapsed shared edge, a zero-area wing, or when the
    /// free particles of the stencil have no leverage on the angle (all
    /// pinned, or only a shared vertex free while the hinge is flat).
    pub fn project(&self, p: [Vec3; 4], w: [f32; 4]) -> Option<[Vec3; 4]> {
        let [p0, p1, p2, p3] = p;

        let e = p3 - p2;
        let e_len = e.length();
        if e_len < EPSILON {
            return None;
        }
        let inv_e = 1.0 / e_len;

        let c1 = (p2 - p0).cross(p3 - p0);
        let c2 = (p3 - p1).cross(p2 - p1);
        let a1 = c1.length_squared();
        let a2 = c2.length_squared();
        if a1 < EPSILON * EPSILON || a2 < EPSILON * EPSILON {
            return None;
        }
        let n1 = c1 / a1;
        let n2 = c2 / a2;

        let d = [
            n1 * e_len,
            n2 * e_len,
            n1 * ((p0 - p3).dot(e) * inv_e) + n2 * ((p1 - p3).dot(e) * inv_e),
            n1 * ((p2 - p0).dot(e) * inv_e) + n2 * ((p2 - p1).dot(e) * inv_e),
        ];

        let n1_hat = n1.normalize();
        let n2_hat = n2.normalize();
        let angle = angle_between(n1_hat, n2_hat);

        let denom: f32 = w.iter().zip(&d).map(|(wi, di)| wi * di.length_squared()).sum();
        if denom < EPSILON {
            return None;
        }

        let mut lambda = (angle - self.rest_angle) * self.stiffness_for(angle) / denom;
        if n1_hat.cross(n2_hat).dot(e) > 0.0 {
            lambda = -lambda;
        }

        Some([0, 1, 2, 3].map(|i| d[i] * (-w[i] * lambda)))
    }
}
