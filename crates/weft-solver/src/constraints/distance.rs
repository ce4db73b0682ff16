//! Distance constraints: one per unique mesh edge.

use glam::Vec3;
use weft_mesh::{Edge, Topology};
use weft_types::constants::EPSILON;

use super::branch_stiffness;
use crate::config::SolverConfig;

/// Keeps the two endpoints of an edge at their rest distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub edge: Edge,
    /// Rest-pose distance between the endpoints, never negative.
    pub rest_length: f32,
    pub compression_stiffness: f32,
    pub stretch_stiffness: f32,
}

impl DistanceConstraint {
    /// Builds the constraint for `edge` from rest-pose positions.
    pub fn new(edge: Edge, rest_positions: &[Vec3], config: &SolverConfig) -> Self {
        let rest_length = rest_positions[edge.b as usize].distance(rest_positions[edge.a as usize]);
        Self {
            edge,
            rest_length,
            compression_stiffness: config.distance_compression_stiffness,
            stretch_stiffness: config.distance_stretch_stiffness,
        }
    }

    /// One constraint per topology edge, in edge discovery order.
    pub fn build_all(
        topology: &Topology,
        rest_positions: &[Vec3],
        config: &SolverConfig,
    ) -> Vec<Self> {
        topology
            .edges
            .iter()
            .map(|&edge| Self::new(edge, rest_positions, config))
            .collect()
    }

    /// Stiffness for the current edge length.
    #[inline]
    pub fn stiffness_for(&self, length: f32) -> f32 {
        branch_stiffness(
            length - self.rest_length,
            self.compression_stiffness,
            self.stretch_stiffness,
        )
    }

    /// Corrections `[delta_a, delta_b]` for endpoint positions `pa`, `pb`
    /// with inverse masses `wa`, `wb`.
    ///
    /// `None` when the edge has collapsed to zero length or both
    /// endpoints are pinned.
    pub fn project(&self, pa: Vec3, pb: Vec3, wa: f32, wb: f32) -> Option<[Vec3; 2]> {
        let w = wa + wb;
        if w <= 0.0 {
            return None;
        }

        let d = pb - pa;
        let length = d.length();
        if length < EPSILON {
            return None;
        }

        let c = (length - self.rest_length) / w * self.stiffness_for(length);
        let dir = d / length;
        Some([dir * (c * wa), dir * (-c * wb)])
    }
}
