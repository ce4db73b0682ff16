//! Simulation event types.
//!
//! Structured events emitted by the simulation at various points in each
//! fixed step and frame. Events are lightweight value types that carry
//! just enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with the index of the fixed step they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Fixed step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Fixed step started.
    StepBegin {
        /// Simulated time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Fixed step completed.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
        /// Relaxation passes run.
        iterations: u32,
    },

    /// Relaxation summary for the step.
    Relaxation {
        /// Distance plus bending constraints projected per pass.
        constraints: usize,
        /// Largest correction of the last pass (meters).
        max_correction: f32,
    },

    /// A frame of wall time was banked and its due steps run.
    FrameAdvanced {
        /// Elapsed wall time handed to the frame (seconds).
        elapsed: f64,
        /// Fixed steps run.
        steps: u32,
        /// Banked time left for the next frame (seconds).
        leftover: f64,
    },

    /// Energy snapshot at current state.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Gravitational potential energy relative to the rest pose.
        potential: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
