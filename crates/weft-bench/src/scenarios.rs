//! Benchmark scenarios — procedural mesh + pinning + config for each case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Hanging sheet** — Cloth pinned along its first row, hangs under gravity
//! 2. **Corner pinned** — Cloth held by the two corners of its first row
//! 3. **Free drop** — Nothing pinned; the sheet must fall without deforming

use serde::{Deserialize, Serialize};

use weft_mesh::generators::grid;
use weft_mesh::TriangleMesh;
use weft_solver::SolverConfig;
use weft_types::WeftResult;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cloth pinned along its first row, hanging under gravity.
    HangingSheet,
    /// Cloth pinned at the two corners of its first row.
    CornerPinned,
    /// Unpinned cloth in free fall.
    FreeDrop,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingSheet,
            ScenarioKind::CornerPinned,
            ScenarioKind::FreeDrop,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingSheet => "hanging_sheet",
            ScenarioKind::CornerPinned => "corner_pinned",
            ScenarioKind::FreeDrop => "free_drop",
        }
    }

    /// Looks a scenario up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Rest-pose cloth.
    pub mesh: TriangleMesh,
    /// Solver configuration, including the pinned particles.
    pub config: SolverConfig,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Wall time handed to each frame (seconds).
    pub frame_time: f32,
}

impl Scenario {
    /// Create the hanging sheet scenario.
    ///
    /// A 20×20-cell sheet pinned along its first row, hanging under
    /// gravity for 2 seconds at 60fps.
    pub fn hanging_sheet() -> WeftResult<Self> {
        let cols = 20;
        let mesh = grid(cols, 20, 1.0, 1.0)?;
        let config = SolverConfig::default().with_pinned(0..=cols as u32);

        Ok(Self {
            kind: ScenarioKind::HangingSheet,
            mesh,
            config,
            frames: 120,
            frame_time: 1.0 / 60.0,
        })
    }

    /// Create the corner-pinned scenario.
    ///
    /// A 20×20-cell sheet held only by the two corners of its first row.
    /// The free edge swings down between them, stressing the bending
    /// constraints along the sag.
    pub fn corner_pinned() -> WeftResult<Self> {
        let cols = 20;
        let mesh = grid(cols, 20, 1.0, 1.0)?;
        let config = SolverConfig::default().with_pinned([0, cols as u32]);

        Ok(Self {
            kind: ScenarioKind::CornerPinned,
            mesh,
            config,
            frames: 120,
            frame_time: 1.0 / 60.0,
        })
    }

    /// Create the free drop scenario.
    ///
    /// A 16×16-cell sheet with nothing pinned falls for 1 second. Every
    /// particle accelerates equally, so the constraints should stay at
    /// rest.
    pub fn free_drop() -> WeftResult<Self> {
        let mesh = grid(16, 16, 1.0, 1.0)?;

        Ok(Self {
            kind: ScenarioKind::FreeDrop,
            mesh,
            config: SolverConfig::default(),
            frames: 60,
            frame_time: 1.0 / 60.0,
        })
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> WeftResult<Self> {
        match kind {
            ScenarioKind::HangingSheet => Self::hanging_sheet(),
            ScenarioKind::CornerPinned => Self::corner_pinned(),
            ScenarioKind::FreeDrop => Self::free_drop(),
        }
    }

    /// Replaces the solver configuration, keeping this scenario's pinning.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        let pinned = std::mem::take(&mut self.config.pinned);
        self.config = SolverConfig { pinned, ..config };
        self
    }
}
