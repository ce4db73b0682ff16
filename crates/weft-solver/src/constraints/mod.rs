//! Constraints built once from the rest pose.
//!
//! Each constraint is plain data plus a `project` method that turns the
//! current projected positions and inverse masses of its particles into
//! per-particle corrections. Projection never writes positions itself;
//! the solver accumulates the corrections and averages them.

pub mod bending;
pub mod distance;

pub use bending::BendingConstraint;
pub use distance::DistanceConstraint;

/// Picks the stiffness for the sign of a constraint's violation.
///
/// `violation > 0` means the constraint is stretched past rest.
#[inline]
pub(crate) fn branch_stiffness(violation: f32, compression: f32, stretch: f32) -> f32 {
    if violation > 0.0 {
        stretch
    } else {
        compression
    }
}
