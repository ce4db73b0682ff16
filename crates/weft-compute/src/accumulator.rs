//! Lock-free per-particle accumulation of constraint corrections.
//!
//! During a projection pass every constraint adds its correction for each
//! endpoint into that particle's slot. Slots hold a delta sum and a count;
//! the averaging pass then moves each particle by `sum / count`.
//!
//! Sums are kept in 64-bit fixed point (2⁻³² m resolution, ±2³¹ m range)
//! so that the concurrent additions are exact integer additions. Integer
//! addition is associative, so the sum after a pass is bit-for-bit the
//! same for every interleaving of writers.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use glam::Vec3;
use tracing::debug;

/// Fixed-point scale applied to deltas before accumulation (2³²).
pub const FIXED_POINT_SCALE: f64 = 4_294_967_296.0;

#[inline]
fn encode(value: f32) -> i64 {
    (value as f64 * FIXED_POINT_SCALE).round() as i64
}

#[inline]
fn decode(value: i64) -> f64 {
    value as f64 / FIXED_POINT_SCALE
}

#[derive(Debug, Default)]
struct Slot {
    sum: [AtomicI64; 3],
    count: AtomicU32,
}

/// Shared per-particle `(delta_sum, count)` buffers.
///
/// [`add`](Self::add) may be called concurrently from any number of
/// work-items. Reads ([`peek`](Self::peek), [`take`](Self::take)) belong
/// to the following phase; the dispatch barrier between phases orders
/// them after every write, so relaxed atomics suffice.
#[derive(Debug)]
pub struct ConstraintAccumulator {
    slots: Vec<Slot>,
}

impl ConstraintAccumulator {
    /// Allocates zeroed slots for `particle_count` particles.
    pub fn new(particle_count: usize) -> Self {
        debug!(particle_count, "constraint accumulator acquired");
        Self {
            slots: (0..particle_count).map(|_| Slot::default()).collect(),
        }
    }

    /// Number of particle slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds `delta` to the slot of `particle` and bumps its count.
    #[inline]
    pub fn add(&self, particle: usize, delta: Vec3) {
        let slot = &self.slots[particle];
        for (axis, component) in slot.sum.iter().zip(delta.to_array()) {
            axis.fetch_add(encode(component), Ordering::Relaxed);
        }
        slot.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current `(delta_sum, count)` of `particle`.
    pub fn peek(&self, particle: usize) -> (Vec3, u32) {
        let slot = &self.slots[particle];
        let sum = slot.sum.each_ref().map(|a| decode(a.load(Ordering::Relaxed)) as f32);
        (Vec3::from_array(sum), slot.count.load(Ordering::Relaxed))
    }

    /// Returns the averaged correction of `particle` and zeroes its slot.
    ///
    /// `None` when no constraint touched the particle.
    pub fn take(&self, particle: usize) -> Option<Vec3> {
        let slot = &self.slots[particle];
        let count = slot.count.swap(0, Ordering::Relaxed);
        let sum = slot.sum.each_ref().map(|a| a.swap(0, Ordering::Relaxed));
        if count == 0 {
            return None;
        }
        let inv = 1.0 / count as f64;
        Some(Vec3::from_array(sum.map(|s| (decode(s) * inv) as f32)))
    }

    /// Zeroes every slot.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            for axis in &mut slot.sum {
                *axis.get_mut() = 0;
            }
            *slot.count.get_mut() = 0;
        }
    }
}
