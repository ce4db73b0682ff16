//! Scoped per-particle storage.
//!
//! A [`ComputeBuffer`] is acquired when the solver sets up and released
//! when its owner drops, on every exit path.

use std::ops::{Index, IndexMut};

use tracing::debug;

/// A labelled, fixed-length buffer owned by the solver.
///
/// The length never changes after acquisition.
#[derive(Debug, Clone)]
pub struct ComputeBuffer<T> {
    label: &'static str,
    data: Vec<T>,
}

impl<T: Clone> ComputeBuffer<T> {
    /// Acquires a buffer of `len` copies of `value`.
    pub fn filled(label: &'static str, len: usize, value: T) -> Self {
        Self::from_data(label, vec![value; len])
    }
}

impl<T> ComputeBuffer<T> {
    /// Acquires a buffer holding `data`.
    pub fn from_data(label: &'static str, data: Vec<T>) -> Self {
        debug!(label, len = data.len(), "compute buffer acquired");
        Self { label, data }
    }

    /// Returns the buffer label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the contents.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over the contents.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Index<usize> for ComputeBuffer<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for ComputeBuffer<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T> Drop for ComputeBuffer<T> {
    fn drop(&mut self) {
        debug!(label = self.label, len = self.data.len(), "compute buffer released");
    }
}
