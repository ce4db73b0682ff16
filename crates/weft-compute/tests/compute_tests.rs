//! Integration tests for weft-compute.

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec3;
use weft_compute::{ComputeBackend, ComputeBuffer, ConstraintAccumulator, CpuFallback, RayonBackend};

// ─── Buffer Tests ─────────────────────────────────────────────

#[test]
fn buffer_filled() {
    let buf = ComputeBuffer::filled("test", 100, 0.0f32);
    assert_eq!(buf.len(), 100);
    assert_eq!(buf.label(), "test");
    assert!(buf.iter().all(|&x| x == 0.0));
}

#[test]
fn buffer_from_data_and_index() {
    let mut buf = ComputeBuffer::from_data("test", vec![1.0, 2.0, 3.0]);
    buf[1] = 7.0;
    assert_eq!(buf.as_slice(), &[1.0, 7.0, 3.0]);
    buf.as_mut_slice()[2] = 9.0;
    assert_eq!(buf[2], 9.0);
    assert!(!buf.is_empty());
}

// ─── Backend Tests ────────────────────────────────────────────

#[test]
fn cpu_backend_identity() {
    let backend = CpuFallback::new();
    assert_eq!(backend.name(), "cpu_fallback");
    assert!(!backend.is_parallel());
}

#[test]
fn rayon_backend_identity() {
    let backend = RayonBackend::with_threads(2).unwrap();
    assert_eq!(backend.name(), "rayon");
    assert!(backend.is_parallel());
    assert_eq!(backend.thread_count(), 2);
}

#[test]
fn rayon_backend_rejects_zero_threads() {
    assert!(RayonBackend::with_threads(0).is_err());
}

fn dispatch_visits_every_item<B: ComputeBackend>(backend: &B) {
    let hits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();
    backend.dispatch(hits.len(), |i| {
        hits[i].fetch_add(1, Ordering::Relaxed);
    });
    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn dispatch_visits_every_item_once() {
    dispatch_visits_every_item(&CpuFallback::new());
    dispatch_visits_every_item(&RayonBackend::new().with_min_len(1));
}

#[test]
fn dispatch_mut_passes_matching_index() {
    for backend in [RayonBackend::new(), RayonBackend::new().with_min_len(1)] {
        let mut items = vec![0usize; 513];
        backend.dispatch_mut(&mut items, |i, item| *item = i * 2);
        assert!(items.iter().enumerate().all(|(i, &v)| v == i * 2));
    }
    let mut items = vec![0usize; 17];
    CpuFallback::new().dispatch_mut(&mut items, |i, item| *item = i + 1);
    assert_eq!(items[16], 17);
}

#[test]
fn dispatch_of_zero_items_is_noop() {
    RayonBackend::new().dispatch(0, |_| panic!("no work-items"));
    CpuFallback::new().dispatch(0, |_| panic!("no work-items"));
}

// ─── Accumulator Tests ────────────────────────────────────────

#[test]
fn accumulator_starts_empty() {
    let acc = ConstraintAccumulator::new(4);
    assert_eq!(acc.len(), 4);
    assert_eq!(acc.peek(2), (Vec3::ZERO, 0));
    assert_eq!(acc.take(2), None);
}

#[test]
fn accumulator_averages() {
    let acc = ConstraintAccumulator::new(2);
    acc.add(1, Vec3::new(1.0, 0.0, -2.0));
    acc.add(1, Vec3::new(3.0, 1.0, 0.0));
    let (sum, count) = acc.peek(1);
    assert_eq!(count, 2);
    assert!((sum - Vec3::new(4.0, 1.0, -2.0)).length() < 1e-6);

    let avg = acc.take(1).unwrap();
    assert!((avg - Vec3::new(2.0, 0.5, -1.0)).length() < 1e-6);
}

#[test]
fn take_resets_slot() {
    let acc = ConstraintAccumulator::new(1);
    acc.add(0, Vec3::ONE);
    assert!(acc.take(0).is_some());
    assert_eq!(acc.take(0), None);
    assert_eq!(acc.peek(0), (Vec3::ZERO, 0));
}

#[test]
fn reset_clears_all_slots() {
    let mut acc = ConstraintAccumulator::new(3);
    for i in 0..3 {
        acc.add(i, Vec3::splat(i as f32 + 1.0));
    }
    acc.reset();
    assert!((0..3).all(|i| acc.peek(i) == (Vec3::ZERO, 0)));
}

#[test]
fn tiny_deltas_survive_fixed_point() {
    let acc = ConstraintAccumulator::new(1);
    acc.add(0, Vec3::new(1.0e-6, -1.0e-6, 0.0));
    let avg = acc.take(0).unwrap();
    assert!((avg.x - 1.0e-6).abs() < 1e-9);
    assert!((avg.y + 1.0e-6).abs() < 1e-9);
}

#[test]
fn parallel_accumulation_matches_sequential_exactly() {
    let n_particles = 32;
    let deltas: Vec<(usize, Vec3)> = (0..20_000)
        .map(|k| {
            let f = k as f32;
            (k % n_particles, Vec3::new((f * 0.37).sin(), (f * 1.3).cos() * 0.01, f.sqrt() * 1e-4))
        })
        .collect();

    let sequential = ConstraintAccumulator::new(n_particles);
    CpuFallback::new().dispatch(deltas.len(), |k| sequential.add(deltas[k].0, deltas[k].1));

    let parallel = ConstraintAccumulator::new(n_particles);
    RayonBackend::with_threads(4)
        .unwrap()
        .with_min_len(1)
        .dispatch(deltas.len(), |k| parallel.add(deltas[k].0, deltas[k].1));

    for p in 0..n_particles {
        assert_eq!(sequential.peek(p), parallel.peek(p));
        assert_eq!(sequential.take(p), parallel.take(p));
    }
}
