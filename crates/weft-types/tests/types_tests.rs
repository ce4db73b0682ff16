//! Integration tests for weft-types.

use weft_types::constants::{DEFAULT_DT, DEFAULT_ITERATIONS, EPSILON};
use weft_types::{TriangleId, WeftError, WeftResult};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn triangle_id_index() {
    let id = TriangleId::from(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn triangle_id_serializes_as_plain_index() {
    let json = serde_json::to_string(&TriangleId(100)).unwrap();
    assert_eq!(json, "100");
    let ids: Vec<TriangleId> = serde_json::from_str("[3, 1, 2]").unwrap();
    assert_eq!(ids, vec![TriangleId(3), TriangleId(1), TriangleId(2)]);
}

#[test]
fn triangle_ids_sort_by_index() {
    let mut ids = vec![TriangleId(9), TriangleId(2), TriangleId(5)];
    ids.sort();
    assert_eq!(ids, vec![TriangleId(2), TriangleId(5), TriangleId(9)]);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = WeftError::InvalidMesh("index 42 out of range".into());
    assert!(err.to_string().contains("index 42"));
    assert!(err.to_string().starts_with("Invalid mesh"));
}

#[test]
fn io_error_converts() {
    fn open() -> WeftResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json"))?;
        Ok(())
    }
    let err = open().unwrap_err();
    assert!(matches!(err, WeftError::Io(_)));
    assert!(err.to_string().contains("missing.json"));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn defaults_are_sane() {
    assert!(DEFAULT_DT > 0.0);
    assert!(DEFAULT_ITERATIONS >= 1);
    assert!(EPSILON > 0.0 && EPSILON < 1e-3);
}
