//! Integration tests for SparseConfig loading and the zero-repeat policy.

use std::io::Write;

use gp_sparse::{sparse_repeat_with, SparseConfig, SparseTensor, ZeroRepeatPolicy};

// ---------------------------------------------------------------------------
// Defaults & parsing
// ---------------------------------------------------------------------------

#[test]
fn default_config_rejects_zero_repeats() {
    let cfg = SparseConfig::default();
    assert_eq!(cfg.zero_repeat, ZeroRepeatPolicy::Reject);
    assert_eq!(cfg.drop_tolerance, 0.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn zero_repeat_policy_from_str() {
    assert_eq!("empty".parse::<ZeroRepeatPolicy>(), Ok(ZeroRepeatPolicy::Empty));
    assert_eq!("REJECT".parse::<ZeroRepeatPolicy>(), Ok(ZeroRepeatPolicy::Reject));
    assert!("tile".parse::<ZeroRepeatPolicy>().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = SparseConfig::new(ZeroRepeatPolicy::Empty, 1e-8);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"zero_repeat\":\"empty\""));
    let loaded: SparseConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = SparseConfig::from_json_str(r#"{"zero_repeat": "empty"}"#).unwrap();
    assert_eq!(cfg.zero_repeat, ZeroRepeatPolicy::Empty);
    assert_eq!(cfg.drop_tolerance, 0.0);

    let cfg = SparseConfig::from_json_str(r#"{"zero_repeat": 3, "drop_tolerance": 0.5}"#).unwrap();
    assert_eq!(cfg.zero_repeat, ZeroRepeatPolicy::Reject);
    assert_eq!(cfg.drop_tolerance, 0.5);
}

#[test]
fn invalid_json_and_tolerance_error() {
    assert!(SparseConfig::from_json_str("not json").is_err());
    assert!(SparseConfig::from_json_str(r#"{"drop_tolerance": -1.0}"#).is_err());
}

#[test]
fn config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{"zero_repeat": "empty", "drop_tolerance": 1e-6}}"#).unwrap();

    let cfg = SparseConfig::from_path(&path).unwrap();
    assert_eq!(cfg.zero_repeat, ZeroRepeatPolicy::Empty);
    assert_eq!(cfg.drop_tolerance, 1e-6);

    assert!(SparseConfig::from_path(dir.path().join("missing.json")).is_err());
}

// ---------------------------------------------------------------------------
// Policy applied to sparse_repeat
// ---------------------------------------------------------------------------

#[test]
fn empty_policy_yields_zero_length_axis() {
    let m = SparseTensor::from_triplets((2, 2), vec![0, 1], vec![0, 1], vec![1.0f64, 2.0]).unwrap();
    let cfg = SparseConfig::new(ZeroRepeatPolicy::Empty, 0.0);

    let res = sparse_repeat_with(&m, 2, 0, &cfg).unwrap();
    assert_eq!(res.shape(), &[4, 0]);
    assert_eq!(res.nnz(), 0);

    let res = sparse_repeat_with(&m, 2, 1, &cfg).unwrap();
    assert_eq!(res.shape(), &[4, 2]);
    assert_eq!(res.nnz(), 4);
}
