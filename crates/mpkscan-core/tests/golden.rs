use std::fs;
use std::path::{Path, PathBuf};

use mpkscan_core::{InspectOptions, Report, inspect_file};

fn golden_dir(case: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(case)
}

fn load_expected_report(case: &str) -> Report {
    let expected_path = golden_dir(case).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(case: &str) {
    let input = golden_dir(case).join("input.mpk");
    let expected = load_expected_report(case);

    let mut actual = inspect_file(&input, &InspectOptions::default()).expect("inspect input");
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {case}");
}

#[test]
fn golden_scalars() {
    run_golden("scalars");
}

#[test]
fn golden_nested_map() {
    run_golden("nested_map");
}

#[test]
fn golden_deep_truncated() {
    run_golden("deep_truncated");
}

#[test]
fn golden_deep_truncated_stops_at_default_depth() {
    let report = load_expected_report("deep_truncated");
    let mut node = &report.root;
    let mut levels = 0;
    while let Some(items) = node.items.as_ref() {
        node = &items[0];
        levels += 1;
    }
    assert_eq!(levels, mpkscan_core::DEFAULT_MAX_DEPTH);
    assert_eq!(node.truncated, Some(true));
}

#[test]
fn golden_nested_map_path_matches_subtree() {
    let input = golden_dir("nested_map").join("input.mpk");
    let options = InspectOptions {
        path: Some("/meta".to_string()),
        ..InspectOptions::default()
    };
    let at_path = inspect_file(&input, &options).expect("inspect at path");
    let full = load_expected_report("nested_map");
    let pairs = full.root.pairs.expect("root pairs");
    assert_eq!(at_path.root, pairs[2].value);
    assert_eq!(at_path.path.as_deref(), Some("/meta"));
}
