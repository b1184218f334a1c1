//! Tests for sequential variant execution and shared output capture.

use std::fs;
use std::time::Duration;

use layerbench::errors::ProcessError;
use layerbench::{ProcessRunner, VariantSpec};
use tempfile::tempdir;

fn printing_variant(label: &str, text: &str) -> VariantSpec {
    VariantSpec::new(label, "sh").with_args(vec!["-c".to_string(), format!("printf '{text}'")])
}

#[test]
fn output_is_appended_in_invocation_order() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![
        printing_variant("first", "1.0 2.0\\n"),
        printing_variant("second", "3.0 4.0\\n"),
        printing_variant("third", "5.0 6.0\\n"),
    ];

    let results = ProcessRunner::new(&capture).execute(&variants).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].label, "first");
    assert_eq!(results[2].label, "third");

    let text = fs::read_to_string(&capture).unwrap();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(tokens, vec!["1.0", "2.0", "3.0", "4.0", "5.0", "6.0"]);
}

#[test]
fn permuting_variants_permutes_captured_rows() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![
        printing_variant("second", "3.0 4.0\\n"),
        printing_variant("first", "1.0 2.0\\n"),
    ];

    ProcessRunner::new(&capture).execute(&variants).unwrap();

    let text = fs::read_to_string(&capture).unwrap();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(tokens, vec!["3.0", "4.0", "1.0", "2.0"]);
}

#[test]
fn capture_is_truncated_between_runs() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");

    let runner = ProcessRunner::new(&capture);
    runner
        .execute(&[printing_variant("a", "1.0 2.0 3.0\\n")])
        .unwrap();
    runner.execute(&[printing_variant("b", "9.0\\n")]).unwrap();

    let text = fs::read_to_string(&capture).unwrap();
    assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["9.0"]);
}

#[test]
fn non_zero_exit_aborts_and_names_the_variant() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![
        printing_variant("ok", "1.0\\n"),
        VariantSpec::new("broken", "sh").with_args(vec![
            "-c".to_string(),
            "echo boom >&2; exit 3".to_string(),
        ]),
        printing_variant("never-runs", "2.0\\n"),
    ];

    let result = ProcessRunner::new(&capture).execute(&variants);

    match result {
        Err(ProcessError::ExitFailure {
            variant, stderr, ..
        }) => {
            assert_eq!(variant, "broken");
            assert_eq!(stderr, "boom");
        }
        other => panic!("expected ExitFailure, got {other:?}"),
    }

    // The aborted sequence must not have run the remaining variant.
    let text = fs::read_to_string(&capture).unwrap();
    assert!(!text.contains("2.0"));
}

#[test]
fn missing_executable_is_a_launch_error() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![VariantSpec::new(
        "missing",
        dir.path().join("no-such-executable"),
    )];

    let result = ProcessRunner::new(&capture).execute(&variants);
    assert!(matches!(
        result,
        Err(ProcessError::Launch { variant, .. }) if variant == "missing"
    ));
}

#[test]
fn hung_variant_is_killed_on_timeout() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![VariantSpec::new("hung", "sleep").with_args(vec!["5".to_string()])];

    let result = ProcessRunner::new(&capture)
        .with_timeout(Duration::from_millis(100))
        .execute(&variants);

    assert!(matches!(
        result,
        Err(ProcessError::Timeout { variant, .. }) if variant == "hung"
    ));
}

#[test]
fn standard_matrix_follows_the_fixed_invocation_order() {
    let variants = VariantSpec::standard_matrix("./run-linear", "-p", "blas");

    let labels: Vec<&str> = variants.iter().map(|v| v.label.as_str()).collect();
    assert_eq!(labels, vec!["baseline", "accel", "parallel", "parallel+accel"]);

    assert_eq!(variants[0].program.to_str(), Some("./run-linear"));
    assert!(variants[0].args.is_empty());
    assert_eq!(variants[1].args, vec!["blas"]);
    assert_eq!(variants[2].program.to_str(), Some("./run-linear-p"));
    assert!(variants[2].args.is_empty());
    assert_eq!(variants[3].program.to_str(), Some("./run-linear-p"));
    assert_eq!(variants[3].args, vec!["blas"]);
}

#[test]
fn one_duration_is_recorded_per_completed_variant() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("stdout.txt");
    let variants = vec![
        printing_variant("a", "1.0\\n"),
        printing_variant("b", "2.0\\n"),
    ];

    let results = ProcessRunner::new(&capture).execute(&variants).unwrap();
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.duration > Duration::ZERO);
    }
}
