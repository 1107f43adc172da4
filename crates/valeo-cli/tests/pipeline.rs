//! Integration tests for the CLI pipeline error paths.
//!
//! The happy golden path needs the checked-in sample PDF fixtures; what is
//! locked down here is that every failure mode surfaces as a typed error
//! instead of a panic.

use std::path::Path;

use valeo_cli::commands::run_export;
use valeo_cli::golden::{GoldenError, run_golden};

#[test]
fn export_with_missing_input_fails_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = run_export(
        "VALEO_PACKING",
        &dir.path().join("missing.pdf"),
        &dir.path().join("out.xlsx"),
    )
    .unwrap_err();
    let extract_err = err
        .downcast_ref::<valeo_extract::ExtractError>()
        .expect("extract error");
    assert!(matches!(
        extract_err,
        valeo_extract::ExtractError::InputNotFound { .. }
    ));
    // No partial output left behind for a failed extraction.
    assert!(!dir.path().join("out.xlsx").exists());
}

#[test]
fn export_with_garbage_pdf_is_unsupported_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("garbage.pdf");
    std::fs::write(&input, b"definitely not a pdf").expect("write");
    let err = run_export("VALEO_INVOICE", &input, &dir.path().join("out.xlsx")).unwrap_err();
    let extract_err = err
        .downcast_ref::<valeo_extract::ExtractError>()
        .expect("extract error");
    assert!(matches!(
        extract_err,
        valeo_extract::ExtractError::UnsupportedDocument { .. }
    ));
}

#[test]
fn golden_without_expected_files_is_fixture_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).expect("mkdir input");
    std::fs::create_dir_all(dir.path().join("expected")).expect("mkdir expected");
    std::fs::write(input_dir.join("sample.pdf"), b"%PDF-1.4").expect("write sample");

    let err = run_golden(dir.path()).unwrap_err();
    assert!(matches!(err, GoldenError::FixtureMissing { .. }));
}

#[test]
fn golden_against_absent_directory_is_fixture_missing() {
    let err = run_golden(Path::new("/nonexistent/goldens")).unwrap_err();
    assert!(matches!(err, GoldenError::FixtureMissing { .. }));
}
