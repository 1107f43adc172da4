//! Golden comparison runner.
//!
//! For each locked rule, runs the extract+export pipeline against the fixed
//! sample input and compares the result's header and row count against the
//! recorded expected spreadsheet. Cell values are deliberately not compared;
//! the golden fixtures only lock column layout and row count.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use valeo_model::ComparisonOutcome;

#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("missing golden fixture: {path}")]
    FixtureMissing { path: PathBuf },

    #[error(transparent)]
    Rule(#[from] valeo_rules::RuleError),

    #[error(transparent)]
    Extract(#[from] valeo_extract::ExtractError),

    #[error(transparent)]
    Export(#[from] valeo_export::ExportError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the golden comparison for every locked rule.
///
/// Layout consumed: `<goldens_dir>/input/*.pdf` (the first, sorted, is the
/// sample document shared by all rules) and
/// `<goldens_dir>/expected/<rule_id lowercased>.xlsx` per rule.
pub fn run_golden(goldens_dir: &Path) -> Result<Vec<ComparisonOutcome>, GoldenError> {
    let input = sample_input(&goldens_dir.join("input"))?;
    let scratch = tempfile::tempdir()?;
    let mut outcomes = Vec::new();

    for rule_id in valeo_rules::rule_ids() {
        let expected_path = expected_fixture(goldens_dir, rule_id)?;
        let rule = valeo_rules::load_rule(rule_id)?;

        let result = valeo_extract::extract(&rule, &input)?;
        let fresh_path = scratch
            .path()
            .join(format!("{}.xlsx", rule_id.to_lowercase()));
        valeo_export::export(&result, &rule, &fresh_path)?;

        let actual = valeo_export::read_summary(&fresh_path)?;
        let expected = valeo_export::read_summary(&expected_path)?;
        let outcome = ComparisonOutcome::compare(rule_id, &actual, &expected);
        info!(
            rule = rule_id,
            columns_match = outcome.columns_match,
            row_count_match = outcome.row_count_match,
            "golden comparison"
        );
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// First PDF (sorted by name) under the goldens input directory.
fn sample_input(input_dir: &Path) -> Result<PathBuf, GoldenError> {
    let missing = || GoldenError::FixtureMissing {
        path: input_dir.to_path_buf(),
    };
    let entries = std::fs::read_dir(input_dir).map_err(|_| missing())?;
    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();
    let input = pdfs.into_iter().next().ok_or_else(missing)?;
    debug!(input = %input.display(), "using sample input");
    Ok(input)
}

fn expected_fixture(goldens_dir: &Path, rule_id: &str) -> Result<PathBuf, GoldenError> {
    let path = goldens_dir
        .join("expected")
        .join(format!("{}.xlsx", rule_id.to_lowercase()));
    if !path.is_file() {
        return Err(GoldenError::FixtureMissing { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_goldens_dir_is_fixture_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = run_golden(&dir.path().join("does-not-exist")).unwrap_err();
        assert!(matches!(err, GoldenError::FixtureMissing { .. }));
    }

    #[test]
    fn empty_input_dir_is_fixture_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("input")).expect("mkdir");
        let err = run_golden(dir.path()).unwrap_err();
        assert!(matches!(err, GoldenError::FixtureMissing { path } if path.ends_with("input")));
    }

    #[test]
    fn missing_expected_file_is_fixture_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input_dir = dir.path().join("input");
        std::fs::create_dir_all(&input_dir).expect("mkdir");
        // Present but never opened: the expected fixture check fails first.
        std::fs::write(input_dir.join("sample.pdf"), b"%PDF-1.4").expect("write");
        let err = run_golden(dir.path()).unwrap_err();
        assert!(
            matches!(err, GoldenError::FixtureMissing { path } if path.ends_with("valeo_invoice.xlsx"))
        );
    }
}
