//! Golden comparison results.

use serde::{Deserialize, Serialize};

/// Header and row count of a single spreadsheet sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub headers: Vec<String>,
    /// Data rows, excluding the header row.
    pub row_count: usize,
}

/// Outcome of comparing a freshly produced spreadsheet against the recorded
/// expected one for a single rule.
///
/// The comparison is deliberately header + row count only; cell values are
/// not checked, so a pass does not guarantee per-cell correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub rule_id: String,
    pub columns_match: bool,
    pub row_count_match: bool,
    pub actual_row_count: usize,
    pub expected_row_count: usize,
}

impl ComparisonOutcome {
    /// Compare header (names and order) and row count of two summaries.
    #[must_use]
    pub fn compare(rule_id: &str, actual: &SheetSummary, expected: &SheetSummary) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            columns_match: actual.headers == expected.headers,
            row_count_match: actual.row_count == expected.row_count,
            actual_row_count: actual.row_count,
            expected_row_count: expected.row_count,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.columns_match && self.row_count_match
    }
}
