//! Declarative extraction rules.
//!
//! A [`Rule`] is a plain immutable value describing which columns to pull out
//! of a supplier document and how to find each one inside a located table
//! row. Rules are authored as TOML documents and deserialized here; nothing
//! in this module touches the PDF or XLSX libraries, so rules can be
//! validated and unit-tested in isolation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Kept as-is.
    Text,
    /// Whole number (e.g. quantities).
    Integer,
    /// Decimal in the supplier's EU format on input (`1.234,56`).
    Number,
}

/// How to locate one column's value within a table row.
///
/// A row is a sequence of whitespace-separated tokens; the locator may also
/// mark one token as the row *anchor* (see [`RowLocator::anchor`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// Token at a fixed index; negative indexes count from the end of the row.
    Position { index: i64 },
    /// First token matching the pattern, scanning left to right. With
    /// `before_anchor` set, only tokens before the row anchor are searched.
    Pattern {
        pattern: String,
        #[serde(default)]
        before_anchor: bool,
    },
    /// Token at a fixed offset from the row anchor.
    Anchor { offset: i64 },
    /// Latest match of the pattern seen on any preceding document line.
    ///
    /// Covers header fields that apply to every following row, such as the
    /// invoice number printed once per page.
    Carry { pattern: String },
}

impl ColumnSpec {
    /// True for spec variants that only make sense when the locator defines
    /// an anchor sequence.
    #[must_use]
    pub fn needs_anchor(&self) -> bool {
        match self {
            Self::Anchor { .. } => true,
            Self::Pattern { before_anchor, .. } => *before_anchor,
            Self::Position { .. } | Self::Carry { .. } => false,
        }
    }
}

/// One column of a rule: output name, target type, extraction spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRule {
    pub name: String,
    #[serde(default = "default_dtype")]
    pub dtype: DataType,
    pub spec: ColumnSpec,
    /// A located row whose spec finds no value here is dropped entirely.
    #[serde(default)]
    pub required: bool,
}

fn default_dtype() -> DataType {
    DataType::Text
}

/// Which text lines of the document count as table rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowLocator {
    /// Lines with fewer whitespace-separated tokens are not rows.
    #[serde(default)]
    pub min_tokens: usize,
    /// The last N tokens must look EU-numeric (`[\d.,]+`).
    #[serde(default)]
    pub tail_numeric: usize,
    /// Case-insensitive prefixes of lines to skip outright (labels, totals).
    #[serde(default)]
    pub skip_prefixes: Vec<String>,
    /// Token-pattern sequence identifying the row anchor, scanned
    /// right-to-left starting just before the numeric tail. The anchor index
    /// is the position of the sequence's first token. A line where the
    /// sequence never matches is not a row.
    #[serde(default)]
    pub anchor: Vec<String>,
}

/// A complete extraction rule for one supplier/document-type pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub supplier_id: String,
    /// Columns whose empty cells take the nearest preceding non-empty value.
    #[serde(default)]
    pub forward_fill: Vec<String>,
    pub locate: RowLocator,
    pub columns: Vec<ColumnRule>,
}

/// Structural violation found by [`Rule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("rule declares no columns")]
    NoColumns,
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("forward_fill names an undeclared column: {0}")]
    UnknownForwardFill(String),
    #[error("column '{0}' requires a row anchor but the locator defines none")]
    MissingAnchor(String),
}

impl Rule {
    /// Check the rule's structural invariants: non-empty column list, unique
    /// column names, `forward_fill` drawn from declared columns, and an
    /// anchor sequence present whenever a column spec depends on one.
    ///
    /// Regex syntax is checked at load time by the rule store, which owns the
    /// regex dependency.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        if self.columns.is_empty() {
            return Err(RuleViolation::NoColumns);
        }
        let mut seen = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            if seen.contains(&column.name.as_str()) {
                return Err(RuleViolation::DuplicateColumn(column.name.clone()));
            }
            seen.push(column.name.as_str());
            if column.spec.needs_anchor() && self.locate.anchor.is_empty() {
                return Err(RuleViolation::MissingAnchor(column.name.clone()));
            }
        }
        for name in &self.forward_fill {
            if !seen.contains(&name.as_str()) {
                return Err(RuleViolation::UnknownForwardFill(name.clone()));
            }
        }
        Ok(())
    }

    /// Declared column names, in declared order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Index of a column by name, if declared.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}
