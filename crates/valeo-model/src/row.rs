//! Extracted row values.

use serde::{Deserialize, Serialize};

/// A single extracted cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Display form used for diagnostics; empty cells render as "".
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
        }
    }
}

/// One extracted table row.
///
/// Cells are aligned with the owning [`Rule`](crate::Rule)'s declared column
/// order, so the "keys are exactly the rule's columns" invariant holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    #[must_use]
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// Ordered rows produced by one extraction run, in document encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    pub rows: Vec<Row>,
}

impl ExtractionResult {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
