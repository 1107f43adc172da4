//! The extraction engine.
//!
//! Works purely on text: the PDF layer hands over the document's text, the
//! engine splits it into lines, decides which lines are table rows per the
//! rule's locator, and fills one [`Row`] per located line from the rule's
//! column specs. Row order is document encounter order; nothing is sorted or
//! deduplicated.

use regex::Regex;
use tracing::warn;
use valeo_model::{CellValue, ColumnSpec, DataType, ExtractionResult, Row, Rule};

/// Tokens forming the numeric tail of a row (`12,50`, `1.234,56`, `87`).
const EU_NUMERIC_TOKEN: &str = r"[\d.,]+";

enum CompiledSpec {
    Position(i64),
    Pattern { regex: Regex, before_anchor: bool },
    Anchor(i64),
    Carry(Regex),
}

struct CompiledColumn {
    name: String,
    dtype: DataType,
    required: bool,
    spec: CompiledSpec,
}

/// A [`Rule`] with every regex compiled once up front.
pub struct CompiledRule {
    supplier_id: String,
    min_tokens: usize,
    tail_numeric: usize,
    skip_prefixes: Vec<String>,
    anchor: Vec<Regex>,
    tail_token: Regex,
    columns: Vec<CompiledColumn>,
    forward_fill: Vec<usize>,
}

/// Compile `pattern` so it must cover a whole token.
fn token_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

impl CompiledRule {
    pub fn compile(rule: &Rule) -> Result<Self, regex::Error> {
        let anchor = rule
            .locate
            .anchor
            .iter()
            .map(|p| token_regex(p))
            .collect::<Result<Vec<_>, _>>()?;
        let columns = rule
            .columns
            .iter()
            .map(|column| {
                let spec = match &column.spec {
                    ColumnSpec::Position { index } => CompiledSpec::Position(*index),
                    ColumnSpec::Pattern {
                        pattern,
                        before_anchor,
                    } => CompiledSpec::Pattern {
                        regex: token_regex(pattern)?,
                        before_anchor: *before_anchor,
                    },
                    ColumnSpec::Anchor { offset } => CompiledSpec::Anchor(*offset),
                    // Carry patterns search the whole line, not one token.
                    ColumnSpec::Carry { pattern } => CompiledSpec::Carry(Regex::new(pattern)?),
                };
                Ok(CompiledColumn {
                    name: column.name.clone(),
                    dtype: column.dtype,
                    required: column.required,
                    spec,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        let forward_fill = rule
            .forward_fill
            .iter()
            .filter_map(|name| rule.column_index(name))
            .collect();
        Ok(Self {
            supplier_id: rule.supplier_id.clone(),
            min_tokens: rule.locate.min_tokens,
            tail_numeric: rule.locate.tail_numeric,
            skip_prefixes: rule
                .locate
                .skip_prefixes
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            anchor,
            tail_token: token_regex(EU_NUMERIC_TOKEN)?,
            columns,
            forward_fill,
        })
    }

    /// True when the line passes the prefix, token-count and numeric-tail
    /// filters. Anchor matching happens separately because the anchor index
    /// feeds the column specs.
    fn line_is_candidate(&self, line: &str, tokens: &[&str]) -> bool {
        let low = line.to_lowercase();
        if self.skip_prefixes.iter().any(|p| low.starts_with(p)) {
            return false;
        }
        if tokens.len() < self.min_tokens || tokens.len() < self.tail_numeric {
            return false;
        }
        tokens[tokens.len() - self.tail_numeric..]
            .iter()
            .all(|t| self.tail_token.is_match(t))
    }

    /// Find the row anchor: the rightmost position where the anchor token
    /// sequence matches, scanned right to left. `None` means the line is not
    /// a row (when an anchor sequence is declared at all).
    fn find_anchor(&self, tokens: &[&str]) -> Option<usize> {
        if self.anchor.is_empty() {
            return None;
        }
        let last_start = tokens.len().checked_sub(self.anchor.len())?;
        (0..=last_start).rev().find(|&start| {
            self.anchor
                .iter()
                .enumerate()
                .all(|(k, re)| re.is_match(tokens[start + k]))
        })
    }
}

/// Run the engine over already-extracted document text.
pub fn extract_from_text(rule: &Rule, text: &str) -> Result<ExtractionResult, regex::Error> {
    let compiled = CompiledRule::compile(rule)?;
    let mut carries: Vec<Option<String>> = vec![None; compiled.columns.len()];
    let mut rows: Vec<Row> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        // Carry columns watch every line, including non-row lines: the
        // invoice number sits on a header line above the table.
        for (idx, column) in compiled.columns.iter().enumerate() {
            if let CompiledSpec::Carry(re) = &column.spec
                && let Some(found) = re.find(line)
            {
                carries[idx] = Some(found.as_str().to_string());
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !compiled.line_is_candidate(line, &tokens) {
            continue;
        }
        let anchor_idx = compiled.find_anchor(&tokens);
        if !compiled.anchor.is_empty() && anchor_idx.is_none() {
            continue;
        }

        if let Some(row) = build_row(&compiled, &tokens, anchor_idx, &carries, rows.len()) {
            rows.push(row);
        }
    }

    let mut result = ExtractionResult { rows };
    apply_forward_fill(&mut result, &compiled.forward_fill);
    Ok(result)
}

fn build_row(
    compiled: &CompiledRule,
    tokens: &[&str],
    anchor_idx: Option<usize>,
    carries: &[Option<String>],
    row_index: usize,
) -> Option<Row> {
    let mut cells = Vec::with_capacity(compiled.columns.len());
    for (idx, column) in compiled.columns.iter().enumerate() {
        let raw: Option<&str> = match &column.spec {
            CompiledSpec::Position(index) => resolve_index(*index, tokens.len())
                .and_then(|i| tokens.get(i))
                .copied(),
            CompiledSpec::Pattern {
                regex,
                before_anchor,
            } => {
                let window = if *before_anchor {
                    &tokens[..anchor_idx.unwrap_or(tokens.len())]
                } else {
                    tokens
                };
                window.iter().find(|t| regex.is_match(t)).copied()
            }
            CompiledSpec::Anchor(offset) => anchor_idx
                .and_then(|a| resolve_offset(a, *offset, tokens.len()))
                .and_then(|i| tokens.get(i))
                .copied(),
            CompiledSpec::Carry(_) => carries[idx].as_deref(),
        };
        match raw.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => cells.push(coerce(&compiled.supplier_id, column, raw, row_index)),
            None => {
                if column.required {
                    return None;
                }
                cells.push(CellValue::Empty);
            }
        }
    }
    Some(Row::new(cells))
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index
    };
    usize::try_from(resolved).ok().filter(|&i| i < len)
}

fn resolve_offset(anchor: usize, offset: i64, len: usize) -> Option<usize> {
    let resolved = anchor as i64 + offset;
    usize::try_from(resolved).ok().filter(|&i| i < len)
}

/// Coerce a raw token to the column's declared type. Coercion failure on a
/// non-empty value is a warning, never fatal; the raw text is kept.
fn coerce(supplier_id: &str, column: &CompiledColumn, raw: &str, row_index: usize) -> CellValue {
    match column.dtype {
        DataType::Text => CellValue::Text(raw.to_string()),
        DataType::Integer => match raw.parse::<i64>() {
            Ok(value) => CellValue::Int(value),
            Err(_) => {
                warn!(
                    rule = supplier_id,
                    row = row_index,
                    column = column.name.as_str(),
                    value = raw,
                    "integer coercion failed, keeping raw text"
                );
                CellValue::Text(raw.to_string())
            }
        },
        DataType::Number => match crate::numeric::eu_to_float(raw) {
            Some(value) => CellValue::Float(value),
            None => {
                warn!(
                    rule = supplier_id,
                    row = row_index,
                    column = column.name.as_str(),
                    value = raw,
                    "numeric coercion failed, keeping raw text"
                );
                CellValue::Text(raw.to_string())
            }
        },
    }
}

/// Replace empty cells in forward-filled columns with the nearest preceding
/// non-empty value, in document row order.
fn apply_forward_fill(result: &mut ExtractionResult, column_indexes: &[usize]) {
    for &col in column_indexes {
        let mut last: Option<CellValue> = None;
        for row in &mut result.rows {
            match row.cells.get_mut(col) {
                Some(cell) if cell.is_empty() => {
                    if let Some(value) = &last {
                        *cell = value.clone();
                    }
                }
                Some(cell) => last = Some(cell.clone()),
                None => {}
            }
        }
    }
}
