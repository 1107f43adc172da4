#![deny(unsafe_code)]

//! PDF table extraction for Valeo documents.
//!
//! The PDF layer is deliberately thin: `pdf-extract` turns the document into
//! text, and [`engine::extract_from_text`] does the actual work, which keeps
//! the engine testable without PDF fixtures.

pub mod engine;
pub mod error;
pub mod numeric;

use std::path::Path;

use tracing::{debug, info};
use valeo_model::{ExtractionResult, Rule};

pub use crate::engine::extract_from_text;
pub use crate::error::ExtractError;

/// Extract table rows from a PDF according to `rule`.
///
/// # Errors
///
/// `ExtractError::InputNotFound` when `input_path` is not a readable file;
/// `ExtractError::UnsupportedDocument` when the PDF cannot be parsed or
/// yields no text at all.
pub fn extract(rule: &Rule, input_path: &Path) -> Result<ExtractionResult, ExtractError> {
    if !input_path.is_file() {
        return Err(ExtractError::InputNotFound {
            path: input_path.to_path_buf(),
        });
    }
    let text = pdf_extract::extract_text(input_path)
        .map_err(|err| ExtractError::unsupported(input_path, err.to_string()))?;
    if text.trim().is_empty() {
        return Err(ExtractError::unsupported(
            input_path,
            "document yields no text",
        ));
    }
    debug!(
        rule = rule.supplier_id.as_str(),
        chars = text.len(),
        "extracted document text"
    );
    let result = extract_from_text(rule, &text)?;
    info!(
        rule = rule.supplier_id.as_str(),
        rows = result.row_count(),
        input = %input_path.display(),
        "extraction finished"
    );
    Ok(result)
}
