#![deny(unsafe_code)]

//! Spreadsheet output for extraction results, plus the summary reader used
//! by the golden comparison.

pub mod error;
pub mod reader;
pub mod xlsx;

pub use crate::error::ExportError;
pub use crate::reader::read_summary;
pub use crate::xlsx::export;
