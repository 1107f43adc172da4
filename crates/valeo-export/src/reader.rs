//! XLSX header / row-count reading.
//!
//! The golden comparison only looks at the header row and the data row
//! count, so this reader never materializes cell values beyond the header.

use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use valeo_model::SheetSummary;

use crate::error::ExportError;

/// Read the first sheet's header row and data row count.
pub fn read_summary(path: &Path) -> Result<SheetSummary, ExportError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|err: calamine::XlsxError| ExportError::read(path, err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExportError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| ExportError::read(path, format!("missing sheet '{sheet_name}'")))?
        .map_err(|err| ExportError::read(path, err.to_string()))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => Vec::new(),
    };
    let row_count = rows.count();
    Ok(SheetSummary { headers, row_count })
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(v) => v.to_string(),
        DataType::Int(v) => v.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTimeIso(s) | DataType::DurationIso(s) => s.clone(),
        DataType::DateTime(v) | DataType::Duration(v) => v.to_string(),
        DataType::Error(e) => format!("#{e:?}"),
        DataType::Empty => String::new(),
    }
}
