//! XLSX writing.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;
use valeo_model::{CellValue, ExtractionResult, Row, Rule};

use crate::error::ExportError;

/// Write one sheet: header row = the rule's columns in declared order, one
/// body row per extracted row, empty cells left blank. An existing file at
/// `output_path` is overwritten without confirmation.
pub fn export(
    result: &ExtractionResult,
    rule: &Rule,
    output_path: &Path,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in rule.columns.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| ExportError::write(output_path, "too many columns"))?;
        worksheet
            .write_string(0, col, &column.name)
            .map_err(|err| ExportError::write(output_path, err.to_string()))?;
    }
    for (row_index, row) in result.rows.iter().enumerate() {
        write_row(worksheet, row_index, row, output_path)?;
    }

    workbook
        .save(output_path)
        .map_err(|err| ExportError::write(output_path, err.to_string()))?;
    info!(
        rule = rule.supplier_id.as_str(),
        rows = result.row_count(),
        output = %output_path.display(),
        "wrote spreadsheet"
    );
    Ok(())
}

fn write_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row_index: usize,
    row: &Row,
    output_path: &Path,
) -> Result<(), ExportError> {
    // Row 0 is the header.
    let sheet_row = u32::try_from(row_index + 1)
        .map_err(|_| ExportError::write(output_path, "too many rows"))?;
    for (col, cell) in row.cells.iter().enumerate() {
        let col =
            u16::try_from(col).map_err(|_| ExportError::write(output_path, "too many columns"))?;
        let written = match cell {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => worksheet.write_string(sheet_row, col, s).map(|_| ()),
            CellValue::Int(v) => worksheet.write_number(sheet_row, col, *v as f64).map(|_| ()),
            CellValue::Float(v) => worksheet.write_number(sheet_row, col, *v).map(|_| ()),
        };
        written.map_err(|err| ExportError::write(output_path, err.to_string()))?;
    }
    Ok(())
}
