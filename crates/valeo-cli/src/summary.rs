//! Console summary for golden runs.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use valeo_model::ComparisonOutcome;

/// One line per rule plus the table; returns overall success.
pub fn print_golden_summary(outcomes: &[ComparisonOutcome]) -> bool {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Expected"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut all_passed = true;
    for outcome in outcomes {
        all_passed &= outcome.passed();
        table.add_row(vec![
            Cell::new(&outcome.rule_id),
            check_cell(outcome.columns_match),
            Cell::new(outcome.actual_row_count),
            Cell::new(outcome.expected_row_count),
            result_cell(outcome.passed()),
        ]);
    }
    println!("{table}");
    for outcome in outcomes {
        let verdict = if outcome.passed() { "PASS" } else { "FAIL" };
        println!("{}: {verdict}", outcome.rule_id);
    }
    all_passed
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn check_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn result_cell(passed: bool) -> Cell {
    if passed {
        Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}
