pub mod compare;
pub mod row;
pub mod rule;

pub use compare::{ComparisonOutcome, SheetSummary};
pub use row::{CellValue, ExtractionResult, Row};
pub use rule::{ColumnRule, ColumnSpec, DataType, RowLocator, Rule, RuleViolation};

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, spec: ColumnSpec) -> ColumnRule {
        ColumnRule {
            name: name.to_string(),
            dtype: DataType::Text,
            spec,
            required: false,
        }
    }

    fn minimal_rule() -> Rule {
        Rule {
            supplier_id: "TEST".to_string(),
            forward_fill: vec![],
            locate: RowLocator::default(),
            columns: vec![text_column("A", ColumnSpec::Position { index: 0 })],
        }
    }

    #[test]
    fn rule_deserializes_from_toml() {
        let doc = r#"
            supplier_id = "VALEO_INVOICE"
            forward_fill = []

            [locate]
            min_tokens = 7
            tail_numeric = 2
            anchor = ['\d+', '[A-Z]{2}', '\d{6,8}']

            [[columns]]
            name = "Qty"
            dtype = "integer"
            spec = { kind = "anchor", offset = 0 }

            [[columns]]
            name = "Net Price"
            dtype = "number"
            spec = { kind = "position", index = -2 }

            [[columns]]
            name = "InvoiceNo"
            spec = { kind = "carry", pattern = '\b695\d{6}\b' }
        "#;
        let rule: Rule = toml::from_str(doc).expect("parse rule");
        assert_eq!(rule.supplier_id, "VALEO_INVOICE");
        assert_eq!(rule.locate.anchor.len(), 3);
        assert_eq!(rule.columns[0].spec, ColumnSpec::Anchor { offset: 0 });
        assert_eq!(rule.columns[1].dtype, DataType::Number);
        // dtype defaults to text when omitted
        assert_eq!(rule.columns[2].dtype, DataType::Text);
        rule.validate().expect("valid rule");
    }

    #[test]
    fn validate_rejects_empty_columns() {
        let mut rule = minimal_rule();
        rule.columns.clear();
        assert_eq!(rule.validate(), Err(RuleViolation::NoColumns));
    }

    #[test]
    fn validate_rejects_duplicate_column_names() {
        let mut rule = minimal_rule();
        rule.columns
            .push(text_column("A", ColumnSpec::Position { index: 1 }));
        assert_eq!(
            rule.validate(),
            Err(RuleViolation::DuplicateColumn("A".to_string()))
        );
    }

    #[test]
    fn validate_rejects_unknown_forward_fill() {
        let mut rule = minimal_rule();
        rule.forward_fill.push("Missing".to_string());
        assert_eq!(
            rule.validate(),
            Err(RuleViolation::UnknownForwardFill("Missing".to_string()))
        );
    }

    #[test]
    fn validate_requires_anchor_for_anchor_specs() {
        let mut rule = minimal_rule();
        rule.columns
            .push(text_column("B", ColumnSpec::Anchor { offset: 0 }));
        assert_eq!(
            rule.validate(),
            Err(RuleViolation::MissingAnchor("B".to_string()))
        );

        rule.locate.anchor = vec![r"\d+".to_string()];
        rule.validate().expect("anchor present");
    }

    #[test]
    fn comparison_outcome_checks_header_and_row_count() {
        let expected = SheetSummary {
            headers: vec!["A".to_string(), "B".to_string()],
            row_count: 3,
        };
        let same = ComparisonOutcome::compare("R", &expected.clone(), &expected);
        assert!(same.passed());

        let reordered = SheetSummary {
            headers: vec!["B".to_string(), "A".to_string()],
            row_count: 3,
        };
        let outcome = ComparisonOutcome::compare("R", &reordered, &expected);
        assert!(!outcome.columns_match);
        assert!(outcome.row_count_match);
        assert!(!outcome.passed());

        let short = SheetSummary {
            headers: expected.headers.clone(),
            row_count: 2,
        };
        let outcome = ComparisonOutcome::compare("R", &short, &expected);
        assert!(outcome.columns_match);
        assert!(!outcome.row_count_match);
        assert_eq!(outcome.actual_row_count, 2);
        assert_eq!(outcome.expected_row_count, 3);
    }
}
