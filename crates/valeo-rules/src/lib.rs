#![deny(unsafe_code)]

//! The locked rule store.
//!
//! Exactly two rule documents exist, one per Valeo document type. They are
//! embedded at compile time and never read from the filesystem, so the rule
//! set shipped with a given binary is fixed.

pub mod error;

use regex::Regex;
use valeo_model::{ColumnSpec, Rule};

pub use crate::error::RuleError;

const VALEO_INVOICE: &str = include_str!("../rules/valeo_invoice.toml");
const VALEO_PACKING: &str = include_str!("../rules/valeo_packing.toml");

/// Identifiers of all known rules, in golden-run order.
#[must_use]
pub fn rule_ids() -> [&'static str; 2] {
    ["VALEO_INVOICE", "VALEO_PACKING"]
}

/// Load and validate a rule document by identifier.
///
/// # Errors
///
/// `RuleError::NotFound` for an unknown identifier; `RuleError::Malformed`
/// when the document fails to parse, breaks a structural invariant, or
/// contains an invalid regular expression.
pub fn load_rule(rule_id: &str) -> Result<Rule, RuleError> {
    let document = match rule_id {
        "VALEO_INVOICE" => VALEO_INVOICE,
        "VALEO_PACKING" => VALEO_PACKING,
        _ => {
            return Err(RuleError::NotFound {
                rule_id: rule_id.to_string(),
            });
        }
    };
    parse_rule(rule_id, document)
}

fn parse_rule(rule_id: &str, document: &str) -> Result<Rule, RuleError> {
    let rule: Rule =
        toml::from_str(document).map_err(|err| RuleError::malformed(rule_id, err.to_string()))?;
    if rule.supplier_id != rule_id {
        return Err(RuleError::malformed(
            rule_id,
            format!("supplier_id '{}' does not match", rule.supplier_id),
        ));
    }
    rule.validate()
        .map_err(|violation| RuleError::malformed(rule_id, violation.to_string()))?;
    check_patterns(rule_id, &rule)?;
    Ok(rule)
}

/// Compile every regex in the rule once, so pattern errors surface at load
/// time instead of mid-extraction.
fn check_patterns(rule_id: &str, rule: &Rule) -> Result<(), RuleError> {
    for pattern in &rule.locate.anchor {
        check_pattern(rule_id, "locate.anchor", pattern)?;
    }
    for column in &rule.columns {
        match &column.spec {
            ColumnSpec::Pattern { pattern, .. } | ColumnSpec::Carry { pattern } => {
                check_pattern(rule_id, &column.name, pattern)?;
            }
            ColumnSpec::Position { .. } | ColumnSpec::Anchor { .. } => {}
        }
    }
    Ok(())
}

fn check_pattern(rule_id: &str, context: &str, pattern: &str) -> Result<(), RuleError> {
    Regex::new(pattern).map_err(|err| {
        RuleError::malformed(rule_id, format!("invalid pattern in {context}: {err}"))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use valeo_model::{ColumnSpec, DataType};

    use super::*;

    #[test]
    fn unknown_rule_is_not_found() {
        let err = load_rule("UNKNOWN_RULE").unwrap_err();
        assert!(matches!(err, RuleError::NotFound { rule_id } if rule_id == "UNKNOWN_RULE"));
    }

    #[test]
    fn invoice_rule_loads_with_locked_columns() {
        let rule = load_rule("VALEO_INVOICE").expect("load invoice rule");
        assert_eq!(
            rule.column_names(),
            vec![
                "Supplier_ID",
                "Qty",
                "Net Price",
                "Tot. Net Value",
                "InvoiceNo"
            ]
        );
        assert!(rule.forward_fill.is_empty());
        assert_eq!(rule.locate.min_tokens, 7);
        assert_eq!(rule.locate.tail_numeric, 2);
        assert_eq!(rule.locate.anchor.len(), 3);
        assert_eq!(rule.columns[1].dtype, DataType::Integer);
        assert!(rule.columns[0].required);
        assert!(matches!(
            &rule.columns[4].spec,
            ColumnSpec::Carry { pattern } if pattern.contains("695")
        ));
    }

    #[test]
    fn packing_rule_loads_with_forward_fill() {
        let rule = load_rule("VALEO_PACKING").expect("load packing rule");
        assert_eq!(
            rule.column_names(),
            vec!["Parcel N°", "VALEO Material N°", "Quantity"]
        );
        assert_eq!(rule.forward_fill, vec!["Parcel N°"]);
        assert_eq!(rule.columns[2].dtype, DataType::Integer);
    }

    #[test]
    fn malformed_document_is_reported() {
        let err = parse_rule("VALEO_INVOICE", "supplier_id = 3").unwrap_err();
        assert!(matches!(err, RuleError::Malformed { .. }));
    }

    #[test]
    fn duplicate_column_is_malformed() {
        let doc = r#"
            supplier_id = "VALEO_INVOICE"
            [locate]
            [[columns]]
            name = "A"
            spec = { kind = "position", index = 0 }
            [[columns]]
            name = "A"
            spec = { kind = "position", index = 1 }
        "#;
        let err = parse_rule("VALEO_INVOICE", doc).unwrap_err();
        assert!(matches!(err, RuleError::Malformed { message, .. } if message.contains("duplicate")));
    }

    #[test]
    fn bad_regex_is_malformed() {
        let doc = r#"
            supplier_id = "VALEO_INVOICE"
            [locate]
            [[columns]]
            name = "A"
            spec = { kind = "pattern", pattern = "[unclosed" }
        "#;
        let err = parse_rule("VALEO_INVOICE", doc).unwrap_err();
        assert!(matches!(err, RuleError::Malformed { message, .. } if message.contains("pattern")));
    }
}
