//! Mode dispatch and the single-export pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info_span;
use valeo_model::ComparisonOutcome;

use crate::cli::Cli;
use crate::golden::run_golden;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

/// The two mutually exclusive invocation modes.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Export {
        supplier: String,
        input: PathBuf,
        out: PathBuf,
    },
    Golden {
        goldens_dir: PathBuf,
    },
}

/// Resolve the invocation mode from the parsed flags. Both modes at once,
/// neither, or an incomplete export triple is an argument error.
pub fn dispatch(cli: &Cli) -> Result<Mode, CliError> {
    let export_flags =
        cli.supplier.is_some() || cli.input.is_some() || cli.out.is_some();
    match (&cli.golden, export_flags) {
        (Some(_), true) => Err(CliError::InvalidArguments(
            "--golden cannot be combined with --supplier/--input/--out".to_string(),
        )),
        (Some(dir), false) => Ok(Mode::Golden {
            goldens_dir: dir.clone(),
        }),
        (None, true) => {
            match (&cli.supplier, &cli.input, &cli.out) {
                (Some(supplier), Some(input), Some(out)) => Ok(Mode::Export {
                    supplier: supplier.clone(),
                    input: input.clone(),
                    out: out.clone(),
                }),
                _ => Err(CliError::InvalidArguments(
                    "single export needs all of --supplier, --input and --out".to_string(),
                )),
            }
        }
        (None, false) => Err(CliError::InvalidArguments(
            "specify either --supplier/--input/--out or --golden".to_string(),
        )),
    }
}

/// Result of a single export, for the final console line.
#[derive(Debug)]
pub struct ExportReport {
    pub supplier: String,
    pub rows: usize,
    pub out: PathBuf,
}

/// Single export path: load rule, extract, write the spreadsheet.
pub fn run_export(supplier: &str, input: &Path, out: &Path) -> Result<ExportReport> {
    let span = info_span!("export", supplier = supplier);
    let _guard = span.enter();
    let rule = valeo_rules::load_rule(supplier)?;
    let result = valeo_extract::extract(&rule, input)
        .with_context(|| format!("extract {}", input.display()))?;
    valeo_export::export(&result, &rule, out)
        .with_context(|| format!("write {}", out.display()))?;
    Ok(ExportReport {
        supplier: supplier.to_string(),
        rows: result.row_count(),
        out: out.to_path_buf(),
    })
}

/// Golden path: run every rule against the fixtures directory.
pub fn run_golden_mode(goldens_dir: &Path) -> Result<Vec<ComparisonOutcome>> {
    let span = info_span!("golden", dir = %goldens_dir.display());
    let _guard = span.enter();
    let outcomes = run_golden(goldens_dir)?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse args")
    }

    #[test]
    fn export_mode_needs_all_three_flags() {
        let cli = parse(&[
            "valeo-extractor",
            "--supplier",
            "VALEO_INVOICE",
            "--input",
            "in.pdf",
            "--out",
            "out.xlsx",
        ]);
        let mode = dispatch(&cli).expect("export mode");
        assert_eq!(
            mode,
            Mode::Export {
                supplier: "VALEO_INVOICE".to_string(),
                input: "in.pdf".into(),
                out: "out.xlsx".into(),
            }
        );

        let partial = parse(&["valeo-extractor", "--supplier", "VALEO_INVOICE"]);
        assert!(matches!(
            dispatch(&partial),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn golden_mode_takes_a_directory() {
        let cli = parse(&["valeo-extractor", "--golden", "goldens"]);
        let mode = dispatch(&cli).expect("golden mode");
        assert_eq!(
            mode,
            Mode::Golden {
                goldens_dir: "goldens".into()
            }
        );
    }

    #[test]
    fn both_modes_are_rejected() {
        let cli = parse(&[
            "valeo-extractor",
            "--golden",
            "goldens",
            "--supplier",
            "VALEO_INVOICE",
        ]);
        assert!(matches!(
            dispatch(&cli),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn neither_mode_is_rejected() {
        let cli = parse(&["valeo-extractor"]);
        assert!(matches!(
            dispatch(&cli),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn unknown_supplier_surfaces_rule_not_found() {
        let err = run_export(
            "UNKNOWN_RULE",
            Path::new("in.pdf"),
            Path::new("out.xlsx"),
        )
        .unwrap_err();
        let rule_err = err
            .downcast_ref::<valeo_rules::RuleError>()
            .expect("rule error");
        assert!(matches!(rule_err, valeo_rules::RuleError::NotFound { .. }));
    }
}
