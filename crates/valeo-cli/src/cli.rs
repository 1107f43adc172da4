//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "valeo-extractor",
    version,
    about = "Extract Valeo invoice and packing tables from PDF to XLSX",
    long_about = "Extract tabular data from Valeo supplier PDFs using the locked rule set.\n\n\
                  Two mutually exclusive modes:\n\
                  single export (--supplier, --input, --out) and golden comparison (--golden)."
)]
pub struct Cli {
    /// Rule to apply for a single export (VALEO_INVOICE or VALEO_PACKING).
    #[arg(long, value_name = "RULE_ID")]
    pub supplier: Option<String>,

    /// Source PDF for a single export.
    #[arg(long, value_name = "PDF")]
    pub input: Option<PathBuf>,

    /// Destination XLSX for a single export (overwritten if present).
    #[arg(long, value_name = "XLSX")]
    pub out: Option<PathBuf>,

    /// Run the golden comparison against this fixtures directory
    /// (expects <DIR>/input/*.pdf and <DIR>/expected/*.xlsx).
    #[arg(long, value_name = "DIR")]
    pub golden: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
