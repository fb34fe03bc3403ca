//! CLI argument definitions for the Barakatna form tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "barakatna-forms",
    version,
    about = "Barakatna Form Engine - Check and validate declarative form definitions",
    long_about = "Work with Barakatna platform form definitions.\n\n\
                  Checks metadata integrity (section and field references, rule\n\
                  conditions, pattern regexes) and validates value files against a\n\
                  form's rules the same way the dashboard does on submit."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

#[derive(Subcommand)]
pub enum Command {
    /// Check a form definition for metadata integrity problems.
    Check(CheckArgs),

    /// Validate a values file against a form definition.
    Validate(ValidateArgs),

    /// List a form's fields.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the form definition JSON file.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the form definition JSON file.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Path to the values JSON file (flat map of field name to value).
    #[arg(long = "values", value_name = "VALUES")]
    pub values: PathBuf,

    /// Write a JSON validation report into this directory.
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Path to the form definition JSON file.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
