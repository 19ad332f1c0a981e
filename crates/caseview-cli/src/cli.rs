//! CLI argument definitions for the case viewer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "caseview",
    version,
    about = "Convert and browse multimodal evaluation results",
    long_about = "Convert raw evaluation exports so their image references point at a local\n\
                  data directory, then page through the records with hit filters and\n\
                  index search."
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

    /// Allow row-level values (questions, predictions) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite image references of every known dataset document.
    Convert(ConvertArgs),

    /// List the supported datasets and their document names.
    Profiles(ProfilesArgs),

    /// Print one page of a dataset's records.
    Show(ShowArgs),

    /// Page through a dataset interactively.
    Browse(BrowseArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// TOML file with input_dir, output_dir, base_data and model_prefix.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder holding the raw exports.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output folder (default: <INPUT_DIR>_for_check).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Image base directory (falls back to CASEVIEW_BASE_DATA).
    #[arg(long = "base-data", value_name = "DIR")]
    pub base_data: Option<String>,

    /// Model-name prefix of the export file names.
    #[arg(long = "model-prefix", value_name = "PREFIX")]
    pub model_prefix: Option<String>,

    /// Print the batch report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ProfilesArgs {
    /// Model-name prefix used to show document file names.
    #[arg(long = "model-prefix", value_name = "PREFIX")]
    pub model_prefix: Option<String>,
}

/// Where to find the document to view.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct DocumentSource {
    /// Document path.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Result folder searched by dataset keyword.
    #[arg(long = "folder", value_name = "DIR")]
    pub folder: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Dataset name (see `caseview profiles`).
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: String,

    #[command(flatten)]
    pub source: DocumentSource,

    /// 1-based page number.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: i64,

    /// Show only the record whose index equals this value.
    #[arg(long = "search", value_name = "INDEX")]
    pub search: Option<String>,

    /// Show only records with one of these hit values (repeatable).
    #[arg(long = "hit", value_name = "VALUE")]
    pub hit: Vec<String>,

    /// Print the page as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Dataset to open first.
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: String,

    #[command(flatten)]
    pub source: DocumentSource,
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
