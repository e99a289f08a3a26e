//! CLI argument definitions for Pipeline Desk.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crm_model::{CollectionKind, RecordKind};

#[derive(Parser)]
#[command(
    name = "pipeline-desk",
    version,
    about = "Pipeline Desk - CRM tables and configuration lists in the terminal",
    long_about = "Browse the CRM record tables and reorderable configuration lists.\n\n\
                  All data is seeded in memory for the session; nothing is written back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Configuration file (default: platform config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a record table (leads, opportunities, contacts).
    Table(TableArgs),

    /// Show one configuration list.
    List(ListArgs),

    /// Show every configuration list with its entry count.
    Collections,

    /// Show the opportunity pipeline board.
    Board,

    /// Apply an interaction script to a fresh session.
    Replay(ReplayArgs),
}

#[derive(Parser)]
pub struct TableArgs {
    /// Table to show.
    #[arg(value_name = "TABLE")]
    pub table: RecordKind,

    /// Click a column header. Repeat to cycle ascending, descending, unsorted.
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Case-insensitive filter across all columns.
    #[arg(long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Page to show (1-based).
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default from config).
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Load the table from a CSV file instead of the built-in records.
    #[arg(long = "from", value_name = "CSV")]
    pub from: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Collection to show (e.g. lead-stages, lead-sources).
    #[arg(value_name = "COLLECTION")]
    pub collection: CollectionKind,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Script file, one command per line ("-" for stdin).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Only print the final state of touched collections and tables.
    #[arg(long = "quiet-steps")]
    pub quiet_steps: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
