//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options, convertible into
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DateOrder;

/// Default output path. The extension follows `--format` when unchanged.
pub const DEFAULT_OUTPUT: &str = "chat_records.csv";

/// Parse a WhatsApp chat export into typed records and analytics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens \"WhatsApp Chat with Alice.txt\"
    chatlens chat.zip -o records.json -f json --derived
    chatlens chat.txt --date-order day-first --after 2024-01-01
    chatlens chat.txt --from Alice --last-days 30 --stats
    RUST_LOG=chatlens=debug chatlens chat.txt")]
pub struct Args {
    /// Path to the exported .txt file or .zip archive
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// How to read ambiguous slash dates such as 03/04/2024
    /// (auto, month-first, day-first)
    #[arg(long, value_name = "ORDER", default_value = "auto")]
    pub date_order: DateOrder,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this sender only (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep only the last N days, counted back from the newest message
    #[arg(long, value_name = "N")]
    pub last_days: Option<u32>,

    /// Add date, hour, weekday, length and media columns to the output
    #[arg(long)]
    pub derived: bool,

    /// Print summary statistics and leaderboards
    #[arg(long)]
    pub stats: bool,

    /// Read the input line by line instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Swaps the default output's extension to match `format`.
pub fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != DEFAULT_OUTPUT {
        return output.to_string();
    }
    let lib_format: crate::format::OutputFormat = format.into();
    format!("chat_records.{}", lib_format.extension())
}

/// Maps `-v` occurrences to a tracing filter directive.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
