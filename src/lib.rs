//! # chatlens
//!
//! Parse WhatsApp chat exports into typed message records.
//!
//! ## Overview
//!
//! A WhatsApp "Export chat" file is plain text: each message starts with a
//! header line carrying a date, a time and the sender, and multi-line
//! messages continue on the lines that follow. The header layout depends on
//! the phone's platform and locale. chatlens recognizes five layouts:
//!
//! | Layout | Example |
//! |--------|---------|
//! | Android, comma | `12/31/23, 11:59 PM - Alice: Happy new year` |
//! | iOS, bracketed | `[31.12.23, 23:59:10] Alice: Happy new year` |
//! | No comma | `12/31/2023 23:59 - Alice: Happy new year` |
//! | ISO date | `2023-12-31, 23:59 - Alice: Happy new year` |
//! | Dotted date | `31.12.2023, 23:59 - Alice: Happy new year` |
//!
//! Lines that do not start a message are attached to the previous one, and
//! dropped if no message precedes them. System notices such as "Messages
//! and calls are end-to-end encrypted" carry no sender, so they never start
//! a message of their own.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let text = "\
//! 12/31/23, 11:59 PM - Alice: Happy new year
//! see you all tomorrow
//! 1/1/24, 12:00 AM - Bob: 🎉";
//!
//! let records = ChatParser::new().parse_str(text)?;
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].body, "Happy new year\nsee you all tomorrow");
//!
//! let normalized = normalize(records, &NormalizeConfig::default());
//! let summary = ChatSummary::from_records(&normalized);
//! assert_eq!(summary.participants, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), the entry point
//! - [`parsing`] - Header patterns, date/time parsing, record assembly
//! - [`message`] - [`MessageRecord`]
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`DateOrder`](config::DateOrder)
//! - [`core`] - Normalization, analytics, filtering and output writers
//! - [`streaming`] - Lazy record iteration for large files
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and dispatch
//! - [`error`] - [`ChatlensError`], [`Result`]
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `archive` | Reading `.zip` exports |
//! | `csv-output` | CSV writer |
//! | `json-output` | JSON and JSONL writers |
//! | `streaming` | [`streaming`] module |
//! | `cli` | The `chatlens` binary |
//!
//! All of the above are on by default through `full`.

#[cfg(feature = "archive")]
pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::ChatParser;

    pub use crate::config::{DateOrder, NormalizeConfig, ParserConfig};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::normalize::{NormalizedRecord, normalize};
    pub use crate::core::stats::ChatSummary;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "streaming")]
    pub use crate::streaming::RecordIterator;
}
