//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter, requires the `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records, requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one object per line, requires `json-output`
//!
//! All writers take normalized records and an [`OutputConfig`]. Timestamps
//! are written without a timezone, since exports carry none.
//!
//! [`OutputConfig`]: crate::core::models::OutputConfig
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::config::NormalizeConfig;
//! use chatlens::core::models::OutputConfig;
//! use chatlens::core::normalize::normalize;
//! use chatlens::core::output::{to_csv, write_json};
//! use chatlens::parser::ChatParser;
//!
//! let records = ChatParser::new().parse("WhatsApp Chat.txt".as_ref())?;
//! let records = normalize(records, &NormalizeConfig::default());
//!
//! write_json(&records, "chat.json", &OutputConfig::new().with_derived())?;
//! let csv = to_csv(&records, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
