//! Record processing after parsing.
//!
//! This module contains:
//! - [`normalize`] - Derived fields and media placeholder detection
//! - [`stats`] - Analytics reducers and [`ChatSummary`](stats::ChatSummary)
//! - [`filter`] - Record filtering by date and sender
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatlens::core::{
//!     NormalizedRecord, OutputConfig, FilterConfig,
//!     normalize, apply_filters,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod normalize;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, Timestamped, apply_filters};
pub use models::OutputConfig;
pub use normalize::{NormalizedRecord, normalize};
pub use stats::ChatSummary;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
