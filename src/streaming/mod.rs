//! Lazy record reading for large exports.
//!
//! The in-memory parser materializes the whole record sequence. For very
//! large exports, [`RecordStream`] yields records one at a time from any
//! [`BufRead`](std::io::BufRead) source while tracking progress.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::parser::ChatParser;
//! use chatlens::config::ParserConfig;
//!
//! # fn main() -> chatlens::Result<()> {
//! let parser = ChatParser::with_config(ParserConfig::streaming());
//!
//! for result in parser.stream("huge_chat.txt".as_ref())? {
//!     let record = result?;
//!     println!("{} {}: {}", record.timestamp, record.sender, record.body);
//! }
//! # Ok(())
//! # }
//! ```

mod reader;
mod traits;

pub use reader::RecordStream;
pub use traits::RecordIterator;
