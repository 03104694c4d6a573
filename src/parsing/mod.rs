//! Line classification and record assembly.
//!
//! - [`header`] - the ordered set of header line layouts
//! - [`datetime`] - date and time field parsing
//! - [`assembler`] - the header/continuation state machine shared by the
//!   in-memory parser and the streaming reader

pub mod assembler;
pub mod datetime;
pub mod header;

pub use assembler::{RecordAssembler, RecordIter, clean_line};
pub use datetime::{expand_two_digit_year, parse_date, parse_time};
pub use header::{HeaderFields, HeaderPattern, ParsedHeader, header_candidates, parse_header};
