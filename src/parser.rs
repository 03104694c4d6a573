//! Chat export parser.
//!
//! [`ChatParser`] is the single entry point for turning an export into
//! [`MessageRecord`]s. It accepts a string, raw bytes, a file path, or a
//! zip archive, and can also hand back a lazy iterator.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let text = "\
//! 29/07/2025, 20:30 - Alice: Hello
//! how are you?
//! 29/07/2025, 20:31 - Bob: Fine!";
//!
//! let records = ChatParser::new().parse_str(text)?;
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].body, "Hello\nhow are you?");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! # Failure policy
//!
//! No single line can fail the parse. Lines that do not parse as headers
//! become continuation lines (or are dropped before the first message).
//! Only input-level problems are errors: unreadable files, undecodable
//! bytes, archives without a `.txt` member, and input that yields no
//! records at all ([`ChatlensError::EmptyResult`]).

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::MessageRecord;
use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::parsing::RecordIter;

#[cfg(feature = "streaming")]
use std::fs::File;
#[cfg(feature = "streaming")]
use std::io::{BufReader, Read};

#[cfg(feature = "streaming")]
use crate::streaming::{RecordIterator, RecordStream};

/// Parser for WhatsApp TXT exports.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns a lazy iterator over the records in `content`.
    ///
    /// Unlike [`parse_str`](Self::parse_str), an input with no records
    /// simply yields nothing.
    pub fn records<'a>(&self, content: &'a str) -> RecordIter<'a> {
        RecordIter::new(strip_bom(content), self.config.date_order)
    }

    /// Parses export text into records.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::EmptyResult`] if no records were found.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        let mut iter = self.records(content);
        let records: Vec<MessageRecord> = iter.by_ref().collect();

        let stats = iter.assembler();
        debug!(
            lines = stats.lines_seen(),
            headers = stats.headers_seen(),
            continuations = stats.continuations_seen(),
            dropped = stats.dropped_lines(),
            records = records.len(),
            "parsed export text"
        );

        if records.is_empty() {
            return Err(ChatlensError::empty_result(self.excerpt(content)));
        }
        Ok(records)
    }

    /// Decodes UTF-8 bytes and parses them.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<MessageRecord>> {
        let content = std::str::from_utf8(bytes).map_err(|e| ChatlensError::utf8("input", e))?;
        self.parse_str(content)
    }

    /// Extracts the chat text from a zip archive and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::NoTextInArchive`] if the archive holds no
    /// `.txt` member.
    #[cfg(feature = "archive")]
    pub fn parse_archive(&self, bytes: &[u8]) -> Result<Vec<MessageRecord>> {
        let content = crate::archive::extract_text(bytes)?;
        self.parse_str(&content)
    }

    /// Parses an export file.
    ///
    /// Paths ending in `.zip` are treated as archives. With
    /// [`ParserConfig::streaming`] set, plain text files are read through
    /// [`stream`](Self::stream) instead of being loaded whole.
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        info!(path = %path.display(), "parsing export");

        #[cfg(feature = "archive")]
        {
            if is_zip_path(path) {
                let bytes = fs::read(path)?;
                return self.parse_archive(&bytes);
            }
        }

        #[cfg(feature = "streaming")]
        {
            if self.config.streaming {
                let records = self.stream(path)?.collect::<Result<Vec<_>>>()?;
                if records.is_empty() {
                    return Err(ChatlensError::empty_result(self.file_excerpt(path)?));
                }
                return Ok(records);
            }
        }

        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Parses an export file (convenience method accepting &str path).
    pub fn parse_file(&self, path: &str) -> Result<Vec<MessageRecord>> {
        self.parse(Path::new(path))
    }

    /// Streams records from a file.
    ///
    /// Archives are extracted into memory first; plain text is read
    /// line by line with the configured buffer size.
    #[cfg(feature = "streaming")]
    pub fn stream(&self, path: &Path) -> Result<Box<dyn RecordIterator>> {
        #[cfg(feature = "archive")]
        {
            if is_zip_path(path) {
                let text = crate::archive::extract_text(&fs::read(path)?)?;
                let total = text.len() as u64;
                let reader = BufReader::new(std::io::Cursor::new(text.into_bytes()));
                return Ok(Box::new(RecordStream::new(reader, Some(total), &self.config)));
            }
        }

        let file = File::open(path)?;
        let total = file.metadata()?.len();
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        Ok(Box::new(RecordStream::new(reader, Some(total), &self.config)))
    }

    fn excerpt(&self, content: &str) -> String {
        content.chars().take(self.config.excerpt_chars).collect()
    }

    #[cfg(feature = "streaming")]
    fn file_excerpt(&self, path: &Path) -> Result<String> {
        // 4 bytes per char covers the widest UTF-8 sequence
        let limit = (self.config.excerpt_chars as u64).saturating_mul(4);
        let mut head = Vec::new();
        File::open(path)?.take(limit).read_to_end(&mut head)?;
        Ok(self.excerpt(&String::from_utf8_lossy(&head)))
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Returns `true` if the path has a `.zip` extension (any case).
pub fn is_zip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
