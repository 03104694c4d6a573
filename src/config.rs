//! Configuration types for parsing and normalization.
//!
//! These are plain structs with builder methods and no CLI framework
//! dependencies, so library users can construct them directly.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{DateOrder, ParserConfig};
//! use chatlens::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::DayFirst)
//!     .with_excerpt_chars(200);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How to read the two leading components of a slash-separated date.
///
/// Exports from different locales print `03/04/2024` meaning either
/// March 4 or April 3, and the text alone cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Try month-first; fall back to day-first when the month is out of range.
    ///
    /// `03/04/2024` is March 4, `25/12/2024` is December 25.
    #[default]
    Auto,

    /// Always `MM/DD/YYYY`.
    MonthFirst,

    /// Always `DD/MM/YYYY`.
    DayFirst,
}

impl DateOrder {
    /// Returns all accepted names.
    pub fn all_names() -> &'static [&'static str] {
        &["auto", "month-first", "mdy", "day-first", "dmy"]
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Auto => write!(f, "auto"),
            DateOrder::MonthFirst => write!(f, "month-first"),
            DateOrder::DayFirst => write!(f, "day-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DateOrder::Auto),
            "month-first" | "mdy" | "us" => Ok(DateOrder::MonthFirst),
            "day-first" | "dmy" | "eu" => Ok(DateOrder::DayFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: {}",
                s,
                DateOrder::all_names().join(", ")
            )),
        }
    }
}

/// Configuration for [`ChatParser`](crate::parser::ChatParser).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Slash-date interpretation (default: [`DateOrder::Auto`])
    pub date_order: DateOrder,

    /// How many characters of the raw input to keep as a diagnostic
    /// excerpt when nothing parses (default: 500)
    pub excerpt_chars: usize,

    /// Use the lazy streaming reader for file input (default: false)
    pub streaming: bool,

    /// Buffer size for streaming (default: 64KB)
    pub buffer_size: usize,

    /// Skip read errors while streaming instead of yielding them (default: false)
    pub skip_invalid: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::Auto,
            excerpt_chars: 500,
            streaming: false,
            buffer_size: 64 * 1024, // 64KB
            skip_invalid: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a streaming-optimized configuration.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            buffer_size: 256 * 1024, // 256KB for streaming
            ..Self::default()
        }
    }

    /// Sets the slash-date interpretation.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets the diagnostic excerpt length.
    #[must_use]
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Enables or disables streaming mode.
    #[must_use]
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled;
        self
    }

    /// Sets the buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether to skip read errors while streaming.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Placeholder tokens WhatsApp writes in place of attachments.
///
/// Android writes `<Media omitted>`; iOS writes `image omitted`,
/// `video omitted` and so on, or `<attached: …>` when media was included.
pub const DEFAULT_MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
    "<attached:",
];

/// Configuration for [`normalize`](crate::core::normalize::normalize).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Tokens that mark a body as an omitted-media placeholder.
    /// Matched case-insensitively as substrings.
    pub media_placeholders: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            media_placeholders: DEFAULT_MEDIA_PLACEHOLDERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl NormalizeConfig {
    /// Creates a new configuration with the default placeholder list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placeholder token (e.g. a localized `<Без медиафайлов>`).
    #[must_use]
    pub fn with_media_placeholder(mut self, token: impl Into<String>) -> Self {
        self.media_placeholders.push(token.into());
        self
    }

    /// Replaces the placeholder list.
    #[must_use]
    pub fn with_media_placeholders<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_placeholders = tokens.into_iter().map(Into::into).collect();
        self
    }
}
