//! The message record produced by the parser.
//!
//! A [`MessageRecord`] is built once, from one header line plus any
//! continuation lines that follow it, and is not modified afterwards.
//!
//! # Example
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 3, 4)
//!     .unwrap()
//!     .and_hms_opt(20, 15, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, "  Alice ", " Hello ");
//!
//! assert_eq!(record.sender, "Alice");
//! assert_eq!(record.body, "Hello");
//! assert_eq!(record.hour(), 20);
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// One chat message recovered from an export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Date and time as printed in the export (no timezone) |
/// | `sender` | `String` | Display name, trimmed, never contains `:` |
/// | `body` | `String` | Message text, trimmed; continuation lines joined with `\n` |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent, in the exporting device's local time.
    pub timestamp: NaiveDateTime,

    /// Display name of the author as it appeared in the export.
    pub sender: String,

    /// Message text.
    ///
    /// May contain newlines for multi-line messages, and placeholder tokens
    /// such as `<Media omitted>` for attachments left out of the export.
    pub body: String,
}

impl MessageRecord {
    /// Creates a record, trimming sender and body.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl AsRef<str>,
        body: impl AsRef<str>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.as_ref().trim().to_string(),
            body: body.as_ref().trim().to_string(),
        }
    }

    /// Returns `true` if both sender and body are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.sender.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Body length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.body.chars().count()
    }
}
