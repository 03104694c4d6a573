//! Record normalization.
//!
//! [`normalize`] turns parsed records into [`NormalizedRecord`]s carrying
//! the derived fields analytics code keys off: calendar date, hour,
//! weekday name, body length, and the omitted-media placeholder, if any.
//!
//! Source order is preserved. Records are not sorted by time.
//!
//! # Example
//!
//! ```
//! use chatlens::core::normalize::normalize;
//! use chatlens::config::NormalizeConfig;
//! use chatlens::parser::ChatParser;
//!
//! let records = ChatParser::new()
//!     .parse_str("04/03/2024, 20:15 - Alice: <Media omitted>")?;
//! let normalized = normalize(records, &NormalizeConfig::default());
//!
//! assert_eq!(normalized[0].hour, 20);
//! assert_eq!(normalized[0].weekday, "Wednesday");
//! assert!(normalized[0].is_media());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::MessageRecord;
use crate::config::NormalizeConfig;

/// A record plus the fields derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub body: String,
    /// Calendar date of `timestamp`.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// English weekday name, e.g. `"Monday"`.
    pub weekday: String,
    /// Day of the month, 1-31.
    pub day_of_month: u32,
    /// Body length in Unicode scalar values.
    pub length: usize,
    /// Whitespace-separated word count of the body.
    pub word_count: usize,
    /// The placeholder token found in the body, if this is omitted media.
    pub media: Option<String>,
}

impl NormalizedRecord {
    /// Returns `true` if the body contains an omitted-media placeholder.
    pub fn is_media(&self) -> bool {
        self.media.is_some()
    }

    /// The weekday as a chrono value.
    pub fn weekday_value(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Drops the derived fields.
    pub fn into_record(self) -> MessageRecord {
        MessageRecord {
            timestamp: self.timestamp,
            sender: self.sender,
            body: self.body,
        }
    }
}

/// Full English name for a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Case-insensitive placeholder matcher, built once per normalize call.
pub struct MediaDetector {
    tokens: Vec<(String, String)>,
}

impl MediaDetector {
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            tokens: config
                .media_placeholders
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| (t.to_lowercase(), t.clone()))
                .collect(),
        }
    }

    /// Returns the first configured token found in `body`.
    pub fn detect(&self, body: &str) -> Option<&str> {
        let lower = body.to_lowercase();
        self.tokens
            .iter()
            .find(|(needle, _)| lower.contains(needle.as_str()))
            .map(|(_, original)| original.as_str())
    }
}

fn derive(record: MessageRecord, media: &MediaDetector) -> NormalizedRecord {
    let ts = record.timestamp;
    let found = media.detect(&record.body).map(str::to_string);

    NormalizedRecord {
        date: ts.date(),
        hour: ts.hour(),
        weekday: weekday_name(ts.weekday()).to_string(),
        day_of_month: ts.day(),
        length: record.body.chars().count(),
        word_count: record.body.split_whitespace().count(),
        media: found,
        timestamp: ts,
        sender: record.sender,
        body: record.body,
    }
}

/// Normalizes one record. Returns `None` if it has an empty sender or body.
pub fn normalize_record(record: MessageRecord, media: &MediaDetector) -> Option<NormalizedRecord> {
    record.is_valid().then(|| derive(record, media))
}

/// Normalizes a record sequence, dropping invalid records.
pub fn normalize<I>(records: I, config: &NormalizeConfig) -> Vec<NormalizedRecord>
where
    I: IntoIterator<Item = MessageRecord>,
{
    let media = MediaDetector::new(config);
    let mut dropped = 0usize;

    let normalized: Vec<NormalizedRecord> = records
        .into_iter()
        .filter_map(|record| {
            let out = normalize_record(record, &media);
            dropped += usize::from(out.is_none());
            out
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "dropped records with empty sender or body");
    }
    normalized
}
