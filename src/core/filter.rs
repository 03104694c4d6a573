//! Filter records by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Records from specific user |
//! | Last days | [`with_last_days`](FilterConfig::with_last_days) | Records within N days of the latest one |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::parser::ChatParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let records = ChatParser::new().parse_str(
//!     "1/2/24, 09:00 - Alice: Old\n6/15/24, 10:00 - Alice: New\n6/16/24, 11:00 - Bob: Newer",
//! )?;
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("alice");
//!
//! let filtered = apply_filters(records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive
//! - Multiple filters are combined with AND logic
//! - `with_last_days` counts back from the newest record in the input,
//!   not from the wall clock; a window reaching past the earliest
//!   representable date keeps every record

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::normalize::NormalizedRecord;
use crate::MessageRecord;
use crate::error::ChatlensError;

/// Anything carrying a timestamp and a sender.
pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
    fn sender(&self) -> &str;
}

impl Timestamped for MessageRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn sender(&self) -> &str {
        &self.sender
    }
}

impl Timestamped for NormalizedRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn sender(&self) -> &str {
        &self.sender
    }
}

/// Configuration for filtering records by date and sender.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only records from this sender (case-insensitive).
    pub from: Option<String>,

    /// Include only records within this many days of the newest record.
    pub last_days: Option<u32>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_filter_date(date_str)?.and_time(NaiveTime::default()));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        // End of the day to include the full day
        let end = parse_filter_date(date_str)?
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| ChatlensError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the sender filter. Matching is case-insensitive.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Keeps only the last `days` days of the chat, counted back from the
    /// newest record's timestamp.
    #[must_use]
    pub fn with_last_days(mut self, days: u32) -> Self {
        self.last_days = Some(days);
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.last_days.is_some()
    }

    /// Returns `true` if sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.from.is_some()
    }

    fn matches(&self, record: &impl Timestamped, cutoff: Option<NaiveDateTime>) -> bool {
        if let Some(ref from) = self.from {
            if !sender_matches(record.sender(), from) {
                return false;
            }
        }

        let ts = record.timestamp();
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }
        if cutoff.is_some_and(|cutoff| ts < cutoff) {
            return false;
        }
        true
    }
}

fn sender_matches(sender: &str, wanted: &str) -> bool {
    sender.eq_ignore_ascii_case(wanted) || sender.to_lowercase() == wanted.to_lowercase()
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters records based on the provided configuration.
///
/// Returns only records that match all active filters, in their original
/// order. If no filters are active, the input is returned unchanged.
pub fn apply_filters<T: Timestamped>(records: Vec<T>, config: &FilterConfig) -> Vec<T> {
    if !config.is_active() {
        return records;
    }

    let cutoff = config.last_days.and_then(|days| {
        records
            .iter()
            .map(Timestamped::timestamp)
            .max()
            .and_then(|latest| {
                latest.checked_sub_signed(TimeDelta::try_days(i64::from(days))?)
            })
    });

    records
        .into_iter()
        .filter(|record| config.matches(record, cutoff))
        .collect()
}
