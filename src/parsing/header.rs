//! Header line recognition.
//!
//! A header line starts a new message. WhatsApp has printed several
//! layouts over the years and across locales; each one is a
//! [`HeaderPattern`] variant. Patterns are tried in [`HeaderPattern::ALL`]
//! order and the first one whose date and time both parse wins.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::DateOrder;
use crate::error::LineError;

use super::datetime::{parse_date, parse_time};

/// One of the supported header line layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPattern {
    /// `29/07/2025, 20:30 - Alice: Message`
    DashComma,
    /// `[29/07/2025, 20:30:15] Alice: Message`
    ///
    /// Also accepts dotted dates, as printed by iOS in some locales:
    /// `[15.01.24, 10:30:45] Alice: Message`
    Bracketed,
    /// `29/07/2025 20:30 - Alice: Message`
    DashNoComma,
    /// `2025-07-29 20:30 - Alice: Message`
    Iso,
    /// `29.07.2025 20:30 - Alice: Message` (comma after the date optional)
    Dotted,
}

impl HeaderPattern {
    /// Every pattern, in matching priority order.
    pub const ALL: [HeaderPattern; 5] = [
        HeaderPattern::DashComma,
        HeaderPattern::Bracketed,
        HeaderPattern::DashNoComma,
        HeaderPattern::Iso,
        HeaderPattern::Dotted,
    ];

    /// Returns the regex for this layout.
    ///
    /// Every pattern captures, in order: date, time, sender, message.
    /// The sender stops at the first colon after the timestamp prefix.
    pub fn pattern(self) -> &'static str {
        match self {
            HeaderPattern::DashComma => {
                r"^(\d{1,2}/\d{1,2}/\d{2}(?:\d{2})?),\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?i:[AP]M))?)\s*-\s*([^:]+):\s*(.+)"
            }
            HeaderPattern::Bracketed => {
                r"^\[(\d{1,2}[/.]\d{1,2}[/.]\d{2}(?:\d{2})?),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?i:[AP]M))?)\]\s*([^:]+):\s*(.+)"
            }
            HeaderPattern::DashNoComma => {
                r"^(\d{1,2}/\d{1,2}/\d{2}(?:\d{2})?)\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?i:[AP]M))?)\s*-\s*([^:]+):\s*(.+)"
            }
            HeaderPattern::Iso => {
                r"^(\d{4}-\d{1,2}-\d{1,2}),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?i:[AP]M))?)\s*-\s*([^:]+):\s*(.+)"
            }
            HeaderPattern::Dotted => {
                r"^(\d{1,2}\.\d{1,2}\.\d{2}(?:\d{2})?),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?i:[AP]M))?)\s*-\s*([^:]+):\s*(.+)"
            }
        }
    }

    /// Short human-readable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            HeaderPattern::DashComma => "dash-comma",
            HeaderPattern::Bracketed => "bracketed",
            HeaderPattern::DashNoComma => "dash-no-comma",
            HeaderPattern::Iso => "iso",
            HeaderPattern::Dotted => "dotted",
        }
    }
}

impl std::fmt::Display for HeaderPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four raw fields captured from a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    pub pattern: HeaderPattern,
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub message: &'a str,
}

/// A header line whose date and time parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    pub pattern: HeaderPattern,
    pub timestamp: NaiveDateTime,
    pub sender: &'a str,
    pub message: &'a str,
}

struct HeaderMatcher {
    pattern: HeaderPattern,
    regex: Regex,
}

impl HeaderMatcher {
    fn new(pattern: HeaderPattern) -> Self {
        Self {
            pattern,
            regex: Regex::new(pattern.pattern()).expect("header pattern must compile"),
        }
    }

    fn captures<'a>(&self, line: &'a str) -> Option<HeaderFields<'a>> {
        let caps = self.regex.captures(line)?;
        Some(HeaderFields {
            pattern: self.pattern,
            date: caps.get(1).map_or("", |m| m.as_str()),
            time: caps.get(2).map_or("", |m| m.as_str()),
            sender: caps.get(3).map_or("", |m| m.as_str()),
            message: caps.get(4).map_or("", |m| m.as_str()),
        })
    }
}

static MATCHERS: LazyLock<Vec<HeaderMatcher>> = LazyLock::new(|| {
    HeaderPattern::ALL
        .iter()
        .map(|&p| HeaderMatcher::new(p))
        .collect()
});

/// Returns every structural match for `line`, in priority order.
///
/// No date or time validation happens here.
pub fn header_candidates(line: &str) -> impl Iterator<Item = HeaderFields<'_>> {
    MATCHERS.iter().filter_map(move |m| m.captures(line))
}

/// Classifies a trimmed line as a header.
///
/// Returns the first candidate whose date and time both parse. When no
/// pattern matches at all the error is [`LineError::MalformedLine`];
/// otherwise it is the failure from the last candidate tried.
pub fn parse_header(line: &str, order: DateOrder) -> Result<ParsedHeader<'_>, LineError> {
    let mut last_err = LineError::MalformedLine;

    for fields in header_candidates(line) {
        let date = match parse_date(fields.date, order) {
            Ok(date) => date,
            Err(e) => {
                last_err = e;
                continue;
            }
        };
        let time = match parse_time(fields.time) {
            Ok(time) => time,
            Err(e) => {
                last_err = e;
                continue;
            }
        };

        return Ok(ParsedHeader {
            pattern: fields.pattern,
            timestamp: date.and_time(time),
            sender: fields.sender,
            message: fields.message,
        });
    }

    Err(last_err)
}
