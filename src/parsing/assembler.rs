//! Line-by-line record assembly.
//!
//! [`RecordAssembler`] is the state machine shared by the in-memory parser
//! and the streaming reader. Feed it lines one at a time; it hands back a
//! finished [`MessageRecord`] whenever a new header line closes the previous
//! one, and the last record on [`finish`](RecordAssembler::finish).

use chrono::NaiveDateTime;
use tracing::trace;

use crate::MessageRecord;
use crate::config::DateOrder;
use crate::error::LineError;

use super::header::parse_header;

/// Invisible marks some exports put at the start of lines.
const LEADING_MARKS: &[char] = &['\u{feff}', '\u{200e}', '\u{200f}'];

/// Strips whitespace and invisible direction marks from both ends.
pub fn clean_line(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(LEADING_MARKS)
        .trim_end_matches(LEADING_MARKS)
        .trim()
}

#[derive(Debug)]
struct PendingRecord {
    timestamp: NaiveDateTime,
    sender: String,
    body: String,
}

impl PendingRecord {
    fn into_record(self) -> Option<MessageRecord> {
        let record = MessageRecord::new(self.timestamp, self.sender, self.body);
        if record.is_valid() {
            Some(record)
        } else {
            trace!(timestamp = %record.timestamp, "discarding record with empty sender or body");
            None
        }
    }
}

/// Incremental header/continuation state machine.
#[derive(Debug)]
pub struct RecordAssembler {
    date_order: DateOrder,
    pending: Option<PendingRecord>,
    line_no: usize,
    headers: usize,
    continuations: usize,
    dropped: usize,
}

impl RecordAssembler {
    pub fn new(date_order: DateOrder) -> Self {
        Self {
            date_order,
            pending: None,
            line_no: 0,
            headers: 0,
            continuations: 0,
            dropped: 0,
        }
    }

    /// Feeds one raw line (with or without its line terminator).
    ///
    /// Returns the previous record if this line starts a new one.
    pub fn push_line(&mut self, raw: &str) -> Option<MessageRecord> {
        self.line_no += 1;
        let line = clean_line(raw);
        if line.is_empty() {
            return None;
        }

        match parse_header(line, self.date_order) {
            Ok(header) => {
                self.headers += 1;
                let next = PendingRecord {
                    timestamp: header.timestamp,
                    sender: header.sender.to_string(),
                    body: header.message.to_string(),
                };
                self.pending
                    .replace(next)
                    .and_then(PendingRecord::into_record)
            }
            Err(reason) => {
                self.attach(line, reason);
                None
            }
        }
    }

    fn attach(&mut self, line: &str, reason: LineError) {
        if let Some(pending) = self.pending.as_mut() {
            self.continuations += 1;
            trace!(line = self.line_no, %reason, "continuation line");
            pending.body.push('\n');
            pending.body.push_str(line);
        } else {
            self.dropped += 1;
            trace!(line = self.line_no, reason = %LineError::MalformedLine, "dropping line before first message");
        }
    }

    /// Flushes the last pending record.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        self.pending.take().and_then(PendingRecord::into_record)
    }

    /// Number of lines fed so far.
    pub fn lines_seen(&self) -> usize {
        self.line_no
    }

    /// Number of header lines recognized so far.
    pub fn headers_seen(&self) -> usize {
        self.headers
    }

    /// Number of lines appended to a previous message.
    pub fn continuations_seen(&self) -> usize {
        self.continuations
    }

    /// Number of lines dropped because no message preceded them.
    pub fn dropped_lines(&self) -> usize {
        self.dropped
    }
}

/// Lazy record iterator over an in-memory string.
///
/// ```
/// use chatlens::config::DateOrder;
/// use chatlens::parsing::RecordIter;
///
/// let text = "1/2/24, 09:00 - Alice: Hi\n1/2/24, 09:01 - Bob: Hey";
/// let senders: Vec<_> = RecordIter::new(text, DateOrder::Auto)
///     .map(|r| r.sender)
///     .collect();
/// assert_eq!(senders, ["Alice", "Bob"]);
/// ```
pub struct RecordIter<'a> {
    lines: std::str::Lines<'a>,
    assembler: RecordAssembler,
    done: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(content: &'a str, date_order: DateOrder) -> Self {
        Self {
            lines: content.lines(),
            assembler: RecordAssembler::new(date_order),
            done: false,
        }
    }

    /// The underlying assembler, for line statistics.
    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }
}

impl Iterator for RecordIter<'_> {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(record) = self.assembler.push_line(line) {
                return Some(record);
            }
        }

        self.done = true;
        self.assembler.finish()
    }
}
