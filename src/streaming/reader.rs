//! Streaming record reader over any [`BufRead`].
//!
//! Reads one line at a time and runs it through the same
//! [`RecordAssembler`] as the in-memory parser, so both produce identical
//! sequences. Memory use is bounded by the longest single message.

use std::io::{self, BufRead};

use tracing::{debug, warn};

use crate::MessageRecord;
use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::parsing::RecordAssembler;

use super::RecordIterator;

/// Lazy record iterator over a buffered reader.
pub struct RecordStream<R: BufRead> {
    reader: R,
    total_bytes: Option<u64>,
    bytes_read: u64,
    line_buffer: String,
    assembler: RecordAssembler,
    skip_invalid: bool,
    yielded: usize,
    finished: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Creates a stream. `total_bytes` enables percentage progress.
    pub fn new(reader: R, total_bytes: Option<u64>, config: &ParserConfig) -> Self {
        Self {
            reader,
            total_bytes,
            bytes_read: 0,
            line_buffer: String::with_capacity(4096),
            assembler: RecordAssembler::new(config.date_order),
            skip_invalid: config.skip_invalid,
            yielded: 0,
            finished: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<()>> {
        self.line_buffer.clear();
        let bytes = self.reader.read_line(&mut self.line_buffer)?;
        if bytes == 0 {
            return Ok(None);
        }
        self.bytes_read += bytes as u64;
        Ok(Some(()))
    }

    fn emit(&mut self, record: MessageRecord) -> Option<Result<MessageRecord>> {
        self.yielded += 1;
        Some(Ok(record))
    }
}

impl<R: BufRead + Send> RecordIterator for RecordStream<R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn records_yielded(&self) -> usize {
        self.yielded
    }
}

impl<R: BufRead + Send> Iterator for RecordStream<R> {
    type Item = Result<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(Some(())) => {
                    if let Some(record) = self.assembler.push_line(&self.line_buffer) {
                        return self.emit(record);
                    }
                }
                Ok(None) => {
                    self.finished = true;
                    debug!(
                        lines = self.assembler.lines_seen(),
                        headers = self.assembler.headers_seen(),
                        dropped = self.assembler.dropped_lines(),
                        "stream exhausted"
                    );
                    let record = self.assembler.finish()?;
                    return self.emit(record);
                }
                // read_line consumes the offending bytes, so skipping moves on
                Err(e) if self.skip_invalid && e.kind() == io::ErrorKind::InvalidData => {
                    warn!(after_bytes = self.bytes_read, "skipping undecodable line");
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(ChatlensError::from(e)));
                }
            }
        }
    }
}
