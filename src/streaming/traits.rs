//! Progress-aware record iterator trait.

use crate::MessageRecord;
use crate::error::Result;

/// Iterator over records with progress tracking.
///
/// Extends [`Iterator`] with methods for monitoring how far through the
/// input the reader is, for progress bars and logging.
///
/// # Object Safety
///
/// This trait is object-safe, enabling dynamic dispatch via
/// `Box<dyn RecordIterator>`.
///
/// # Examples
///
/// ```no_run
/// use chatlens::parser::ChatParser;
///
/// # fn main() -> chatlens::Result<()> {
/// let parser = ChatParser::new();
/// let mut iter = parser.stream("WhatsApp Chat.txt".as_ref())?;
///
/// while let Some(result) = iter.next() {
///     let record = result?;
///     if let Some(pct) = iter.progress() {
///         eprintln!("\r{:.1}% {}", pct, record.sender);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait RecordIterator: Iterator<Item = Result<MessageRecord>> + Send {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if the total size is unknown.
    fn progress(&self) -> Option<f64> {
        let total = self.total_bytes()?;
        if total == 0 {
            return None;
        }
        Some((self.bytes_processed() as f64 / total as f64) * 100.0)
    }

    /// Returns the number of bytes consumed so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }

    /// Returns the number of records yielded so far.
    fn records_yielded(&self) -> usize;
}
