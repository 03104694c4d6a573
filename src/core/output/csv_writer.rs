//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::OutputConfig;
use crate::core::normalize::NormalizedRecord;
use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Body`, followed by `Date`, `Hour`,
///   `Weekday`, `Length`, `Media` when derived columns are enabled
/// - Encoding: UTF-8
pub fn write_csv(
    records: &[NormalizedRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(records, file, config)
}

/// Converts records to a CSV string. Same format as [`write_csv`].
pub fn to_csv(records: &[NormalizedRecord], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(records, &mut buf, config)?;
    // csv only ever writes the UTF-8 it was given
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_csv_to<W: Write>(
    records: &[NormalizedRecord],
    sink: W,
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_record(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Sender", "Body"];
    if config.include_derived {
        header.extend(["Date", "Hour", "Weekday", "Length", "Media"]);
    }
    header
}

/// Build CSV record for a single message.
fn build_record(record: &NormalizedRecord, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![
        record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        record.sender.clone(),
        record.body.clone(),
    ];

    if config.include_derived {
        row.push(record.date.to_string());
        row.push(record.hour.to_string());
        row.push(record.weekday.clone());
        row.push(record.length.to_string());
        row.push(record.media.clone().unwrap_or_default());
    }

    row
}
