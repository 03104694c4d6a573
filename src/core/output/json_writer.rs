//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::core::models::OutputConfig;
use crate::core::normalize::NormalizedRecord;
use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Serialized shape of one record. Derived fields appear only when
/// enabled in [`OutputConfig`].
#[derive(Serialize)]
pub(crate) struct JsonRecord<'a> {
    timestamp: String,
    sender: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weekday: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<&'a str>,
}

impl<'a> JsonRecord<'a> {
    pub(crate) fn from_record(record: &'a NormalizedRecord, config: &OutputConfig) -> Self {
        let derived = config.include_derived;
        Self {
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            sender: &record.sender,
            body: &record.body,
            date: derived.then(|| record.date.to_string()),
            hour: derived.then_some(record.hour),
            weekday: derived.then_some(record.weekday.as_str()),
            length: derived.then_some(record.length),
            word_count: derived.then_some(record.word_count),
            media: if derived { record.media.as_deref() } else { None },
        }
    }
}

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-03-04T20:15:00", "sender": "Alice", "body": "Hello"},
///   {"timestamp": "2024-03-04T20:16:00", "sender": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(
    records: &[NormalizedRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
pub fn to_json(records: &[NormalizedRecord], config: &OutputConfig) -> Result<String> {
    let rows: Vec<JsonRecord<'_>> = records
        .iter()
        .map(|r| JsonRecord::from_record(r, config))
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}
