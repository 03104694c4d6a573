//! JSON Lines (JSONL) output writer.
//!
//! One record per line, which suits line-oriented tooling such as `jq`,
//! log shippers and batch loaders.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_writer::JsonRecord;
use crate::core::models::OutputConfig;
use crate::core::normalize::NormalizedRecord;
use crate::error::Result;

/// Writes records to a JSON Lines file.
///
/// # Format
/// ```text
/// {"timestamp":"2024-03-04T20:15:00","sender":"Alice","body":"Hello"}
/// {"timestamp":"2024-03-04T20:16:00","sender":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(
    records: &[NormalizedRecord],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, &JsonRecord::from_record(record, config))?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSON Lines string. Every line, including the
/// last, ends with `\n`.
pub fn to_jsonl(records: &[NormalizedRecord], config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for record in records {
        let line = serde_json::to_string(&JsonRecord::from_record(record, config))?;
        output.push_str(&line);
        output.push('\n');
    }

    Ok(output)
}
