//! Zipped export support.
//!
//! "Export chat → Attach media" produces a `.zip` holding the chat text
//! next to the media files. Only the first `.txt` member is read.

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ChatlensError, Result};

/// Returns `true` if an archive member name looks like the chat text.
///
/// macOS resource forks (`__MACOSX/`, `._name.txt`) are skipped.
pub fn is_text_member(name: &str) -> bool {
    if name.starts_with("__MACOSX/") {
        return false;
    }
    let base = name.rsplit('/').next().unwrap_or(name);
    !base.starts_with("._") && base.to_lowercase().ends_with(".txt")
}

/// Extracts and decodes the first `.txt` member of a zip archive.
///
/// # Errors
///
/// - [`ChatlensError::NoTextInArchive`] when no member qualifies
/// - [`ChatlensError::Archive`] when the bytes are not a readable zip
/// - [`ChatlensError::Utf8`] when the member is not UTF-8
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let members = archive.len();

    for index in 0..members {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();
        if file.is_dir() || !is_text_member(&name) {
            continue;
        }

        debug!(member = %name, size = file.size(), "reading chat text from archive");
        let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut buf)?;

        return String::from_utf8(buf)
            .map_err(|e| ChatlensError::utf8(format!("archive member '{name}'"), e.utf8_error()));
    }

    Err(ChatlensError::NoTextInArchive { members })
}
