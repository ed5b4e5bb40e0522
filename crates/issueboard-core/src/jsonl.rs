//! JSONL file I/O.
//!
//! One JSON document per line. Used for the `issues` collection and for
//! identity provider accounts.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{BoardError, Result};

/// Load every record from a JSONL file.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Io` if it cannot be
/// read, or `JsonlParse` if any line is invalid.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BoardError::FileNotFound(path.to_path_buf())
        } else {
            BoardError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record = serde_json::from_str(trimmed).map_err(|e| BoardError::JsonlParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded jsonl");
    Ok(records)
}

/// Like [`load`], but a missing file reads as empty.
///
/// # Errors
///
/// Returns `Io` or `JsonlParse` as [`load`] does.
pub fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match load(path) {
        Err(BoardError::FileNotFound(_)) => Ok(Vec::new()),
        other => other,
    }
}

/// Save records to a JSONL file with atomic write.
///
/// Writes to a temp file next to `path` and renames it into place.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Json` if a record
/// cannot be serialized.
pub fn save<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let tmp_path = path.with_extension("jsonl.tmp");
    let mut file = fs::File::create(&tmp_path)?;

    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(file, "{json}")?;
    }

    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "saved jsonl");

    Ok(())
}
