//! Output formatting and persistence for forecasts, history and snapshots.
//!
//! Supports JSON printing, JSON snapshot files, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Prints a value to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, replacing the file.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {path}"))?;
    debug!(path, "JSON written");
    Ok(())
}

/// Appends every record to a CSV file and returns the number of rows written.
///
/// Headers are written only when the file is new.
pub fn append_records<T: Serialize>(path: &str, records: &[T]) -> Result<usize> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening {path}"))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}
