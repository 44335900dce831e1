//! JSON files on disk: scraped records in, records and geocoded records out.

use std::path::Path;

use serde::Serialize;

use ferias_core::FeriaRecord;

/// Reads a JSON array of ferias as written by `scrape`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid array of
/// records (including records with only one of `from`/`to`).
pub(crate) fn read_records(path: &Path) -> anyhow::Result<Vec<FeriaRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid ferias JSON in {}: {e}", path.display()))
}

/// Writes `value` as pretty-printed UTF-8 JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let mut body = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("failed to serialize {}: {e}", path.display()))?;
    body.push('\n');
    std::fs::write(path, body)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))
}
