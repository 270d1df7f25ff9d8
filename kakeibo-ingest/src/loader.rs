//! Read a per-year CSV export into an untyped [`Table`].
//!
//! Exports from Japanese household-account-book services are usually
//! Shift_JIS; re-saved or pre-translated files are UTF-8, sometimes with a
//! BOM. Both decode to the same table.

use encoding_rs::SHIFT_JIS;
use kakeibo_core::Table;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::types::LoadError;

/// Load one CSV export. Header and data cells are trimmed.
pub fn load(path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let table = parse_bytes(&bytes, path)?;
    debug!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        "loaded export"
    );
    Ok(table)
}

/// Parse in-memory CSV bytes. `origin` is only used in error messages.
pub fn parse_bytes(bytes: &[u8], origin: &Path) -> Result<Table, LoadError> {
    let text = decode_text(bytes).ok_or_else(|| LoadError::Malformed {
        path: origin.to_path_buf(),
        reason: "not UTF-8 or Shift_JIS text".to_string(),
    })?;

    let malformed = |reason: String| LoadError::Malformed {
        path: origin.to_path_buf(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| malformed(e.to_string()))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(malformed("missing header row".to_string()));
    }

    let mut table = Table::new(headers.iter());
    for (i, record) in rdr.records().enumerate() {
        // Line 1 is the header
        let record = record.map_err(|e| malformed(format!("line {}: {}", i + 2, e)))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        table.push_row(record.iter());
    }

    Ok(table)
}

/// Strip a UTF-8 BOM, accept valid UTF-8, otherwise fall back to Shift_JIS.
fn decode_text(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    if let Ok(s) = std::str::from_utf8(bytes) {
        return Some(s.to_string());
    }

    let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return None;
    }
    debug!("decoded export as Shift_JIS");
    Some(decoded.into_owned())
}
