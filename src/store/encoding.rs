//! Line encodings for the flat files.
//!
//! - [`LineEncoding::Positional`]: columns joined by a bare comma, no escaping.
//!   A comma inside a field corrupts the line; kept for files written by
//!   older versions of the shop.
//! - [`LineEncoding::Quoted`]: delimited records with quote-on-demand
//!   escaping. Fields without commas, quotes or line breaks are written
//!   unquoted, so for such data both encodings produce identical bytes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::{Record, arity_error};
use crate::core::{KatalogError, MalformedRecord, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEncoding {
    Positional,
    #[default]
    Quoted,
}

/// One decoded line: the record with its 1-based line number, or the reason
/// it was rejected.
pub(crate) type Decoded<T> = std::result::Result<(usize, T), MalformedRecord>;

impl LineEncoding {
    pub(crate) fn encode<T: Record>(self, path: &Path, records: &[T]) -> Result<Vec<u8>> {
        match self {
            Self::Positional => Ok(encode_positional(path, records)),
            Self::Quoted => encode_quoted(path, records),
        }
    }

    pub(crate) fn decode<T: Record>(self, path: &Path, bytes: &[u8]) -> Result<Vec<Decoded<T>>> {
        match self {
            Self::Positional => decode_positional(path, bytes),
            Self::Quoted => decode_quoted(path, bytes),
        }
    }
}

fn encode_positional<T: Record>(path: &Path, records: &[T]) -> Vec<u8> {
    let mut out = String::new();
    for record in records {
        let fields = record.to_fields();
        if fields.iter().any(|f| f.contains(',')) {
            tracing::warn!(
                path = %path.display(),
                id = record.id(),
                "{} contains a comma; the positional layout cannot represent it",
                T::ENTITY
            );
        }
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

fn decode_positional<T: Record>(path: &Path, bytes: &[u8]) -> Result<Vec<Decoded<T>>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        KatalogError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let decoded = if fields.len() == T::ARITY {
            T::from_fields(&fields)
        } else {
            Err(arity_error::<T>(fields.len()))
        };
        rows.push(decoded.map(|r| (idx + 1, r)).map_err(|e| MalformedRecord {
            line: idx + 1,
            reason: e.to_string(),
        }));
    }
    Ok(rows)
}

fn encode_quoted<T: Record>(path: &Path, records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for record in records {
        writer
            .write_record(record.to_fields())
            .map_err(|e| KatalogError::csv(path, e))?;
    }
    writer
        .into_inner()
        .map_err(|e| {
            let err = e.error();
            KatalogError::io(path, std::io::Error::new(err.kind(), err.to_string()))
        })
}

fn decode_quoted<T: Record>(path: &Path, bytes: &[u8]) -> Result<Vec<Decoded<T>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() || matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                return Err(KatalogError::csv(path, e));
            }
            Err(e) => {
                let line = e.position().map_or(idx + 1, |p| p.line() as usize);
                rows.push(Err(MalformedRecord {
                    line,
                    reason: e.to_string(),
                }));
                continue;
            }
        };
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(idx + 1, |p| p.line() as usize);
        let fields: Vec<&str> = record.iter().collect();
        let decoded = if fields.len() == T::ARITY {
            T::from_fields(&fields)
        } else {
            Err(arity_error::<T>(fields.len()))
        };
        rows.push(decoded.map(|r| (line, r)).map_err(|e| MalformedRecord {
            line,
            reason: e.to_string(),
        }));
    }
    Ok(rows)
}
