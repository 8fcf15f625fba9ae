//! Loading a canonical `name,ra,dec` catalog back from disk.

use std::path::Path;

use thiserror::Error;

use crate::catalog::CanonicalRow;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected header {found:?}, expected name,ra,dec")]
    Header { found: Vec<String> },

    #[error("Line {line}: invalid {field} value {value:?}")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// One star as stored in the canonical catalog (degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
}

/// Read a canonical catalog, keeping file order.
///
/// The file is produced by this crate, so unlike extraction any malformed
/// row is an error rather than something to skip.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let header = reader.headers()?;
    if header.iter().ne(CanonicalRow::HEADER) {
        return Err(ReadError::Header {
            found: header.iter().map(str::to_string).collect(),
        });
    }

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let number = |index: usize, field: &'static str| {
            let value = record.get(index).unwrap_or_default();
            value.parse::<f64>().map_err(|_| ReadError::InvalidValue {
                line,
                field,
                value: value.to_string(),
            })
        };

        entries.push(CatalogEntry {
            name: record.get(0).unwrap_or_default().to_string(),
            ra_deg: number(1, "ra")?,
            dec_deg: number(2, "dec")?,
        });
    }

    Ok(entries)
}
