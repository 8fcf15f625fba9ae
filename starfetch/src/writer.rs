//! Canonical `name,ra,dec` output with atomic file replacement
//!
//! The whole file is rendered into memory first, written to a temporary file
//! next to the destination and then renamed over it. A failed write leaves
//! whatever was at the destination before untouched.

use std::cmp::Ordering;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::catalog::{CanonicalRow, CatalogRecord};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Mode given to a newly created output file on Unix.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Permissions the replacement file should carry.
///
/// An existing regular file keeps its permissions. A new file gets
/// [`NEW_FILE_MODE`] instead of the owner-only mode of a temporary file.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        Ok(_) => None,
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Replace `path` with `bytes` in one step.
///
/// The temporary file lives in the destination directory so the final rename
/// never crosses filesystems. The permissions of a file already at `path`
/// carry over to its replacement.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Sorts records by magnitude and serializes them to the canonical schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogWriter;

impl CatalogWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render the sorted file contents.
    ///
    /// The sort is stable: stars sharing a magnitude keep their input order.
    /// `-0.0` and `0.0` count as the same magnitude.
    pub fn render(&self, mut records: Vec<CatalogRecord>) -> Result<Vec<u8>, WriteError> {
        records.sort_by(|a, b| {
            a.magnitude
                .partial_cmp(&b.magnitude)
                .unwrap_or(Ordering::Equal)
        });

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CanonicalRow::HEADER)?;
        for record in &records {
            writer.write_record(record.to_canonical().fields())?;
        }

        writer
            .into_inner()
            .map_err(|e| WriteError::Io(e.into_error()))
    }

    /// Sort, render and atomically write `records` to `destination`.
    ///
    /// Returns the number of data rows written.
    pub fn write(
        &self,
        records: Vec<CatalogRecord>,
        destination: &Path,
    ) -> Result<usize, WriteError> {
        let count = records.len();
        let contents = self.render(records)?;
        write_atomic(destination, &contents)?;
        info!("Wrote {} stars to {}", count, destination.display());
        Ok(count)
    }
}
