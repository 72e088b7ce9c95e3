//! CSV output for collected records.
//!
//! Rows are staged in a hidden file next to the destination and renamed
//! over it on commit, so a failed run leaves the destination untouched.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use csv::Writer;
use serde::Serialize;
use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::error::Result;

/// CSV output that only appears at its destination on [`StagedCsv::commit`].
///
/// Dropping it uncommitted removes the staging file.
pub struct StagedCsv {
    rows: Writer<BufWriter<NamedTempFile>>,
    path: PathBuf,
}

impl StagedCsv {
    /// Stage a CSV file destined for `path`.
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::IoError` if the staging file cannot be
    /// created in the destination's directory.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let staged = staging_builder().tempfile_in(staging_dir(&path))?;

        Ok(Self {
            rows: Writer::from_writer(BufWriter::new(staged)),
            path,
        })
    }

    pub fn rows(&mut self) -> &mut Writer<BufWriter<NamedTempFile>> {
        &mut self.rows
    }

    /// Flush the staged rows and move them to the destination.
    ///
    /// A destination that already exists keeps its permissions; a new one
    /// gets the process default, as any freshly created file would.
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::IoError` if flushing, copying permissions
    /// or the final rename fails.
    pub fn commit(self) -> Result<PathBuf> {
        let mut rows = self.rows;
        rows.flush()?;
        let staged = rows
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))?
            .into_inner()
            .map_err(io::IntoInnerError::into_error)?;

        if let Ok(existing) = fs::metadata(&self.path) {
            fs::set_permissions(staged.path(), existing.permissions())?;
        }
        staged.persist(&self.path).map_err(|e| e.error)?;

        Ok(self.path)
    }
}

fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// tempfile defaults to 0600; ask for 0666 so the umask decides, like a plain create.
#[cfg(unix)]
fn staging_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn staging_builder() -> Builder<'static, 'static> {
    Builder::new()
}

/// Write `records` to `path` with a header taken from the first record.
///
/// An empty slice writes nothing and returns `Ok(None)`.
pub fn write_records<T: Serialize>(
    records: &[T],
    path: impl AsRef<Path>,
) -> Result<Option<PathBuf>> {
    let path = path.as_ref();
    if records.is_empty() {
        info!(path = %path.display(), "No data to save.");
        return Ok(None);
    }

    let mut staged = StagedCsv::create(path)?;
    for record in records {
        staged.rows().serialize(record)?;
    }
    let written = staged.commit()?;

    info!(path = %written.display(), rows = records.len(), "Saved CSV");
    Ok(Some(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uncommitted_output_leaves_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("abandoned.csv");

        {
            let mut staged = StagedCsv::create(&path).expect("Failed to stage");
            staged.rows().write_record(["a", "b"]).expect("Failed to write record");
        }

        assert!(!path.exists());
        let leftovers = fs::read_dir(temp_dir.path()).expect("Failed to read dir").count();
        assert_eq!(leftovers, 0, "staging file should be cleaned up");
    }

    #[test]
    fn test_commit_replaces_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "old contents\n").expect("Failed to seed file");

        let mut staged = StagedCsv::create(&path).expect("Failed to stage");
        staged.rows().write_record(["new"]).expect("Failed to write record");
        staged.commit().expect("Failed to commit");

        let contents = fs::read_to_string(&path).expect("Failed to read");
        assert_eq!(contents, "new\n");
    }

    #[test]
    fn test_bare_file_name_stages_in_current_dir() {
        assert_eq!(staging_dir(Path::new("combined_data.csv")), Path::new("."));
        assert_eq!(staging_dir(Path::new("out/x.csv")), Path::new("out"));
    }
}
