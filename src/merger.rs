//! Combines CSV exports into a single table keyed by profile link.
//!
//! The first row seen for a key supplies its values; every later row with
//! the same key only adds its file name to `source_files`. Later rows that
//! disagree with the stored values are reported as conflicts instead of
//! being dropped silently.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::csv_writer::StagedCsv;
use crate::error::{CollectorError, Result};
use crate::models::UserProfile;

pub const SOURCE_FILES_COLUMN: &str = "source_files";
const SOURCE_FILES_SEPARATOR: &str = ", ";

/// A duplicate row whose value differed from the one already kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConflict {
    pub key: String,
    pub column: String,
    pub kept: String,
    pub discarded: String,
    pub file: String,
}

#[derive(Debug, Default)]
pub struct MergeReport {
    /// Written file, or `None` when there was nothing to merge.
    pub output: Option<PathBuf>,
    pub files: Vec<PathBuf>,
    pub rows: usize,
    pub conflicts: Vec<FieldConflict>,
}

#[derive(Debug)]
struct MergedRow {
    values: HashMap<String, String>,
    source_files: Vec<String>,
}

/// Rows accumulated across files, in first-seen key order.
#[derive(Debug, Default)]
struct MergedTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<MergedRow>,
    conflicts: Vec<FieldConflict>,
}

impl MergedTable {
    fn absorb_file(&mut self, path: &Path) -> Result<()> {
        let file_name = display_name(path);
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let key_index = headers
            .iter()
            .position(|h| h == UserProfile::KEY_COLUMN)
            .ok_or_else(|| CollectorError::MissingColumn {
                column: UserProfile::KEY_COLUMN.to_string(),
                file: path.display().to_string(),
            })?;

        for header in &headers {
            if header != SOURCE_FILES_COLUMN && !self.columns.contains(header) {
                self.columns.push(header.clone());
            }
        }

        let mut rows_read = 0usize;
        for record in reader.records() {
            let record = record?;
            rows_read += 1;
            let key = record.get(key_index).unwrap_or_default().to_string();

            match self.index.get(&key).copied() {
                Some(position) => {
                    let existing = &mut self.rows[position];
                    for (header, value) in headers.iter().zip(record.iter()) {
                        if header == UserProfile::KEY_COLUMN || header == SOURCE_FILES_COLUMN {
                            continue;
                        }
                        // A column the kept row never had reads as empty.
                        let kept = existing.values.get(header).map(String::as_str).unwrap_or("");
                        if kept != value {
                            warn!(
                                key = %key,
                                column = %header,
                                kept = %kept,
                                discarded = %value,
                                file = %file_name,
                                "Conflicting value for duplicate profile, keeping first"
                            );
                            self.conflicts.push(FieldConflict {
                                key: key.clone(),
                                column: header.clone(),
                                kept: kept.to_string(),
                                discarded: value.to_string(),
                                file: file_name.clone(),
                            });
                        }
                    }
                    existing.source_files.push(file_name.clone());
                }
                None => {
                    let values = headers
                        .iter()
                        .zip(record.iter())
                        .filter(|(header, _)| header.as_str() != SOURCE_FILES_COLUMN)
                        .map(|(header, value)| (header.clone(), value.to_string()))
                        .collect();
                    self.index.insert(key, self.rows.len());
                    self.rows.push(MergedRow {
                        values,
                        source_files: vec![file_name.clone()],
                    });
                }
            }
        }

        debug!(file = %path.display(), rows = rows_read, "Merged file");
        Ok(())
    }

    fn write(&self, output: &Path) -> Result<PathBuf> {
        let mut staged = StagedCsv::create(output)?;

        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        header.push(SOURCE_FILES_COLUMN);
        staged.rows().write_record(&header)?;

        for row in &self.rows {
            let mut fields: Vec<String> = self
                .columns
                .iter()
                .map(|column| row.values.get(column).cloned().unwrap_or_default())
                .collect();
            fields.push(row.source_files.join(SOURCE_FILES_SEPARATOR));
            staged.rows().write_record(&fields)?;
        }

        staged.commit()
    }
}

pub struct Merger {
    output: PathBuf,
}

impl Merger {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Merge every file matching `pattern` into the output file.
    pub fn merge(&self, pattern: &str) -> Result<MergeReport> {
        let files = self.matching_files(pattern)?;

        let mut table = MergedTable::default();
        for file in &files {
            table.absorb_file(file)?;
        }

        let mut report = MergeReport {
            output: None,
            rows: table.rows.len(),
            files,
            conflicts: Vec::new(),
        };

        if table.rows.is_empty() {
            info!(pattern, "No data to merge.");
            return Ok(report);
        }

        let written = table.write(&self.output)?;
        info!(
            output = %written.display(),
            files = report.files.len(),
            rows = report.rows,
            conflicts = table.conflicts.len(),
            "Combined data saved"
        );
        report.output = Some(written);
        report.conflicts = table.conflicts;
        Ok(report)
    }

    /// Files matching `pattern`, in glob order, excluding the output file.
    fn matching_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let output = fs::canonicalize(&self.output).ok();

        let mut files = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| CollectorError::IoError(e.into_error()))?;
            if !path.is_file() {
                continue;
            }
            if output.is_some() && fs::canonicalize(&path).ok() == output {
                debug!(file = %path.display(), "Skipping merge output file");
                continue;
            }
            files.push(path);
        }
        Ok(files)
    }
}

impl From<&MergeConfig> for Merger {
    fn from(config: &MergeConfig) -> Self {
        Merger::new(config.output.clone())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
