//! Incremental, resumable store of [`EnrichmentRow`]s backed by a CSV file.
//!
//! The whole file is rewritten after every upsert. Writes go to a temporary
//! file in the same directory that is then renamed over the target, so a
//! crash leaves either the previous or the new content, never a torn file.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use brdomain_core::EnrichmentRow;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory view of the output file plus the path it is persisted to.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    rows: Vec<EnrichmentRow>,
}

impl CsvStore {
    /// Loads every row of the file at `path`. A missing file is an empty
    /// store; it is created by the first [`CsvStore::upsert`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be opened and
    /// [`StoreError::Csv`] if a row cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no existing store, starting empty");
                return Ok(Self {
                    path,
                    rows: Vec::new(),
                });
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let rows = csv::Reader::from_reader(file)
            .deserialize::<EnrichmentRow>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Csv {
                path: path.display().to_string(),
                source: e,
            })?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "loaded existing store");
        Ok(Self { path, rows })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn rows(&self) -> &[EnrichmentRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.rows.iter().any(|row| row.domain == domain)
    }

    /// Keys of every row currently in the store.
    #[must_use]
    pub fn domains(&self) -> HashSet<String> {
        self.rows.iter().map(|row| row.domain.clone()).collect()
    }

    /// Replaces any row with the same domain by `row` (appended last) and
    /// rewrites the file.
    ///
    /// The in-memory view is only updated once the file has been replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the temporary file cannot be written or
    /// cannot be moved over the target.
    pub fn upsert(&mut self, row: EnrichmentRow) -> Result<(), StoreError> {
        let mut next: Vec<EnrichmentRow> = self
            .rows
            .iter()
            .filter(|existing| existing.domain != row.domain)
            .cloned()
            .collect();
        next.push(row);

        write_atomically(&self.path, &next)?;
        self.rows = next;
        Ok(())
    }
}

fn write_atomically(path: &Path, rows: &[EnrichmentRow]) -> Result<(), StoreError> {
    let display = || path.display().to_string();
    let io_err = |source| StoreError::Io {
        path: display(),
        source,
    };
    let csv_err = |source| StoreError::Csv {
        path: display(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer
            .write_record(EnrichmentRow::COLUMNS)
            .map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(path).map_err(|e| StoreError::Persist {
        path: display(),
        source: e.error,
    })?;
    Ok(())
}
