//! Creation log and best-effort rollback.
//!
//! The instantiator appends a [`CreationRecord`] after every successful
//! directory or file creation. Parents are always logged before their
//! children, so reading the log backwards is a valid deletion order.
//!
//! Rollback never fails. Each removal that does not succeed becomes a
//! [`RollbackWarning`], logged at `warn` level and handed back to the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::fs::Filesystem;

/// Kind of filesystem entry created during instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::File => f.write_str("file"),
        }
    }
}

/// One successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRecord {
    pub kind: EntryKind,
    /// Absolute destination path.
    pub path: PathBuf,
}

/// A rollback step that could not be completed.
#[derive(Error, Debug)]
#[error("could not remove {kind} {path}")]
pub struct RollbackWarning {
    pub kind: EntryKind,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Append-only log of what one instantiation run created.
#[derive(Debug, Default)]
pub struct CreationLog {
    records: Vec<CreationRecord>,
}

impl CreationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: EntryKind, path: impl Into<PathBuf>) {
        self.records.push(CreationRecord {
            kind,
            path: path.into(),
        });
    }

    pub fn records(&self) -> &[CreationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<CreationRecord> {
        self.records
    }

    /// Undo every logged creation, newest first.
    ///
    /// With `dry_run` nothing was written, so nothing is removed; the
    /// removals are still logged.
    pub fn rollback(self, fs: &dyn Filesystem, dry_run: bool) -> Vec<RollbackWarning> {
        let mut warnings = Vec::new();

        for record in self.records.into_iter().rev() {
            info!(kind = %record.kind, path = %record.path.display(), dry_run, "removing");
            if dry_run {
                continue;
            }
            if let Err(source) = remove(fs, record.kind, &record.path) {
                let warning = RollbackWarning {
                    kind: record.kind,
                    path: record.path,
                    source,
                };
                warn!(error = %warning.source, "{warning}");
                warnings.push(warning);
            }
        }

        warnings
    }
}

fn remove(fs: &dyn Filesystem, kind: EntryKind, path: &Path) -> std::io::Result<()> {
    match kind {
        EntryKind::File => fs.remove_file(path),
        EntryKind::Directory => fs.remove_dir(path),
    }
}
