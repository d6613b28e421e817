/*!
 * Persistence of accumulators to their output artifacts.
 */

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::dataset::{QaRecord, RawTable, Schema, write_records};
use crate::file_utils::FileManager;

use super::router::{Accumulators, RowAccumulator};

/// Row counts written by one flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub primary: usize,
    pub secondary: usize,
    pub errors: usize,
}

/// Writes the three accumulators to their files
#[derive(Debug, Clone)]
pub struct OutputSink {
    primary_path: PathBuf,
    secondary_path: PathBuf,
    errors_path: PathBuf,
}

impl OutputSink {
    pub fn new(
        primary_path: impl Into<PathBuf>,
        secondary_path: impl Into<PathBuf>,
        errors_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            primary_path: primary_path.into(),
            secondary_path: secondary_path.into(),
            errors_path: errors_path.into(),
        }
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary_path
    }

    pub fn secondary_path(&self) -> &Path {
        &self.secondary_path
    }

    pub fn errors_path(&self) -> &Path {
        &self.errors_path
    }

    /// Overwrite every artifact with the full content of its accumulator
    ///
    /// Flushing unchanged accumulators twice produces identical files.
    pub fn flush(&self, schema: &Schema, accumulators: &Accumulators) -> Result<FlushReport> {
        write_artifact(&self.primary_path, schema, accumulators.primary.rows())?;
        write_artifact(&self.secondary_path, schema, accumulators.secondary.rows())?;
        write_artifact(&self.errors_path, schema, accumulators.errors.rows())?;

        let report = FlushReport {
            primary: accumulators.primary.len(),
            secondary: accumulators.secondary.len(),
            errors: accumulators.errors.len(),
        };
        info!(
            "Saved progress: {}={}, {}={}, errors={}",
            accumulators.primary.language().unwrap_or("primary"),
            report.primary,
            accumulators.secondary.language().unwrap_or("secondary"),
            report.secondary,
            report.errors
        );

        Ok(report)
    }

    /// Accumulators seeded with the rows already present in the artifacts
    ///
    /// Existing rows are re-mapped onto `schema` so that the next flush
    /// rewrites them together with the new ones.
    pub fn load_existing(
        &self,
        schema: &Schema,
        primary_language: &str,
        secondary_language: &str,
    ) -> Accumulators {
        Accumulators {
            primary: RowAccumulator::translated(primary_language)
                .with_rows(read_artifact(&self.primary_path, schema)),
            secondary: RowAccumulator::translated(secondary_language)
                .with_rows(read_artifact(&self.secondary_path, schema)),
            errors: RowAccumulator::untranslated().with_rows(read_artifact(&self.errors_path, schema)),
        }
    }
}

fn write_artifact(path: &Path, schema: &Schema, rows: &[QaRecord]) -> Result<()> {
    FileManager::write_atomically(path, |writer| {
        write_records(writer, schema, rows).context("Failed to encode CSV")
    })
    .with_context(|| format!("Failed to save artifact {:?}", path))
}

fn read_artifact(path: &Path, schema: &Schema) -> Vec<QaRecord> {
    if !FileManager::is_non_empty_file(path) {
        return Vec::new();
    }

    match RawTable::read(path) {
        Ok(table) => {
            if table.skipped > 0 {
                info!("Skipped {} malformed rows in {:?}", table.skipped, path);
            }
            table.conform(schema)
        }
        Err(e) => {
            warn!("Ignoring unreadable artifact {:?}: {}", path, e);
            Vec::new()
        }
    }
}
