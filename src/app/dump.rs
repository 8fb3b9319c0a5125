//! Sequential table dump
//!
//! Tables are fetched, validated and written one at a time in declared order.
//! The first failure aborts the run; files already written stay on disk and a
//! rerun overwrites them by name.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::app::tables::TableRequest;
use crate::app::validate::validate_table;
use crate::constants::files;
use crate::errors::{DumpError, DumpResult, FetchResult};

/// Anything that can produce the text of a table
#[async_trait]
pub trait TableSource {
    async fn fetch_table(&self, table: &TableRequest) -> FetchResult<String>;
}

/// Outcome of a completed dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Files written, in table order
    pub files: Vec<PathBuf>,
    /// Data rows validated across all tables
    pub total_rows: usize,
}

/// Per-table progress callback
pub trait DumpObserver {
    fn table_started(&mut self, _table: &TableRequest) {}
    fn table_written(&mut self, _table: &TableRequest, _path: &Path, _rows: usize) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl DumpObserver for NoopObserver {}

/// Writes a set of tables into an existing directory
#[derive(Debug, Clone)]
pub struct Dumper {
    output_dir: PathBuf,
    show: bool,
}

impl Dumper {
    pub fn new(output_dir: impl Into<PathBuf>, show: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            show,
        }
    }

    /// Run the dump without progress reporting
    pub async fn run<S>(&self, source: &S, tables: &[TableRequest]) -> DumpResult<DumpSummary>
    where
        S: TableSource + Sync + ?Sized,
    {
        self.run_with_observer(source, tables, &mut NoopObserver)
            .await
    }

    /// Run the dump, reporting each table to `observer`
    ///
    /// # Errors
    ///
    /// Returns `DumpError::OutputDirMissing` before any request if the output
    /// directory does not exist, otherwise the first fetch, parse or write
    /// failure.
    pub async fn run_with_observer<S, O>(
        &self,
        source: &S,
        tables: &[TableRequest],
        observer: &mut O,
    ) -> DumpResult<DumpSummary>
    where
        S: TableSource + Sync + ?Sized,
        O: DumpObserver + ?Sized,
    {
        if !self.output_dir.is_dir() {
            return Err(DumpError::OutputDirMissing {
                path: self.output_dir.clone(),
            });
        }

        let mut summary = DumpSummary::default();
        let stdout = io::stdout();

        for table in tables {
            observer.table_started(table);

            let text = source.fetch_table(table).await?;
            let rows = validate_table(&table.name, &text, self.show, &mut stdout.lock())?;

            let path = table_path(&self.output_dir, table);
            write_atomic(&path, &text).await?;
            info!("Wrote {} ({} rows)", path.display(), rows);

            observer.table_written(table, &path, rows);
            summary.total_rows += rows;
            summary.files.push(path);
        }

        debug!(
            "Dump complete: {} files, {} rows",
            summary.files.len(),
            summary.total_rows
        );
        Ok(summary)
    }
}

/// Output path of a table inside `dir`
pub fn table_path(dir: &Path, table: &TableRequest) -> PathBuf {
    dir.join(table.file_name())
}

/// Write `text` through a temp file and rename it into place
async fn write_atomic(path: &Path, text: &str) -> DumpResult<()> {
    let temp_path = path.with_extension(format!(
        "{}{}",
        files::TABLE_FILE_EXTENSION,
        files::TEMP_FILE_SUFFIX
    ));
    let write_error = |source| DumpError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = tokio::fs::write(&temp_path, text.as_bytes()).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(write_error(e));
    }
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(write_error)?;
    Ok(())
}
