//! Progress display for dump runs
//!
//! A single indicatif bar counting tables. It falls back to plain
//! `Wrote <path>` lines when stderr is not a terminal or the bar is disabled.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::{DumpObserver, TableRequest};

/// Progress reporter for one dump
pub struct DumpProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl DumpProgress {
    /// Create a reporter for `total` tables
    ///
    /// The bar is only drawn when `enable_bar` is set and stderr is a terminal.
    pub fn new(total: usize, enable_bar: bool, quiet: bool) -> Self {
        let is_terminal = atty::is(atty::Stream::Stderr);
        let bar = (enable_bar && is_terminal && !quiet).then(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("##-"));
            }
            bar
        });

        Self { bar, quiet }
    }

    /// Clear the bar, leaving printed lines in place
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl DumpObserver for DumpProgress {
    fn table_started(&mut self, table: &TableRequest) {
        if let Some(bar) = &self.bar {
            bar.set_message(table.name.clone());
        }
    }

    fn table_written(&mut self, _table: &TableRequest, path: &Path, _rows: usize) {
        let line = format!("Wrote {}", path.display());
        match &self.bar {
            Some(bar) => {
                bar.println(line);
                bar.inc(1);
            }
            None if !self.quiet => println!("{}", line),
            None => {}
        }
    }
}

impl Drop for DumpProgress {
    fn drop(&mut self) {
        // Aborted runs must not leave a half-drawn bar behind
        self.finish();
    }
}
