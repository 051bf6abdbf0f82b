//! Quote tables returned by the history endpoint, and CSV export.

use crate::domain::Ticker;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Extension appended to export file names that lack it.
pub const CSV_EXTENSION: &str = "csv";

/// One sampled row of quote history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Rows of quote history for one ticker, ordered by timestamp.
///
/// Read-only once built: the loader owns it and hands out shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTable {
    ticker: Ticker,
    bars: Vec<QuoteBar>,
}

impl QuoteTable {
    pub fn new(ticker: Ticker, mut bars: Vec<QuoteBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self { ticker, bars }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn bars(&self) -> &[QuoteBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent row.
    pub fn last(&self) -> Option<&QuoteBar> {
        self.bars.last()
    }

    /// Columnar view: `timestamp, open, high, low, close, adj_close, volume`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let timestamps: Vec<i64> = self
            .bars
            .iter()
            .map(|b| b.timestamp.timestamp_millis())
            .collect();
        let opens: Vec<f64> = self.bars.iter().map(|b| b.open).collect();
        let highs: Vec<f64> = self.bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = self.bars.iter().map(|b| b.low).collect();
        let closes: Vec<f64> = self.bars.iter().map(|b| b.close).collect();
        let adj_closes: Vec<f64> = self.bars.iter().map(|b| b.adj_close).collect();
        let volumes: Vec<u64> = self.bars.iter().map(|b| b.volume).collect();

        DataFrame::new(vec![
            Column::new("timestamp".into(), timestamps)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
            Column::new("open".into(), opens),
            Column::new("high".into(), highs),
            Column::new("low".into(), lows),
            Column::new("close".into(), closes),
            Column::new("adj_close".into(), adj_closes),
            Column::new("volume".into(), volumes),
        ])
    }

    /// Write the table as CSV to `dir/file_name`, returning the final path.
    ///
    /// `.csv` is appended when `file_name` has no such extension. `dir` must
    /// already exist, and so must any subdirectory named in `file_name`;
    /// names that climb out of `dir` (`..`, absolute paths) are rejected. The
    /// file is written to a hidden temporary sibling and renamed into place,
    /// so a failed export leaves nothing behind.
    pub fn export_csv(&self, dir: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::PathNotFound {
                path: dir.to_path_buf(),
            });
        }

        let file_name = csv_file_name(file_name).ok_or_else(|| Error::Export {
            path: dir.to_path_buf(),
            reason: "file name is empty".into(),
        })?;
        let relative = Path::new(&file_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(Error::Export {
                path: dir.join(relative),
                reason: "file name must stay inside the destination folder".into(),
            });
        }

        let path = dir.join(relative);
        let parent = path.parent().unwrap_or(dir);
        if !parent.is_dir() {
            return Err(Error::PathNotFound {
                path: parent.to_path_buf(),
            });
        }
        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        let tmp_path = parent.join(format!(".{base_name}.tmp"));

        debug!("export_csv | {} rows | path: {}", self.len(), path.display());

        let export_err = |reason: String| Error::Export {
            path: path.clone(),
            reason,
        };

        let mut df = self
            .to_dataframe()
            .map_err(|e| export_err(format!("dataframe creation: {e}")))?;

        let written = fs::File::create(&tmp_path)
            .map_err(|e| format!("create file: {e}"))
            .and_then(|mut file| {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)
                    .map_err(|e| format!("write csv: {e}"))
            })
            .and_then(|()| fs::rename(&tmp_path, &path).map_err(|e| format!("rename: {e}")));

        if let Err(reason) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(export_err(reason));
        }

        info!("exported {} rows for {} to {}", self.len(), self.ticker, path.display());
        Ok(path)
    }
}

/// Normalize an export file name to carry the `.csv` extension.
fn csv_file_name(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    let has_csv = Path::new(trimmed)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CSV_EXTENSION));
    if has_csv {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}.{CSV_EXTENSION}"))
    }
}
