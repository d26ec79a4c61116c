use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use log::{debug, info, trace, warn};
use thiserror::Error;

use super::header::{ResolvedColumns, resolve_columns};
use super::model::{PriceCatalog, PriceRecord};

// ---------------------------------------------------------------------------
// Row outcome
// ---------------------------------------------------------------------------

/// Why a data row did not become a [`PriceRecord`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    #[error("row is shorter than the resolved columns")]
    ShortRow,
    #[error("row is not valid UTF-8 delimited text")]
    Undecodable,
    #[error("price is not a number")]
    BadPrice,
    #[error("weight is not a number")]
    BadWeight,
    #[error("weight is not positive")]
    NonPositiveWeight,
}

/// Summary of one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Directory entries whose name contains the marker.
    pub candidate_files: usize,
    /// Candidates that could not be opened or had no readable header row.
    pub unreadable_files: Vec<String>,
    /// Candidates whose header row lacks at least one role.
    pub files_missing_columns: Vec<String>,
    /// Records appended to the catalog.
    pub loaded: usize,
    /// Discarded data rows, by reason.
    pub skipped_rows: BTreeMap<SkipReason, usize>,
}

impl LoadReport {
    fn skip(&mut self, reason: SkipReason) {
        *self.skipped_rows.entry(reason).or_default() += 1;
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Scan `dir` (non-recursively) for entries whose name contains `marker`
/// and append every valid row they hold to `catalog`.
///
/// Listing order is whatever the filesystem returns. A candidate that
/// cannot be read is skipped; only failing to list `dir` itself is an error.
pub fn load_dir(dir: &Path, marker: &str, catalog: &mut PriceCatalog) -> Result<LoadReport> {
    let entries = fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;
    let mut report = LoadReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable directory entry in {}: {err}", dir.display());
                continue;
            }
        };
        // Non-UTF-8 names are matched and recorded in their lossy form.
        let os_name = entry.file_name();
        let file_name = os_name.to_string_lossy();
        if !file_name.contains(marker) {
            continue;
        }
        report.candidate_files += 1;

        match load_file(&entry.path(), &file_name, catalog, &mut report) {
            Ok(n) => debug!("{file_name}: {n} records"),
            Err(err) => {
                warn!("skipping {file_name}: {err:#}");
                report.unreadable_files.push(file_name.to_string());
            }
        }
    }

    info!(
        "loaded {} records from {} candidate files in {}",
        report.loaded,
        report.candidate_files,
        dir.display()
    );
    Ok(report)
}

/// Load one comma-delimited price file, tagging records with `file_name`.
///
/// Returns the number of records appended. Errors only when the file
/// cannot be opened or its header row cannot be read.
pub fn load_file(
    path: &Path,
    file_name: &str,
    catalog: &mut PriceCatalog,
    report: &mut LoadReport,
) -> Result<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = reader.records();

    let headers = match rows.next() {
        Some(row) => row.context("reading header row")?,
        None => bail!("file has no header row"),
    };
    let roles = resolve_columns(&headers.iter().collect::<Vec<_>>());
    let Some(columns) = roles.resolved() else {
        warn!(
            "{file_name}: no column for {}, file ignored",
            roles.missing().join(", ")
        );
        report.files_missing_columns.push(file_name.to_string());
        return Ok(0);
    };

    let mut loaded = 0;
    for (i, row) in rows.enumerate() {
        // Line numbers are 1-based and the header is line 1.
        let line = i + 2;
        let outcome = match row {
            Ok(row) => parse_row(&row, &columns, file_name),
            Err(err) if matches!(err.kind(), ErrorKind::Io(_)) => {
                warn!("{file_name}: read failed at line {line}, keeping earlier rows: {err}");
                break;
            }
            Err(err) => {
                trace!("{file_name}:{line}: {err}");
                Err(SkipReason::Undecodable)
            }
        };
        match outcome {
            Ok(record) => {
                trace!("{file_name}:{line}: {record}");
                catalog.push(record);
                loaded += 1;
            }
            Err(reason) => {
                debug!("{file_name}:{line}: {reason}");
                report.skip(reason);
            }
        }
    }

    report.loaded += loaded;
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Turn one data row into a record, or say why it was discarded.
pub fn parse_row(
    row: &StringRecord,
    columns: &ResolvedColumns,
    file_name: &str,
) -> std::result::Result<PriceRecord, SkipReason> {
    let cell = |idx: usize| row.get(idx).ok_or(SkipReason::ShortRow);

    let price = parse_number(cell(columns.price)?).ok_or(SkipReason::BadPrice)?;
    let weight = parse_number(cell(columns.weight)?).ok_or(SkipReason::BadWeight)?;
    let product = cell(columns.product)?;

    PriceRecord::new(product, price, weight, file_name).ok_or(SkipReason::NonPositiveWeight)
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}
