//! Result-file aggregation
//!
//! Walks a result tree, applies the path pattern, and accumulates
//! per-file (missed, pkts) totals into a [`GroupedDataset`]. A file that
//! does not match the naming convention is skipped silently; a file that
//! matches but whose content is not a well-formed entry sequence is an
//! upstream bug and surfaces as an error carrying the offending path.

use crate::dataset::{GroupedDataset, RunTotals};
use crate::pattern::ResultPattern;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while aggregating result files
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed result file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Field and extension configuration for result files
///
/// Explicit parameters rather than module constants so the aggregator
/// stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Entry field holding the missed-deadline counter
    pub missed_field: String,
    /// Entry field holding the packet counter
    pub pkt_field: String,
    /// Result-file extension, matched case-insensitively
    pub extension: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            missed_field: "MissedDeadlineCounter".to_string(),
            pkt_field: "PktCounter".to_string(),
            extension: "json".to_string(),
        }
    }
}

/// Sum the configured fields across one result file's entries.
///
/// The file is opened, fully read, and closed before returning. Entries
/// with a missing or non-numeric field contribute 0 for that field;
/// negative counter readings are clamped to 0 (counters cannot go
/// negative, a negative reading is sentinel noise). A file with zero
/// entries yields `(0, 0)` so run counts stay consistent across
/// configurations.
pub fn process_file(path: &Path, config: &FieldConfig) -> Result<RunTotals, CollectError> {
    let content = fs::read_to_string(path).map_err(|source| CollectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let data: Value = serde_json::from_str(&content).map_err(|e| CollectError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let entries = data.as_array().ok_or_else(|| CollectError::Malformed {
        path: path.to_path_buf(),
        reason: "top-level value is not an entry sequence".to_string(),
    })?;

    let mut missed = 0.0;
    let mut pkts = 0.0;
    for (idx, entry) in entries.iter().enumerate() {
        let entry = entry.as_object().ok_or_else(|| CollectError::Malformed {
            path: path.to_path_buf(),
            reason: format!("entry {} is not an object", idx),
        })?;
        missed += field_value(entry, &config.missed_field);
        pkts += field_value(entry, &config.pkt_field);
    }

    Ok(RunTotals { missed, pkts })
}

fn field_value(entry: &serde_json::Map<String, Value>, field: &str) -> f64 {
    entry
        .get(field)
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .max(0.0)
}

/// Recursively aggregate every matching result file under `root`.
///
/// Non-matching paths and foreign extensions are skipped; a malformed
/// matching file aborts the aggregation with its path in the error, so a
/// corrupt file never silently degrades the summary.
pub fn collect_results(
    root: &Path,
    pattern: &ResultPattern,
    config: &FieldConfig,
) -> Result<GroupedDataset, CollectError> {
    let mut data = GroupedDataset::new();
    visit_dir(root, pattern, config, &mut data)?;
    Ok(data)
}

fn visit_dir(
    dir: &Path,
    pattern: &ResultPattern,
    config: &FieldConfig,
    data: &mut GroupedDataset,
) -> Result<(), CollectError> {
    let entries = fs::read_dir(dir).map_err(|source| CollectError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| CollectError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            visit_dir(&path, pattern, config, data)?;
            continue;
        }
        if !has_extension(&path, &config.extension) {
            continue;
        }
        let Some(key) = pattern.match_path(&path) else {
            trace!(path = %path.display(), "skipping non-matching result file");
            continue;
        };
        let totals = process_file(&path, config)?;
        debug!(
            path = %path.display(),
            scheduler = %key.scheduler,
            rb = key.rb,
            missed = totals.missed,
            pkts = totals.pkts,
            "aggregated result file"
        );
        data.push(key.scheduler.label(), key.rb, totals);
    }
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
