//! Report model and JSON rendering
//!
//! The `Json*` types double as the shared report model: the table, CSV,
//! and plot renderers all consume an assembled [`JsonVersion`], so every
//! output format sees the same reduced numbers.

use crate::dataset::GroupedDataset;
use crate::stats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence interval bounds for one per-run metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsonInterval {
    pub lower: f64,
    pub upper: f64,
}

impl From<(f64, f64)> for JsonInterval {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }
}

/// One (scheduler, rb) bucket in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBucket {
    /// Resource-block count
    pub rb: u32,
    /// Mean schedulability percentage across the bucket's runs
    pub schedulability: f64,
    /// Number of trial runs aggregated into this bucket
    pub runs: usize,
    /// Interval over per-run missed-deadline totals (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_ci: Option<JsonInterval>,
    /// Interval over per-run packet totals (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkts_ci: Option<JsonInterval>,
}

/// Report section for one version's result tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonVersion {
    /// Raw version token as embedded in result paths
    pub version: String,
    /// Display label (workload aliasing applied)
    pub label: String,
    /// Scheduler label -> buckets, rb ascending
    pub schedulers: BTreeMap<String, Vec<JsonBucket>>,
}

impl JsonVersion {
    /// Reduce one version's grouped dataset into its report section.
    ///
    /// Buckets come out rb-ascending per scheduler (the dataset iterates
    /// sorted keys), so repeated assembly of the same dataset is
    /// byte-identical. Intervals are per-metric: one over per-run missed
    /// totals, one over per-run packet totals.
    pub fn build(
        version: &str,
        label: &str,
        data: &GroupedDataset,
        confidence: f64,
        include_intervals: bool,
    ) -> Self {
        let mut schedulers = BTreeMap::new();
        for (scheduler, rbs) in data.schedulers() {
            let buckets: Vec<JsonBucket> = rbs
                .iter()
                .map(|(&rb, runs)| {
                    let (missed_ci, pkts_ci) = if include_intervals {
                        let missed: Vec<f64> = runs.iter().map(|r| r.missed).collect();
                        let pkts: Vec<f64> = runs.iter().map(|r| r.pkts).collect();
                        (
                            stats::compute_confidence_interval(&missed, confidence)
                                .map(JsonInterval::from),
                            stats::compute_confidence_interval(&pkts, confidence)
                                .map(JsonInterval::from),
                        )
                    } else {
                        (None, None)
                    };
                    JsonBucket {
                        rb,
                        schedulability: stats::mean_schedulability(runs),
                        runs: runs.len(),
                        missed_ci,
                        pkts_ci,
                    }
                })
                .collect();
            schedulers.insert(scheduler.to_string(), buckets);
        }
        Self {
            version: version.to_string(),
            label: label.to_string(),
            schedulers,
        }
    }
}

/// Top-level machine-readable report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub confidence: f64,
    pub versions: Vec<JsonVersion>,
}

impl JsonReport {
    /// Serialize the report as pretty-printed JSON
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
