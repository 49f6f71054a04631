//! Grouped trial data and the averaging reducer
//!
//! The grouped dataset is an explicit keyed container (scheduler label →
//! rb count → run totals) rather than an auto-vivifying map: lookups never
//! create empty buckets, and iteration order is deterministic regardless
//! of filesystem traversal order.

use serde::Serialize;
use std::collections::BTreeMap;

/// Per-file totals for one trial run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunTotals {
    /// Sum of the missed-deadline counters across the file's entries
    pub missed: f64,
    /// Sum of the packet counters across the file's entries
    pub pkts: f64,
}

/// Raw trial data grouped by experiment configuration
#[derive(Debug, Clone, Default)]
pub struct GroupedDataset {
    groups: BTreeMap<String, BTreeMap<u32, Vec<RunTotals>>>,
}

impl GroupedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one run's totals under a (scheduler label, rb) bucket
    pub fn push(&mut self, scheduler: &str, rb: u32, totals: RunTotals) {
        self.groups
            .entry(scheduler.to_string())
            .or_default()
            .entry(rb)
            .or_default()
            .push(totals);
    }

    /// Runs recorded for one bucket, if any
    pub fn runs(&self, scheduler: &str, rb: u32) -> Option<&[RunTotals]> {
        self.groups
            .get(scheduler)
            .and_then(|rbs| rbs.get(&rb))
            .map(Vec::as_slice)
    }

    /// Iterate schedulers in lexicographic order
    pub fn schedulers(&self) -> impl Iterator<Item = (&str, &BTreeMap<u32, Vec<RunTotals>>)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of runs across all buckets
    pub fn run_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|rbs| rbs.values())
            .map(Vec::len)
            .sum()
    }
}

/// Mean schedulability per configuration, rb ascending within each
/// scheduler
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AveragedResult {
    schedulers: BTreeMap<String, BTreeMap<u32, f64>>,
}

impl AveragedResult {
    pub fn schedulers(&self) -> impl Iterator<Item = (&str, &BTreeMap<u32, f64>)> {
        self.schedulers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, scheduler: &str, rb: u32) -> Option<f64> {
        self.schedulers.get(scheduler)?.get(&rb).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.schedulers.is_empty()
    }
}

/// Reduce the grouped dataset to mean schedulability per bucket.
///
/// Takes the dataset by reference and returns a fresh result; repeated
/// calls on the same input produce identical mappings and ordering.
pub fn compute_averages(data: &GroupedDataset) -> AveragedResult {
    let mut schedulers = BTreeMap::new();
    for (scheduler, rbs) in data.schedulers() {
        let mut per_rb = BTreeMap::new();
        for (&rb, runs) in rbs {
            per_rb.insert(rb, crate::stats::mean_schedulability(runs));
        }
        schedulers.insert(scheduler.to_string(), per_rb);
    }
    AveragedResult { schedulers }
}
