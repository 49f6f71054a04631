//! Cosechar - schedulability analysis for NR scheduler simulation results
//!
//! This library aggregates simulation result files produced by a
//! scheduling experiment campaign, groups multi-run trial data by
//! (scheduler, resource-block count) configuration, and reduces the
//! groups to mean schedulability percentages and confidence intervals.
//! The table, CSV, JSON, and chart renderers are thin consumers of the
//! reduced report.

pub mod cli;
pub mod collect;
pub mod csv_output;
pub mod dataset;
pub mod json_output;
pub mod pattern;
pub mod plot;
pub mod stats;
pub mod table_output;
