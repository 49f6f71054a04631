//! Plain-text table output, one block per version

use crate::json_output::JsonVersion;
use std::fmt::Write;

/// Display alias for a version token.
///
/// The campaign's two standing workloads keep their historical tokens in
/// file names but read better under their traffic-model names; anything
/// else passes through unchanged.
pub fn version_label(version: &str) -> &str {
    match version {
        "v7" => "periodic",
        "v8" => "sporadic",
        other => other,
    }
}

/// Render one version's table block.
///
/// Per scheduler: a header line, then `RB<TAB>Schedulability(%)` rows in
/// rb-ascending order with 8-decimal values. Buckets carrying confidence
/// intervals get the missed-deadline interval appended.
pub fn render_version(version: &JsonVersion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Version: {} ===", version.label);
    for (scheduler, buckets) in &version.schedulers {
        let _ = writeln!(out, "Scheduler: {}", scheduler);
        let _ = writeln!(out, "RB\tSchedulability(%)");
        for bucket in buckets {
            let _ = write!(out, "{}\t{:.8}", bucket.rb, bucket.schedulability);
            if let Some(ci) = bucket.missed_ci {
                let _ = write!(out, "\tmissed CI [{:.2}, {:.2}]", ci.lower, ci.upper);
            }
            let _ = writeln!(out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_output::{JsonBucket, JsonInterval};
    use std::collections::BTreeMap;

    fn version(with_ci: bool) -> JsonVersion {
        let mut schedulers = BTreeMap::new();
        schedulers.insert(
            "NR-EDF".to_string(),
            vec![
                JsonBucket {
                    rb: 1,
                    schedulability: 90.0,
                    runs: 2,
                    missed_ci: with_ci.then_some(JsonInterval {
                        lower: 3.07,
                        upper: 16.93,
                    }),
                    pkts_ci: None,
                },
                JsonBucket {
                    rb: 4,
                    schedulability: 99.5,
                    runs: 2,
                    missed_ci: None,
                    pkts_ci: None,
                },
            ],
        );
        JsonVersion {
            version: "v7".to_string(),
            label: "periodic".to_string(),
            schedulers,
        }
    }

    #[test]
    fn test_version_label_aliases() {
        assert_eq!(version_label("v7"), "periodic");
        assert_eq!(version_label("v8"), "sporadic");
        assert_eq!(version_label("v9"), "v9");
    }

    #[test]
    fn test_table_layout() {
        let table = render_version(&version(false));
        assert!(table.contains("=== Version: periodic ==="));
        assert!(table.contains("Scheduler: NR-EDF"));
        assert!(table.contains("RB\tSchedulability(%)"));
        assert!(table.contains("1\t90.00000000"));
        assert!(table.contains("4\t99.50000000"));
    }

    #[test]
    fn test_rows_in_rb_order() {
        let table = render_version(&version(false));
        let rb1 = table.find("1\t90").unwrap();
        let rb4 = table.find("4\t99").unwrap();
        assert!(rb1 < rb4);
    }

    #[test]
    fn test_intervals_appended_when_present() {
        let table = render_version(&version(true));
        assert!(table.contains("missed CI [3.07, 16.93]"));
    }

    #[test]
    fn test_empty_version_has_header_only() {
        let empty = JsonVersion {
            version: "v9".to_string(),
            label: "v9".to_string(),
            schedulers: BTreeMap::new(),
        };
        let table = render_version(&empty);
        assert!(table.contains("=== Version: v9 ==="));
        assert!(!table.contains("Scheduler:"));
    }
}
