//! CSV output format for schedulability summaries

use crate::json_output::JsonReport;

/// CSV report formatter
#[derive(Debug)]
pub struct CsvOutput {
    include_intervals: bool,
}

impl CsvOutput {
    pub fn new(include_intervals: bool) -> Self {
        Self { include_intervals }
    }

    /// Generate header row based on enabled columns
    fn header(&self) -> String {
        let mut headers = vec!["version", "scheduler", "rb", "schedulability", "runs"];
        if self.include_intervals {
            headers.extend([
                "missed_ci_lower",
                "missed_ci_upper",
                "pkts_ci_lower",
                "pkts_ci_upper",
            ]);
        }
        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string, one row per (version, scheduler, rb)
    pub fn to_csv(&self, report: &JsonReport) -> String {
        let mut output = String::new();
        output.push_str(&self.header());
        output.push('\n');

        for version in &report.versions {
            for (scheduler, buckets) in &version.schedulers {
                for bucket in buckets {
                    let mut fields = vec![
                        Self::escape_field(&version.version),
                        Self::escape_field(scheduler),
                        bucket.rb.to_string(),
                        format!("{:.8}", bucket.schedulability),
                        bucket.runs.to_string(),
                    ];
                    if self.include_intervals {
                        for ci in [bucket.missed_ci, bucket.pkts_ci] {
                            match ci {
                                Some(ci) => {
                                    fields.push(format!("{:.6}", ci.lower));
                                    fields.push(format!("{:.6}", ci.upper));
                                }
                                None => {
                                    fields.push(String::new());
                                    fields.push(String::new());
                                }
                            }
                        }
                    }
                    output.push_str(&fields.join(","));
                    output.push('\n');
                }
            }
        }
        output
    }
}
