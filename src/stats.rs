//! Statistics engine: mean schedulability and confidence intervals
//!
//! All reductions go through Trueno for SIMD-accelerated mean/stddev.
//! Trueno uses population stddev (divide by n), which matches the
//! convention the simulation campaign's earlier tooling reported.

use crate::dataset::RunTotals;

/// Default two-sided confidence level
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Mean schedulability percentage for one (scheduler, rb) bucket.
///
/// `100 - mean(missed) / mean(pkts) * 100` across the bucket's runs when
/// any packets were observed; 0 when the mean packet count is zero (so a
/// bucket of empty runs reports 0 rather than dividing by zero). Empty
/// run lists also yield 0.
pub fn mean_schedulability(runs: &[RunTotals]) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    let missed: Vec<f32> = runs.iter().map(|r| r.missed as f32).collect();
    let pkts: Vec<f32> = runs.iter().map(|r| r.pkts as f32).collect();

    let mean_missed = trueno::Vector::from_slice(&missed).mean().unwrap_or(0.0) as f64;
    let mean_pkts = trueno::Vector::from_slice(&pkts).mean().unwrap_or(0.0) as f64;

    if mean_pkts > 0.0 {
        100.0 - (mean_missed / mean_pkts * 100.0)
    } else {
        0.0
    }
}

/// Two-sided confidence interval over per-run scalar samples.
///
/// Fewer than 2 samples degenerate to `[min, max]` of the singleton;
/// otherwise `mean ± z * stddev / sqrt(n)` with z from the standard-normal
/// quantile at `1 - (1 - confidence) / 2`. Returns `None` for an empty
/// sample list.
///
/// This is a per-metric interval: callers combining metrics (missed and
/// packet counts, say) must compute one interval per metric rather than
/// treating a pair of bounds as a joint confidence region.
pub fn compute_confidence_interval(values: &[f64], confidence: f64) -> Option<(f64, f64)> {
    match values.len() {
        0 => None,
        1 => Some((values[0], values[0])),
        n => {
            // Sorting first makes the SIMD reduction order-independent,
            // so a permuted sample list yields bit-identical bounds
            let mut sorted: Vec<f32> = values.iter().map(|&v| v as f32).collect();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let v = trueno::Vector::from_slice(&sorted);
            let mean = v.mean().unwrap_or(0.0) as f64;
            let stddev = v.stddev().unwrap_or(0.0) as f64;

            let z = normal_quantile(1.0 - (1.0 - confidence) / 2.0);
            let margin = z * (stddev / (n as f64).sqrt());
            Some((mean - margin, mean + margin))
        }
    }
}

/// Standard-normal quantile function (inverse CDF).
///
/// Trueno has no quantile primitive, so this is Acklam's rational
/// approximation, accurate to |error| < 1.15e-9 over (0, 1). Out-of-range
/// inputs saturate to the corresponding infinity.
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -((((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(missed: f64, pkts: f64) -> RunTotals {
        RunTotals { missed, pkts }
    }

    #[test]
    fn test_schedulability_basic() {
        let runs = vec![run(5.0, 100.0), run(15.0, 100.0)];
        assert_eq!(mean_schedulability(&runs), 90.0);
    }

    #[test]
    fn test_schedulability_perfect() {
        let runs = vec![run(0.0, 100.0)];
        assert_eq!(mean_schedulability(&runs), 100.0);
    }

    #[test]
    fn test_schedulability_zero_packets() {
        let runs = vec![run(0.0, 0.0)];
        assert_eq!(mean_schedulability(&runs), 0.0);
    }

    #[test]
    fn test_schedulability_empty_runs() {
        assert_eq!(mean_schedulability(&[]), 0.0);
    }

    #[test]
    fn test_interval_empty() {
        assert_eq!(compute_confidence_interval(&[], 0.95), None);
    }

    #[test]
    fn test_interval_singleton_is_min_max() {
        let (lower, upper) = compute_confidence_interval(&[7.0], 0.95).unwrap();
        assert_eq!(lower, 7.0);
        assert_eq!(upper, 7.0);
    }

    #[test]
    fn test_interval_symmetric_around_mean() {
        let (lower, upper) = compute_confidence_interval(&[8.0, 12.0], 0.95).unwrap();
        assert!((lower + upper - 20.0).abs() < 1e-6);
        assert!(lower < 10.0 && upper > 10.0);
    }

    #[test]
    fn test_interval_known_values() {
        // mean = 10, population stddev = 2, n = 4
        // margin = 1.959964 * 2 / 2 = 1.959964
        let values = [8.0, 8.0, 12.0, 12.0];
        let (lower, upper) = compute_confidence_interval(&values, 0.95).unwrap();
        assert!((lower - (10.0 - 1.959964)).abs() < 1e-4);
        assert!((upper - (10.0 + 1.959964)).abs() < 1e-4);
    }

    #[test]
    fn test_interval_deterministic() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let first = compute_confidence_interval(&values, 0.95).unwrap();
        let second = compute_confidence_interval(&values, 0.95).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interval_zero_variance() {
        let (lower, upper) = compute_confidence_interval(&[5.0, 5.0, 5.0], 0.99).unwrap();
        assert_eq!(lower, 5.0);
        assert_eq!(upper, 5.0);
    }

    #[test]
    fn test_quantile_known_z_values() {
        // Two-sided z for common confidence levels
        assert!((normal_quantile(0.975) - 1.959964).abs() < 1e-4);
        assert!((normal_quantile(0.995) - 2.575829).abs() < 1e-4);
        assert!((normal_quantile(0.95) - 1.644854).abs() < 1e-4);
    }

    #[test]
    fn test_quantile_median_is_zero() {
        assert!(normal_quantile(0.5).abs() < 1e-9);
    }

    #[test]
    fn test_quantile_symmetry() {
        for p in [0.6, 0.75, 0.9, 0.99, 0.999] {
            let hi = normal_quantile(p);
            let lo = normal_quantile(1.0 - p);
            assert!((hi + lo).abs() < 1e-8, "asymmetric at p={}", p);
        }
    }

    #[test]
    fn test_quantile_tail_region() {
        // p < 0.02425 exercises the lower rational branch
        assert!((normal_quantile(0.001) + 3.090232).abs() < 1e-4);
    }

    #[test]
    fn test_quantile_saturates_out_of_range() {
        assert_eq!(normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(normal_quantile(1.0), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn prop_schedulability_in_range(
            runs in proptest::collection::vec((0.0f64..1_000.0, 0.0f64..10_000.0), 1..20)
        ) {
            let runs: Vec<RunTotals> = runs
                .iter()
                .map(|&(missed, pkts)| run(missed.min(pkts), pkts))
                .collect();
            let s = mean_schedulability(&runs);
            // missed <= pkts per run, so the ratio of means stays in [0,1]
            prop_assert!((-1e-3..=100.0 + 1e-3).contains(&s), "schedulability {} out of range", s);
        }

        #[test]
        fn prop_interval_order_invariant(
            mut values in proptest::collection::vec(0.0f64..1_000.0, 2..30)
        ) {
            let forward = compute_confidence_interval(&values, 0.95).unwrap();
            values.reverse();
            let reversed = compute_confidence_interval(&values, 0.95).unwrap();
            prop_assert_eq!(forward, reversed);
        }

        #[test]
        fn prop_interval_contains_mean(
            values in proptest::collection::vec(0.0f64..1_000.0, 2..30)
        ) {
            let (lower, upper) = compute_confidence_interval(&values, 0.95).unwrap();
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            // f32 reduction inside, so allow a small tolerance
            prop_assert!(lower <= mean + 1e-2 && upper >= mean - 1e-2);
        }
    }
}
