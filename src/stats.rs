/// Energy averaging and order statistics for sound level series.
///
/// Sound levels are logarithmic power ratios, so the only correct average
/// is taken in the linear power domain: dB → power, arithmetic mean,
/// power → dB. A plain arithmetic mean of dB values is a different (and
/// wrong) quantity; nothing in this crate computes one except the
/// explicitly-labelled display smoothing in `analysis::trend`.
///
/// Every function takes a slice of already-valid values — the aggregators
/// own the job of filtering out missing fields — and degrades to a
/// `LevelValue` sentinel instead of erroring when the slice is empty or
/// too short.

use crate::model::LevelValue;

// ---------------------------------------------------------------------------
// dB <-> linear power conversion
// ---------------------------------------------------------------------------
// The single canonical conversion pair. The classifier uses `db_to_power`
// to fill the integrated column and every averaging path routes back
// through `power_to_db`, so daily and overall figures cannot drift.

/// Converts a level in dB to its linear power equivalent, `10^(L/10)`.
pub fn db_to_power(level_db: f64) -> f64 {
    10f64.powf(level_db / 10.0)
}

/// Converts a linear power back to dB, `10 * log10(power)`.
pub fn power_to_db(power: f64) -> f64 {
    10.0 * power.log10()
}

// ---------------------------------------------------------------------------
// Energy averaging
// ---------------------------------------------------------------------------

/// Energy-averages a series of dB levels.
///
/// Converts each level to linear power, takes the arithmetic mean, and
/// converts back. `NoData` for an empty series.
pub fn energy_average(levels: &[f64]) -> LevelValue {
    if levels.is_empty() {
        return LevelValue::NoData;
    }
    let mean_power =
        levels.iter().map(|&l| db_to_power(l)).sum::<f64>() / levels.len() as f64;
    LevelValue::Numeric(power_to_db(mean_power))
}

/// Energy-averages a series of pre-converted linear powers (the
/// `integrated_laeq` column). Numerically identical to `energy_average`
/// over the raw levels, without re-converting per row.
pub fn average_powers(powers: &[f64]) -> LevelValue {
    if powers.is_empty() {
        return LevelValue::NoData;
    }
    let mean_power = powers.iter().sum::<f64>() / powers.len() as f64;
    LevelValue::Numeric(power_to_db(mean_power))
}

// ---------------------------------------------------------------------------
// Percentiles
// ---------------------------------------------------------------------------

/// Linear-interpolation percentile over the values.
///
/// The conventional definition: sort ascending, locate the fractional rank
/// `p/100 * (n - 1)`, and interpolate linearly between the bracketing
/// values. `p` outside [0, 100] is clamped. `NoData` for an empty series.
///
/// Callers own the L-n index mapping: L10 is the level exceeded 10% of the
/// time, i.e. the 90th percentile of the distribution, so L10 → p=90,
/// L50 → p=50, L95 → p=5.
pub fn percentile(levels: &[f64], p: f64) -> LevelValue {
    if levels.is_empty() {
        return LevelValue::NoData;
    }
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return LevelValue::Numeric(sorted[lower]);
    }
    let fraction = rank - lower as f64;
    LevelValue::Numeric(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The most frequently occurring value.
///
/// Ties break to the smallest value, so the result is deterministic
/// regardless of input order. `NoData` for an empty series.
///
/// Background levels from a sound level meter are quantized to 0.1 dB, so
/// exact equality is the right grouping for this data.
pub fn mode(levels: &[f64]) -> LevelValue {
    if levels.is_empty() {
        return LevelValue::NoData;
    }
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // Scan runs of equal values in the ascending sort; a strictly greater
    // count is required to displace the incumbent, so the smallest of the
    // most frequent values wins.
    let mut best_value = sorted[0];
    let mut best_count = 0usize;
    let mut run_value = sorted[0];
    let mut run_count = 0usize;
    for &v in &sorted {
        if v == run_value {
            run_count += 1;
        } else {
            if run_count > best_count {
                best_value = run_value;
                best_count = run_count;
            }
            run_value = v;
            run_count = 1;
        }
    }
    if run_count > best_count {
        best_value = run_value;
    }
    LevelValue::Numeric(best_value)
}

// ---------------------------------------------------------------------------
// Nth-order extremes
// ---------------------------------------------------------------------------

/// The nth-highest value (1-based: n=1 is the maximum).
///
/// `Absent` — not `NoData` — when fewer than `n` values exist, so callers
/// can distinguish "not enough samples" from an empty partition.
pub fn nth_highest(levels: &[f64], n: usize) -> LevelValue {
    if n == 0 || levels.len() < n {
        return LevelValue::Absent;
    }
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    LevelValue::Numeric(sorted[n - 1])
}

/// The nth-lowest value (1-based: n=1 is the minimum).
/// `Absent` when fewer than `n` values exist.
pub fn nth_lowest(levels: &[f64], n: usize) -> LevelValue {
    if n == 0 || levels.len() < n {
        return LevelValue::Absent;
    }
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    LevelValue::Numeric(sorted[n - 1])
}

// ---------------------------------------------------------------------------
// Spread
// ---------------------------------------------------------------------------

/// Sample standard deviation (n − 1 divisor), the convention fixed for the
/// whole engine.
///
/// `NoData` for fewer than two values: the n − 1 divisor is undefined at
/// n = 1, and a spread of a single sample carries no information anyway.
pub fn std_dev(levels: &[f64]) -> LevelValue {
    if levels.len() < 2 {
        return LevelValue::NoData;
    }
    let n = levels.len() as f64;
    let mean = levels.iter().sum::<f64>() / n;
    let sum_sq = levels.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>();
    LevelValue::Numeric((sum_sq / (n - 1.0)).sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn numeric(v: LevelValue) -> f64 {
        v.as_f64().expect("expected a numeric result")
    }

    // --- Conversion ---------------------------------------------------------

    #[test]
    fn test_db_power_round_trip() {
        for &db in &[0.0, 30.0, 55.5, 94.0, 120.0] {
            assert!(
                (power_to_db(db_to_power(db)) - db).abs() < TOL,
                "round trip should be exact for {} dB",
                db
            );
        }
    }

    // --- Energy averaging ---------------------------------------------------

    #[test]
    fn test_single_sample_energy_average_is_identity() {
        assert!((numeric(energy_average(&[63.2])) - 63.2).abs() < TOL);
    }

    #[test]
    fn test_homogeneous_energy_average_is_invariant() {
        let levels = vec![48.5; 17];
        assert!(
            (numeric(energy_average(&levels)) - 48.5).abs() < TOL,
            "averaging n copies of x must return x"
        );
    }

    #[test]
    fn test_energy_average_exceeds_arithmetic_mean() {
        // The energy average is dominated by the louder samples, so for a
        // heterogeneous series it sits above the arithmetic mean of the dB
        // values. Substituting one for the other is the classic error this
        // test guards against.
        let levels = [40.0, 70.0];
        let energy = numeric(energy_average(&levels));
        assert!(
            energy > 55.0 + 5.0,
            "energy average of 40/70 dB should be far above the 55 dB arithmetic mean, got {}",
            energy
        );
        // Exact value: 10*log10((1e4 + 1e7) / 2)
        let expected = 10.0 * ((1e4f64 + 1e7) / 2.0).log10();
        assert!((energy - expected).abs() < TOL);
    }

    #[test]
    fn test_energy_average_of_empty_series_is_no_data() {
        assert_eq!(energy_average(&[]), LevelValue::NoData);
        assert_eq!(average_powers(&[]), LevelValue::NoData);
    }

    #[test]
    fn test_average_powers_matches_energy_average() {
        let levels = [52.0, 55.0, 61.5, 47.3];
        let powers: Vec<f64> = levels.iter().map(|&l| db_to_power(l)).collect();
        assert!(
            (numeric(average_powers(&powers)) - numeric(energy_average(&levels))).abs() < TOL,
            "the pre-integrated path must agree with the raw-level path exactly"
        );
    }

    // --- Percentile ---------------------------------------------------------

    #[test]
    fn test_percentile_50_of_odd_length_series_is_exact_median() {
        let levels = [42.0, 55.0, 47.0, 61.0, 50.0];
        assert!((numeric(percentile(&levels, 50.0)) - 50.0).abs() < TOL);
    }

    #[test]
    fn test_percentile_interpolates_between_ranks() {
        // p=50 over [10, 20]: rank 0.5, midway between the two values.
        assert!((numeric(percentile(&[10.0, 20.0], 50.0)) - 15.0).abs() < TOL);
        // p=95 over [0, 10, 20, 30, 40]: rank 3.8 → 30 + 0.8 * 10.
        let v = numeric(percentile(&[0.0, 10.0, 20.0, 30.0, 40.0], 95.0));
        assert!((v - 38.0).abs() < TOL, "expected 38.0, got {}", v);
    }

    #[test]
    fn test_percentile_extremes_hit_min_and_max() {
        let levels = [44.0, 58.0, 51.0];
        assert!((numeric(percentile(&levels, 0.0)) - 44.0).abs() < TOL);
        assert!((numeric(percentile(&levels, 100.0)) - 58.0).abs() < TOL);
    }

    #[test]
    fn test_percentile_of_single_value_is_that_value() {
        assert!((numeric(percentile(&[66.6], 95.0)) - 66.6).abs() < TOL);
    }

    #[test]
    fn test_percentile_of_empty_series_is_no_data() {
        assert_eq!(percentile(&[], 95.0), LevelValue::NoData);
    }

    // --- Mode ---------------------------------------------------------------

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(&[70.0, 70.0, 65.0]), LevelValue::Numeric(70.0));
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest_value() {
        assert_eq!(
            mode(&[70.0, 65.0]),
            LevelValue::Numeric(65.0),
            "with no repeats every value ties at count 1, so the smallest wins"
        );
        assert_eq!(mode(&[70.0, 70.0, 65.0, 65.0]), LevelValue::Numeric(65.0));
    }

    #[test]
    fn test_mode_is_order_independent() {
        assert_eq!(mode(&[65.0, 70.0, 70.0]), mode(&[70.0, 65.0, 70.0]));
    }

    #[test]
    fn test_mode_of_empty_series_is_no_data() {
        assert_eq!(mode(&[]), LevelValue::NoData);
    }

    // --- Nth highest / lowest -----------------------------------------------

    #[test]
    fn test_nth_highest_basic() {
        assert_eq!(nth_highest(&[80.0, 75.0, 90.0], 1), LevelValue::Numeric(90.0));
        assert_eq!(nth_highest(&[80.0, 75.0, 90.0], 2), LevelValue::Numeric(80.0));
        assert_eq!(nth_highest(&[80.0, 75.0, 90.0], 3), LevelValue::Numeric(75.0));
    }

    #[test]
    fn test_nth_highest_insufficient_samples_is_absent() {
        assert_eq!(
            nth_highest(&[80.0, 75.0], 3),
            LevelValue::Absent,
            "rank beyond the sample count is Absent, not NoData"
        );
    }

    #[test]
    fn test_nth_lowest_basic() {
        assert_eq!(nth_lowest(&[80.0, 75.0, 90.0], 1), LevelValue::Numeric(75.0));
        assert_eq!(nth_lowest(&[80.0, 75.0, 90.0], 3), LevelValue::Numeric(90.0));
        assert_eq!(nth_lowest(&[80.0], 2), LevelValue::Absent);
    }

    #[test]
    fn test_nth_order_rank_zero_is_absent() {
        assert_eq!(nth_highest(&[80.0], 0), LevelValue::Absent);
        assert_eq!(nth_lowest(&[80.0], 0), LevelValue::Absent);
    }

    // --- Standard deviation -------------------------------------------------

    #[test]
    fn test_std_dev_uses_sample_divisor() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, sum of squares 32.
        // Sample std dev = sqrt(32 / 7).
        let levels = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((numeric(std_dev(&levels)) - expected).abs() < TOL);
    }

    #[test]
    fn test_std_dev_of_constant_series_is_zero() {
        assert!((numeric(std_dev(&[55.0, 55.0, 55.0]))).abs() < TOL);
    }

    #[test]
    fn test_std_dev_of_fewer_than_two_values_is_no_data() {
        assert_eq!(std_dev(&[]), LevelValue::NoData);
        assert_eq!(
            std_dev(&[55.0]),
            LevelValue::NoData,
            "the n-1 divisor is undefined for a single sample"
        );
    }
}
