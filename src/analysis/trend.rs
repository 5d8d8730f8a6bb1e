/// Trend smoothing and event/anomaly detection over the daily summary.
///
/// These run downstream of the aggregators, over `DailyDescriptor` rows
/// rather than raw samples. They inherit the sentinel discipline: a date
/// with no data is skipped, never treated as zero.

use chrono::NaiveDate;

use crate::model::{DailyDescriptor, LevelValue};
use crate::stats;

// ---------------------------------------------------------------------------
// Moving average
// ---------------------------------------------------------------------------

/// Trailing-window arithmetic mean over the numeric entries of a daily
/// series, one output per input position.
///
/// This is display smoothing for trend plots (the conventional 7-day
/// rolling mean of daily figures), deliberately an arithmetic mean of the
/// already-reduced dB values — it is not an acoustic energy average and
/// must not be used as one. A window with no numeric entries yields
/// `NoData` at that position; a partially-filled leading window averages
/// whatever values exist.
pub fn moving_average(values: &[LevelValue], window: usize) -> Vec<LevelValue> {
    if window == 0 {
        return vec![LevelValue::NoData; values.len()];
    }
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window - 1);
            let numeric: Vec<f64> = values[start..=i].iter().filter_map(|v| v.as_f64()).collect();
            if numeric.is_empty() {
                LevelValue::NoData
            } else {
                LevelValue::Numeric(numeric.iter().sum::<f64>() / numeric.len() as f64)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Event detection
// ---------------------------------------------------------------------------

/// Reporting dates whose daytime LAmax exceeds the threshold.
///
/// Strictly greater than: a day sitting exactly on the threshold is not an
/// exceedance. Dates without a daytime LAmax are skipped.
pub fn detect_exceedances(daily: &[DailyDescriptor], threshold_db: f64) -> Vec<NaiveDate> {
    daily
        .iter()
        .filter(|row| matches!(row.lamax_day.as_f64(), Some(v) if v > threshold_db))
        .map(|row| row.date)
        .collect()
}

/// Reporting dates whose daytime LAeq deviates from the survey mean by more
/// than `threshold_sigma` sample standard deviations.
///
/// Needs at least two numeric days to establish a spread; with fewer, or
/// with a perfectly flat series, no date is anomalous.
pub fn detect_anomalies(daily: &[DailyDescriptor], threshold_sigma: f64) -> Vec<NaiveDate> {
    let values: Vec<f64> = daily.iter().filter_map(|row| row.laeq_day.as_f64()).collect();
    let Some(spread) = stats::std_dev(&values).as_f64() else {
        return Vec::new();
    };
    if spread == 0.0 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    daily
        .iter()
        .filter(|row| {
            matches!(row.laeq_day.as_f64(), Some(v) if (v - mean).abs() > threshold_sigma * spread)
        })
        .map(|row| row.date)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
