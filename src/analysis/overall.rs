/// Whole-survey aggregation and the Lden/Ldn composites.
///
/// Applies the same reductions as the daily aggregator, but over the entire
/// dataset's daytime/night-time partitions, and adds the extreme-order,
/// percentile-level, spread, and day/evening/night composite descriptors.

use crate::model::{ClassifiedMeasurement, LdenPeriod, LevelValue, OverallMetrics, SimplePeriod};
use crate::stats;

// ---------------------------------------------------------------------------
// Composite weighting constants
// ---------------------------------------------------------------------------
// The hour fractions reflect the fixed clock partition (12 h day, 4 h
// evening, 8 h night; 16 h day for Ldn), not the actual sample counts per
// period. Regulatory formulae fix these weights even for surveys with
// uneven coverage.

const LDEN_DAY_HOURS: f64 = 12.0;
const LDEN_EVENING_HOURS: f64 = 4.0;
const LDEN_NIGHT_HOURS: f64 = 8.0;
const LDN_DAY_HOURS: f64 = 16.0;
const LDN_NIGHT_HOURS: f64 = 8.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Evening annoyance penalty applied inside the Lden composite, dB.
const EVENING_PENALTY_DB: f64 = 5.0;
/// Night annoyance penalty applied inside both composites, dB.
const NIGHT_PENALTY_DB: f64 = 10.0;

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

fn simple_column<F>(
    records: &[ClassifiedMeasurement],
    period: SimplePeriod,
    field: F,
) -> Vec<f64>
where
    F: Fn(&ClassifiedMeasurement) -> Option<f64>,
{
    records
        .iter()
        .filter(|r| r.period_simple == period)
        .filter_map(field)
        .collect()
}

fn lden_laeq(records: &[ClassifiedMeasurement], period: LdenPeriod) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.period_lden == period)
        .filter_map(|r| r.measurement.laeq)
        .collect()
}

// ---------------------------------------------------------------------------
// Composites
// ---------------------------------------------------------------------------

/// Day-evening-night composite.
///
/// All three period averages must exist; a survey that never touches one of
/// the periods has no defined Lden and degrades to `NoData`.
fn lden(day_laeq: LevelValue, evening_laeq: LevelValue, night_laeq: LevelValue) -> LevelValue {
    match (day_laeq.as_f64(), evening_laeq.as_f64(), night_laeq.as_f64()) {
        (Some(day), Some(evening), Some(night)) => {
            let weighted = (LDEN_DAY_HOURS / HOURS_PER_DAY) * stats::db_to_power(day)
                + (LDEN_EVENING_HOURS / HOURS_PER_DAY)
                    * stats::db_to_power(evening + EVENING_PENALTY_DB)
                + (LDEN_NIGHT_HOURS / HOURS_PER_DAY)
                    * stats::db_to_power(night + NIGHT_PENALTY_DB);
            LevelValue::Numeric(stats::power_to_db(weighted))
        }
        _ => LevelValue::NoData,
    }
}

/// Day-night composite over the two-way partition.
fn ldn(day_laeq: LevelValue, night_laeq: LevelValue) -> LevelValue {
    match (day_laeq.as_f64(), night_laeq.as_f64()) {
        (Some(day), Some(night)) => {
            let weighted = (LDN_DAY_HOURS / HOURS_PER_DAY) * stats::db_to_power(day)
                + (LDN_NIGHT_HOURS / HOURS_PER_DAY)
                    * stats::db_to_power(night + NIGHT_PENALTY_DB);
            LevelValue::Numeric(stats::power_to_db(weighted))
        }
        _ => LevelValue::NoData,
    }
}

// ---------------------------------------------------------------------------
// Overall metrics
// ---------------------------------------------------------------------------

/// Computes the full overall descriptor set for the survey.
///
/// Never fails: every field is present in the result, with `NoData`
/// standing in wherever the underlying partition is empty or too small.
pub fn overall_metrics(records: &[ClassifiedMeasurement]) -> OverallMetrics {
    let day_laeq = simple_column(records, SimplePeriod::Daytime, |r| r.measurement.laeq);
    let night_laeq = simple_column(records, SimplePeriod::NightTime, |r| r.measurement.laeq);
    let day_lamax = simple_column(records, SimplePeriod::Daytime, |r| r.measurement.lamax);
    let night_lamax = simple_column(records, SimplePeriod::NightTime, |r| r.measurement.lamax);
    let day_la90 = simple_column(records, SimplePeriod::Daytime, |r| r.measurement.la90);
    let night_la90 = simple_column(records, SimplePeriod::NightTime, |r| r.measurement.la90);
    let day_lamin = simple_column(records, SimplePeriod::Daytime, |r| r.measurement.lamin);
    let night_lamin = simple_column(records, SimplePeriod::NightTime, |r| r.measurement.lamin);

    let laeq_day = stats::energy_average(&day_laeq);
    let laeq_night = stats::energy_average(&night_laeq);

    // Lden uses its own three-way partition, independent of the two-way
    // split above.
    let lden_value = lden(
        stats::energy_average(&lden_laeq(records, LdenPeriod::Day)),
        stats::energy_average(&lden_laeq(records, LdenPeriod::Evening)),
        stats::energy_average(&lden_laeq(records, LdenPeriod::Night)),
    );
    let ldn_value = ldn(laeq_day, laeq_night);

    OverallMetrics {
        laeq_day,
        laeq_night,
        lamax_day: stats::percentile(&day_lamax, 95.0),
        lamax_night: stats::percentile(&night_lamax, 95.0),
        la90_day: stats::mode(&day_la90),
        la90_night: stats::mode(&night_la90),
        lamin_day: stats::percentile(&day_lamin, 5.0),
        lamin_night: stats::percentile(&night_lamin, 5.0),
        // Insufficient-sample extremes are reported as NoData in the
        // output map, per the output contract.
        lamax_10th_highest_day: stats::nth_highest(&day_lamax, 10).or_no_data(),
        lamax_10th_highest_night: stats::nth_highest(&night_lamax, 10).or_no_data(),
        la90_10th_lowest_day: stats::nth_lowest(&day_la90, 10).or_no_data(),
        la90_10th_lowest_night: stats::nth_lowest(&night_la90, 10).or_no_data(),
        // L-n is the level exceeded n% of the time: L10 -> p90, L50 -> p50,
        // L95 -> p5.
        l10_day: stats::percentile(&day_laeq, 90.0),
        l50_day: stats::percentile(&day_laeq, 50.0),
        l95_day: stats::percentile(&day_laeq, 5.0),
        l10_night: stats::percentile(&night_laeq, 90.0),
        l50_night: stats::percentile(&night_laeq, 50.0),
        l95_night: stats::percentile(&night_laeq, 5.0),
        lden: lden_value,
        ldn: ldn_value,
        laeq_std_day: stats::std_dev(&day_laeq),
        laeq_std_night: stats::std_dev(&night_laeq),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
