/// Period classification and reporting-date bucketing.
///
/// All functions here are pure and total over `Option<NaiveDateTime>`:
/// a missing timestamp classifies as `Unknown` / `None` rather than
/// erroring, so one bad row never aborts a survey run.
///
/// # Clock boundaries
/// The daytime/night-time split and the day/evening/night split both hinge
/// on fixed clock times (07:00, 19:00, 23:00). These are regulatory
/// conventions, not configuration — they are deliberately hardcoded.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::model::{ClassifiedMeasurement, LdenPeriod, Measurement, SimplePeriod};
use crate::stats::db_to_power;

// ---------------------------------------------------------------------------
// Clock-time boundaries
// ---------------------------------------------------------------------------
// All period boundaries fall on whole hours, so classification compares the
// hour-of-day directly. This makes the 23:00:00-inclusive / 07:00:00-
// inclusive boundary semantics exact with no sub-second edge cases.

/// Hour starting the daytime period and a new reporting date.
const DAY_START_HOUR: u32 = 7;
/// Hour starting the evening period in the Lden partition.
const EVENING_START_HOUR: u32 = 19;
/// Hour starting the night-time period.
const NIGHT_START_HOUR: u32 = 23;

// ---------------------------------------------------------------------------
// Period classification
// ---------------------------------------------------------------------------

/// Classifies a timestamp into the two-way daytime/night-time partition.
///
/// Night-time is clock time >= 23:00:00 or < 07:00:00; exactly 23:00:00 is
/// night-time, exactly 07:00:00 is daytime.
pub fn classify_simple(timestamp: Option<NaiveDateTime>) -> SimplePeriod {
    match timestamp {
        None => SimplePeriod::Unknown,
        Some(dt) => {
            let h = dt.hour();
            if h >= NIGHT_START_HOUR || h < DAY_START_HOUR {
                SimplePeriod::NightTime
            } else {
                SimplePeriod::Daytime
            }
        }
    }
}

/// Classifies a timestamp into the three-way Lden partition:
/// day [07:00, 19:00), evening [19:00, 23:00), night the rest.
pub fn classify_lden(timestamp: Option<NaiveDateTime>) -> LdenPeriod {
    match timestamp {
        None => LdenPeriod::Unknown,
        Some(dt) => {
            let h = dt.hour();
            if (DAY_START_HOUR..EVENING_START_HOUR).contains(&h) {
                LdenPeriod::Day
            } else if (EVENING_START_HOUR..NIGHT_START_HOUR).contains(&h) {
                LdenPeriod::Evening
            } else {
                LdenPeriod::Night
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting-date bucketing
// ---------------------------------------------------------------------------

/// Maps a timestamp to its reporting date.
///
/// Samples taken after midnight but before 07:00 belong to the previous
/// day's night period, so clock times below 07:00 attach to the previous
/// calendar date.
///
/// A survey whose very first samples fall before 07:00 therefore produces
/// a reporting date with only a partial night segment and no daytime data.
/// That is the documented convention, not a bug — do not special-case the
/// first day.
pub fn bucket_date(timestamp: Option<NaiveDateTime>) -> Option<NaiveDate> {
    let dt = timestamp?;
    if dt.hour() < DAY_START_HOUR {
        Some((dt - Duration::days(1)).date())
    } else {
        Some(dt.date())
    }
}

// ---------------------------------------------------------------------------
// Full classification
// ---------------------------------------------------------------------------

/// Derives every classification field for one measurement.
///
/// This is the single place where `laeq` is converted to linear power;
/// downstream aggregation reuses `integrated_laeq` rather than converting
/// again, so the daily and overall figures cannot drift apart.
pub fn classify(measurement: Measurement) -> ClassifiedMeasurement {
    let period_simple = classify_simple(measurement.timestamp);
    let period_lden = classify_lden(measurement.timestamp);
    let reporting_date = bucket_date(measurement.timestamp);
    let integrated_laeq = measurement.laeq.map(db_to_power);
    ClassifiedMeasurement {
        measurement,
        period_simple,
        period_lden,
        reporting_date,
        integrated_laeq,
    }
}

/// Classifies a whole batch, preserving input order. Rows with unparsable
/// timestamps are kept (classified `Unknown`), never dropped.
pub fn classify_all(measurements: Vec<Measurement>) -> Vec<ClassifiedMeasurement> {
    measurements.into_iter().map(classify).collect()
}

/// Counts records whose timestamp could not be classified. Used by the
/// pipeline for run-summary logging.
pub fn count_unclassifiable(records: &[ClassifiedMeasurement]) -> usize {
    records
        .iter()
        .filter(|r| r.measurement.timestamp.is_none())
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
