/// Per-reporting-date aggregation.
///
/// For each distinct reporting date, partition that date's samples into
/// daytime and night-time and reduce each partition to the four standard
/// descriptors. Every date present in the input produces exactly one row;
/// a period with no valid samples yields `NoData`, never a zero and never
/// an omitted row.

use chrono::NaiveDate;

use crate::model::{ClassifiedMeasurement, DailyDescriptor, LevelValue, SimplePeriod};
use crate::stats;

// ---------------------------------------------------------------------------
// Column extraction helpers
// ---------------------------------------------------------------------------

/// Collects the non-missing values of one level column from a filtered
/// record subset.
fn column<'a, I, F>(records: I, field: F) -> Vec<f64>
where
    I: IntoIterator<Item = &'a ClassifiedMeasurement>,
    F: Fn(&ClassifiedMeasurement) -> Option<f64>,
{
    records.into_iter().filter_map(field).collect()
}

/// The four descriptors for one period subset of one date.
fn reduce_period(subset: &[&ClassifiedMeasurement]) -> (LevelValue, LevelValue, LevelValue, LevelValue) {
    // Daily LAeq reduces the precomputed linear-power column; the classifier
    // is the only place the dB->power conversion happens.
    let powers = column(subset.iter().copied(), |r| r.integrated_laeq);
    let laeq = stats::average_powers(&powers);

    let lamax = stats::percentile(&column(subset.iter().copied(), |r| r.measurement.lamax), 95.0);
    let la90 = stats::mode(&column(subset.iter().copied(), |r| r.measurement.la90));
    let lamin = stats::percentile(&column(subset.iter().copied(), |r| r.measurement.lamin), 5.0);
    (laeq, lamax, la90, lamin)
}

// ---------------------------------------------------------------------------
// Daily summary
// ---------------------------------------------------------------------------

/// Builds the per-date summary table, one `DailyDescriptor` per distinct
/// reporting date, sorted ascending. Records with an unparsable timestamp
/// have no reporting date and contribute to no row.
pub fn daily_summary(records: &[ClassifiedMeasurement]) -> Vec<DailyDescriptor> {
    let mut dates: Vec<NaiveDate> = records.iter().filter_map(|r| r.reporting_date).collect();
    dates.sort();
    dates.dedup();

    dates
        .into_iter()
        .map(|date| {
            let day: Vec<&ClassifiedMeasurement> = records
                .iter()
                .filter(|r| r.reporting_date == Some(date) && r.period_simple == SimplePeriod::Daytime)
                .collect();
            let night: Vec<&ClassifiedMeasurement> = records
                .iter()
                .filter(|r| r.reporting_date == Some(date) && r.period_simple == SimplePeriod::NightTime)
                .collect();

            let (laeq_day, lamax_day, la90_day, lamin_day) = reduce_period(&day);
            let (laeq_night, lamax_night, la90_night, lamin_night) = reduce_period(&night);

            DailyDescriptor {
                date,
                laeq_day,
                laeq_night,
                lamax_day,
                lamax_night,
                la90_day,
                la90_night,
                lamin_day,
                lamin_night,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
