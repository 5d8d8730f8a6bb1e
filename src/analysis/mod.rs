/// Aggregation layer for the acoustic exposure metrics engine.
///
/// Submodules:
/// - `daily` — one descriptor row per reporting date.
/// - `overall` — whole-survey scalar descriptors, Lden and Ldn.
/// - `trend` — moving average, exceedance and anomaly detection over the
///   daily table.
///
/// `process` ties the layers together: classification, daily summary, and
/// overall metrics in one synchronous batch pass. There is no shared state
/// between invocations; two calls over the same input produce identical
/// results.

pub mod daily;
pub mod overall;
pub mod trend;

use crate::classify;
use crate::logging::{self, Source};
use crate::model::{Measurement, SurveyAnalysis};

/// Runs the full engine over a complete, already-loaded measurement set.
///
/// Rows with unparsable timestamps are excluded from every partition but
/// retained in the returned `records` pass-through view; nothing here ever
/// fails or drops a row.
pub fn process(measurements: Vec<Measurement>) -> SurveyAnalysis {
    let total = measurements.len();
    let records = classify::classify_all(measurements);

    let invalid = classify::count_unclassifiable(&records);
    if invalid > 0 {
        logging::warn(
            Source::Classify,
            None,
            &format!("{} of {} records have unparsable timestamps and join no partition", invalid, total),
        );
    }

    let daily = daily::daily_summary(&records);
    let overall = overall::overall_metrics(&records);
    logging::info(
        Source::Engine,
        None,
        &format!("Processed {} records into {} reporting dates", total, daily.len()),
    );

    SurveyAnalysis { records, daily, overall }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn measurement(day: u32, h: u32, laeq: f64) -> Measurement {
        let ts = NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(h, 0, 0);
        Measurement::new(ts, Some(laeq), None, None, None)
    }

    #[test]
    fn test_process_returns_full_result_shape() {
        let analysis = process(vec![
            measurement(1, 12, 55.0),
            measurement(1, 23, 45.0),
            measurement(2, 12, 57.0),
            Measurement::new(None, Some(99.0), None, None, None),
        ]);
        assert_eq!(analysis.records.len(), 4, "pass-through view keeps invalid rows");
        assert_eq!(analysis.daily.len(), 2);
        assert_eq!(analysis.overall.entries().len(), 22);
    }

    #[test]
    fn test_process_is_idempotent() {
        let input = vec![
            measurement(1, 12, 55.0),
            measurement(2, 2, 44.0),
            measurement(2, 19, 58.0),
        ];
        let first = process(input.clone());
        let second = process(input);
        assert_eq!(first, second, "the pipeline is a pure function of its input");
    }

    #[test]
    fn test_process_of_empty_input_is_empty_but_complete() {
        let analysis = process(Vec::new());
        assert!(analysis.records.is_empty());
        assert!(analysis.daily.is_empty());
        assert_eq!(
            analysis.overall.entries().len(),
            22,
            "even an empty survey reports the full metric set (all sentinels)"
        );
    }
}
