/// Core data types for the acoustic exposure metrics engine.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no computation beyond trivial accessors — classification lives
/// in `classify`, reductions live in `stats` and `analysis`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Measurement types
// ---------------------------------------------------------------------------

/// A single sampling-interval record from a sound level meter.
///
/// Produced by an external loader (spreadsheet/CSV parsing is not this
/// crate's concern). Malformed timestamps and missing level fields must
/// already be normalized to `None` by the caller; the engine never parses
/// raw text. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Sample timestamp. `None` means the source row's date/time could not
    /// be parsed; the record is excluded from period and date partitioning
    /// but retained in the full-data pass-through view.
    pub timestamp: Option<NaiveDateTime>,
    /// Equivalent continuous level over the sampling interval, dB(A).
    pub laeq: Option<f64>,
    /// Maximum instantaneous level within the interval, dB(A).
    pub lamax: Option<f64>,
    /// Background level (exceeded 90% of the interval), dB(A).
    pub la90: Option<f64>,
    /// Minimum instantaneous level within the interval, dB(A).
    pub lamin: Option<f64>,
}

impl Measurement {
    pub fn new(
        timestamp: Option<NaiveDateTime>,
        laeq: Option<f64>,
        lamax: Option<f64>,
        la90: Option<f64>,
        lamin: Option<f64>,
    ) -> Self {
        Self { timestamp, laeq, lamax, la90, lamin }
    }
}

// ---------------------------------------------------------------------------
// Period classification labels
// ---------------------------------------------------------------------------

/// Two-way daytime/night-time split used for the daily and overall
/// descriptors. Night-time runs from 23:00:00 (inclusive) to 07:00:00
/// (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimplePeriod {
    Daytime,
    NightTime,
    /// Timestamp was unparsable; the record belongs to no period.
    Unknown,
}

/// Three-way day/evening/night split used only for the Lden composite.
/// Day is [07:00, 19:00), evening [19:00, 23:00), night the remainder
/// (wrapping midnight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LdenPeriod {
    Day,
    Evening,
    Night,
    Unknown,
}

// ---------------------------------------------------------------------------
// Classified measurement
// ---------------------------------------------------------------------------

/// A `Measurement` enriched with derived classification fields.
///
/// Every derived field is a pure function of `measurement.timestamp` (or of
/// `measurement.laeq` for the integrated column), computed exactly once by
/// `classify::classify` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedMeasurement {
    #[serde(flatten)]
    pub measurement: Measurement,
    pub period_simple: SimplePeriod,
    pub period_lden: LdenPeriod,
    /// Calendar date this sample is attributed to after the 07:00 rollover
    /// rule. `None` if the timestamp is unparsable.
    pub reporting_date: Option<NaiveDate>,
    /// Linear power equivalent of `laeq` (`10^(laeq/10)`), precomputed so
    /// the daily aggregator averages in the energy domain without
    /// re-converting per row.
    pub integrated_laeq: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tagged result values
// ---------------------------------------------------------------------------

/// The result of any statistical reduction.
///
/// Regulatory reports must show "No Data" for an empty partition rather
/// than a zero or a blank, so absence is carried as an explicit tag instead
/// of a magic number. `Absent` is the distinct insufficient-samples case
/// for nth-order statistics (fewer than n values exist); downstream
/// rendering shows both sentinels the same way, but callers can tell them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelValue {
    Numeric(f64),
    NoData,
    Absent,
}

impl LevelValue {
    /// The numeric value, if one exists.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            LevelValue::Numeric(v) => Some(v),
            LevelValue::NoData | LevelValue::Absent => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, LevelValue::Numeric(_))
    }

    /// Collapses `Absent` into `NoData` for the overall metrics map, where
    /// the output contract reports both the same way.
    pub fn or_no_data(self) -> LevelValue {
        match self {
            LevelValue::Absent => LevelValue::NoData,
            other => other,
        }
    }
}

impl From<Option<f64>> for LevelValue {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(x) => LevelValue::Numeric(x),
            None => LevelValue::NoData,
        }
    }
}

/// Serialized as the bare number, or the string `"No Data"` for either
/// sentinel — the shape the export collaborators consume.
impl Serialize for LevelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LevelValue::Numeric(v) => serializer.serialize_f64(*v),
            LevelValue::NoData | LevelValue::Absent => serializer.serialize_str("No Data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// One output row per distinct reporting date: day and night descriptors.
///
/// A date whose day (or night) partition holds no valid samples still gets
/// a row, with `NoData` standing in for the affected descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDescriptor {
    pub date: NaiveDate,
    pub laeq_day: LevelValue,
    pub laeq_night: LevelValue,
    pub lamax_day: LevelValue,
    pub lamax_night: LevelValue,
    pub la90_day: LevelValue,
    pub la90_night: LevelValue,
    pub lamin_day: LevelValue,
    pub lamin_night: LevelValue,
}

/// The full overall descriptor set computed across the entire survey.
///
/// `entries()` flattens this into the ordered name → value map of the
/// output contract; serialization uses that map shape, so exports carry
/// the report headings rather than field names.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallMetrics {
    pub laeq_day: LevelValue,
    pub laeq_night: LevelValue,
    pub lamax_day: LevelValue,
    pub lamax_night: LevelValue,
    pub la90_day: LevelValue,
    pub la90_night: LevelValue,
    pub lamin_day: LevelValue,
    pub lamin_night: LevelValue,
    /// 10th-highest LAmax, day/night. `NoData` if fewer than ten samples.
    pub lamax_10th_highest_day: LevelValue,
    pub lamax_10th_highest_night: LevelValue,
    /// 10th-lowest LA90, day/night. `NoData` if fewer than ten samples.
    pub la90_10th_lowest_day: LevelValue,
    pub la90_10th_lowest_night: LevelValue,
    /// Percentile levels of LAeq. L-n is the level exceeded n% of the time,
    /// so L10 is the 90th percentile of the distribution, L95 the 5th.
    pub l10_day: LevelValue,
    pub l50_day: LevelValue,
    pub l95_day: LevelValue,
    pub l10_night: LevelValue,
    pub l50_night: LevelValue,
    pub l95_night: LevelValue,
    /// Day-evening-night composite with +5/+10 dB annoyance penalties.
    pub lden: LevelValue,
    /// Day-night composite with the +10 dB night penalty.
    pub ldn: LevelValue,
    /// Sample standard deviation of LAeq, day/night.
    pub laeq_std_day: LevelValue,
    pub laeq_std_night: LevelValue,
}

impl OverallMetrics {
    /// The overall metrics as an ordered list of (name, value) pairs.
    /// Names match the headings used in survey reports.
    pub fn entries(&self) -> Vec<(&'static str, LevelValue)> {
        vec![
            ("Overall LAeq Day", self.laeq_day),
            ("Overall LAeq Night", self.laeq_night),
            ("Overall LAmax Day", self.lamax_day),
            ("Overall LAmax Night", self.lamax_night),
            ("Overall LA90 Day", self.la90_day),
            ("Overall LA90 Night", self.la90_night),
            ("Overall LAmin Day", self.lamin_day),
            ("Overall LAmin Night", self.lamin_night),
            ("10th Highest Lmax Day", self.lamax_10th_highest_day),
            ("10th Highest Lmax Night", self.lamax_10th_highest_night),
            ("10th Lowest L90 Day", self.la90_10th_lowest_day),
            ("10th Lowest L90 Night", self.la90_10th_lowest_night),
            ("Overall L10 Day", self.l10_day),
            ("Overall L50 Day", self.l50_day),
            ("Overall L95 Day", self.l95_day),
            ("Overall L10 Night", self.l10_night),
            ("Overall L50 Night", self.l50_night),
            ("Overall L95 Night", self.l95_night),
            ("Lden (Day-Evening-Night)", self.lden),
            ("Ldn (Day-Night)", self.ldn),
            ("Overall LAeq Std Day", self.laeq_std_day),
            ("Overall LAeq Std Night", self.laeq_std_night),
        ]
    }
}

impl Serialize for OverallMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in entries {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// The complete result of one processing run: the classified pass-through
/// view (every input row, including ones with unparsable timestamps), the
/// per-date summary table, and the overall metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyAnalysis {
    pub records: Vec<ClassifiedMeasurement>,
    pub daily: Vec<DailyDescriptor>,
    pub overall: OverallMetrics,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_value_as_f64() {
        assert_eq!(LevelValue::Numeric(55.0).as_f64(), Some(55.0));
        assert_eq!(LevelValue::NoData.as_f64(), None);
        assert_eq!(LevelValue::Absent.as_f64(), None);
    }

    #[test]
    fn test_absent_collapses_to_no_data_for_reporting() {
        assert_eq!(LevelValue::Absent.or_no_data(), LevelValue::NoData);
        assert_eq!(LevelValue::NoData.or_no_data(), LevelValue::NoData);
        assert_eq!(
            LevelValue::Numeric(61.2).or_no_data(),
            LevelValue::Numeric(61.2),
            "numeric values must pass through or_no_data unchanged"
        );
    }

    #[test]
    fn test_level_value_from_option() {
        assert_eq!(LevelValue::from(Some(48.5)), LevelValue::Numeric(48.5));
        assert_eq!(LevelValue::from(None), LevelValue::NoData);
    }

    #[test]
    fn test_level_value_serializes_sentinels_as_no_data_string() {
        let json = serde_json::to_string(&LevelValue::NoData).unwrap();
        assert_eq!(json, "\"No Data\"");
        let json = serde_json::to_string(&LevelValue::Absent).unwrap();
        assert_eq!(json, "\"No Data\"");
        let json = serde_json::to_string(&LevelValue::Numeric(54.5)).unwrap();
        assert_eq!(json, "54.5");
    }

    #[test]
    fn test_overall_entries_cover_every_metric_exactly_once() {
        let metrics = OverallMetrics {
            laeq_day: LevelValue::NoData,
            laeq_night: LevelValue::NoData,
            lamax_day: LevelValue::NoData,
            lamax_night: LevelValue::NoData,
            la90_day: LevelValue::NoData,
            la90_night: LevelValue::NoData,
            lamin_day: LevelValue::NoData,
            lamin_night: LevelValue::NoData,
            lamax_10th_highest_day: LevelValue::NoData,
            lamax_10th_highest_night: LevelValue::NoData,
            la90_10th_lowest_day: LevelValue::NoData,
            la90_10th_lowest_night: LevelValue::NoData,
            l10_day: LevelValue::NoData,
            l50_day: LevelValue::NoData,
            l95_day: LevelValue::NoData,
            l10_night: LevelValue::NoData,
            l50_night: LevelValue::NoData,
            l95_night: LevelValue::NoData,
            lden: LevelValue::NoData,
            ldn: LevelValue::NoData,
            laeq_std_day: LevelValue::NoData,
            laeq_std_night: LevelValue::NoData,
        };
        let entries = metrics.entries();
        assert_eq!(entries.len(), 22, "output contract defines 22 overall metrics");
        let mut seen = std::collections::HashSet::new();
        for (name, _) in &entries {
            assert!(seen.insert(*name), "duplicate metric name '{}' in entries()", name);
        }
    }
}
