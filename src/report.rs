/// Rendering of analysis results for export and display.
///
/// The engine emits full-precision values; rounding happens only here, at
/// the display boundary. Formatting switches explicitly on the `LevelValue`
/// tag — there is exactly one place that decides how a sentinel renders,
/// and it is this module.

use std::fmt::Write as _;

use crate::model::{DailyDescriptor, LevelValue, OverallMetrics, SurveyAnalysis};

/// What a sentinel value looks like in rendered output. Distinct from a
/// zero and from a blank cell, by regulatory reporting convention.
pub const NO_DATA_LABEL: &str = "No Data";

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Formats one computed value for display: numerics rounded to `decimals`
/// places, both sentinels as the "No Data" label.
pub fn format_level(value: LevelValue, decimals: usize) -> String {
    match value {
        LevelValue::Numeric(v) => format!("{:.*}", decimals, v),
        LevelValue::NoData | LevelValue::Absent => NO_DATA_LABEL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

/// Renders the per-date summary as an aligned plain-text table.
pub fn render_daily_table(daily: &[DailyDescriptor], decimals: usize) -> String {
    let headers = [
        "Date", "LAeq Day", "LAeq Night", "LAmax Day", "LAmax Night",
        "LA90 Day", "LA90 Night", "LAmin Day", "LAmin Night",
    ];
    let mut out = String::new();
    let mut line = String::new();
    for h in headers {
        let _ = write!(line, "{:>12}", h);
    }
    out.push_str(&line);
    out.push('\n');

    for row in daily {
        let cells = [
            row.date.format("%Y-%m-%d").to_string(),
            format_level(row.laeq_day, decimals),
            format_level(row.laeq_night, decimals),
            format_level(row.lamax_day, decimals),
            format_level(row.lamax_night, decimals),
            format_level(row.la90_day, decimals),
            format_level(row.la90_night, decimals),
            format_level(row.lamin_day, decimals),
            format_level(row.lamin_night, decimals),
        ];
        let mut line = String::new();
        for cell in cells {
            let _ = write!(line, "{:>12}", cell);
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders the overall metrics as "name: value" lines, in contract order.
pub fn render_overall(overall: &OverallMetrics, decimals: usize) -> String {
    let mut out = String::new();
    for (name, value) in overall.entries() {
        let _ = writeln!(out, "{}: {}", name, format_level(value, decimals));
    }
    out
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Serializes a full analysis to pretty-printed JSON for the export
/// collaborators. Values are full precision; sentinels render as the
/// "No Data" string.
pub fn to_json(analysis: &SurveyAnalysis) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(analysis)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::model::Measurement;
    use chrono::NaiveDate;

    fn analysis_fixture() -> SurveyAnalysis {
        let ts = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(h, 0, 0)
        };
        analysis::process(vec![
            Measurement::new(ts(1, 12), Some(55.0), Some(78.0), Some(44.5), Some(39.0)),
            Measurement::new(ts(1, 13), Some(57.0), Some(80.0), Some(44.5), Some(38.0)),
            Measurement::new(ts(2, 0), Some(45.0), Some(60.0), Some(40.0), Some(35.0)),
        ])
    }

    #[test]
    fn test_format_level_rounds_numerics() {
        assert_eq!(format_level(LevelValue::Numeric(54.96), 1), "55.0");
        assert_eq!(format_level(LevelValue::Numeric(54.96), 0), "55");
        assert_eq!(format_level(LevelValue::Numeric(54.9649), 2), "54.96");
    }

    #[test]
    fn test_format_level_renders_both_sentinels_as_no_data() {
        assert_eq!(format_level(LevelValue::NoData, 1), "No Data");
        assert_eq!(format_level(LevelValue::Absent, 1), "No Data");
    }

    #[test]
    fn test_daily_table_has_one_line_per_date_plus_header() {
        let analysis = analysis_fixture();
        let table = render_daily_table(&analysis.daily, 1);
        assert_eq!(table.lines().count(), 1 + analysis.daily.len());
        assert!(table.contains("2024-03-01"));
        assert!(table.contains("No Data"), "empty partitions must render as No Data");
    }

    #[test]
    fn test_overall_rendering_covers_every_metric() {
        let analysis = analysis_fixture();
        let rendered = render_overall(&analysis.overall, 1);
        assert_eq!(rendered.lines().count(), 22);
        assert!(rendered.contains("Lden (Day-Evening-Night): No Data"));
        assert!(rendered.contains("Overall LAeq Day: "));
    }

    #[test]
    fn test_json_export_renders_sentinels_distinctly() {
        let analysis = analysis_fixture();
        let json = to_json(&analysis).expect("analysis must serialize");
        assert!(json.contains("\"No Data\""));
        assert!(json.contains("\"daily\""));
        assert!(json.contains("\"overall\""));
        assert!(json.contains("\"records\""));
    }
}
