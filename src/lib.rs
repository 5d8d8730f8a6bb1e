//! Acoustic exposure metrics engine for environmental noise surveys.
//!
//! Takes a complete, already-loaded set of time-stamped sound level
//! measurements (LAeq plus optional LAmax/LA90/LAmin per sampling
//! interval) and produces regulatory-style exposure descriptors: per-day
//! and whole-survey equivalent levels, percentile levels, extreme-order
//! statistics, and the Lden/Ldn day-evening-night composites.
//!
//! The engine is a pure batch computation: single-threaded, synchronous,
//! no I/O, no shared state between invocations. Absence of data never
//! raises an error — it degrades to explicit "No Data" sentinels that
//! downstream reporting renders distinctly.
//!
//! Spreadsheet parsing, document generation, persistence, and plotting are
//! external collaborators; this crate's boundary is the in-memory
//! `Measurement` input and the `SurveyAnalysis` output.

pub mod analysis;
pub mod classify;
pub mod logging;
pub mod model;
pub mod report;
pub mod settings;
pub mod stats;

pub use analysis::process;
pub use model::{
    ClassifiedMeasurement, DailyDescriptor, LevelValue, Measurement, OverallMetrics,
    SurveyAnalysis,
};
