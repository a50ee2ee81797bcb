//! Developer Tooling: flight recorder and telemetry summaries.
//!
//! # Invariants
//! - Tools only observe; recording a flight never changes it.

mod recorder;

pub use recorder::{FlightRecorder, FlightSample, FlightSummary, RecorderError};
