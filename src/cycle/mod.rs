pub mod analyzer;
pub mod detect;
pub mod envelope;
pub mod measurement;
pub mod warning;

#[cfg(test)]
pub(crate) mod synthetic;

pub use analyzer::{
    analyze_measurement, Classification, CycleAnalyzer, CycleIntegrals, CyclePoints, CycleRecord,
    EnergyResult, MeasurementReport, Quantity, Segmentation,
};
pub use envelope::{Envelope, EnvelopePoint};
pub use measurement::Measurement;
pub use warning::AnalysisWarning;
