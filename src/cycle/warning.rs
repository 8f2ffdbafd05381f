use thiserror::Error;

/// Data-quality findings raised while analysing one measurement.
///
/// These never abort the analysis; they are collected in the report and
/// logged with the measurement name by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisWarning {
    #[error("cycle {cycle}: empty force-peak search window before the cycle maximum")]
    EmptyPeakWindow { cycle: usize },

    #[error("cycle {cycle}: reload never reaches the cycle's peak displacement")]
    NoReloadCrossing { cycle: usize },

    #[error("cycle {cycle}: reload segment has too few distinct displacement samples for a spline")]
    DegenerateReloadSegment { cycle: usize },

    #[error("cycle {cycle}: implausible plastic energy {value:.3}")]
    ImplausiblePlastic { cycle: usize, value: f64 },
}

impl AnalysisWarning {
    pub fn cycle(&self) -> usize {
        match self {
            Self::EmptyPeakWindow { cycle }
            | Self::NoReloadCrossing { cycle }
            | Self::DegenerateReloadSegment { cycle }
            | Self::ImplausiblePlastic { cycle, .. } => *cycle,
        }
    }
}
