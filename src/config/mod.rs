use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PARAMS_TOML: &str = include_str!("../../config/default_params.toml");

/// Tunable constants of the cycle analysis.
///
/// Units follow the measurement: `y` in force units, `x` in displacement units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerParams {
    /// Force below which the signal is considered back at baseline.
    pub baseline_threshold: f64,
    /// Nullpoint scan: look-ahead offset into a baseline window, and the skip
    /// applied after a window closes (samples).
    pub lookahead_skip: usize,
    /// Number of samples preceding a cycle maximum searched for the force peak.
    pub envelope_window: usize,
    /// Evaluable only if the cycle count exceeds this.
    pub min_cycles: usize,
    /// Size of the uniform grid the reload spline is resampled onto.
    pub resample_points: usize,
    /// Reload spline smoothing factor; `None` uses the number of fitted samples.
    pub spline_smoothing: Option<f64>,
    /// Plastic energies above this are reported as implausible.
    pub plastic_warning_threshold: f64,
    /// Displacement spacing below which two samples are duplicates.
    pub near_duplicate_dx: f64,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            baseline_threshold: 5.0,
            lookahead_skip: 5,
            envelope_window: 10,
            min_cycles: 3,
            resample_points: 100,
            spline_smoothing: None,
            plastic_warning_threshold: 20.0,
            near_duplicate_dx: 1e-6,
        }
    }
}

impl AnalyzerParams {
    pub fn validate(&self) -> Result<()> {
        if !self.baseline_threshold.is_finite() {
            return Err(anyhow!("baseline_threshold must be finite"));
        }
        if self.lookahead_skip == 0 {
            return Err(anyhow!("lookahead_skip must be >= 1"));
        }
        if self.envelope_window == 0 {
            return Err(anyhow!("envelope_window must be >= 1"));
        }
        if self.resample_points < 2 {
            return Err(anyhow!("resample_points must be >= 2"));
        }
        if let Some(s) = self.spline_smoothing {
            if !s.is_finite() || s < 0.0 {
                return Err(anyhow!("spline_smoothing must be finite and >= 0"));
            }
        }
        if !self.plastic_warning_threshold.is_finite() {
            return Err(anyhow!("plastic_warning_threshold must be finite"));
        }
        if !(self.near_duplicate_dx.is_finite() && self.near_duplicate_dx > 0.0) {
            return Err(anyhow!("near_duplicate_dx must be finite and > 0"));
        }
        Ok(())
    }
}

pub fn parse_params_str(raw: &str, label: &str) -> Result<AnalyzerParams> {
    let params: AnalyzerParams =
        toml::from_str(raw).with_context(|| format!("invalid parameter file: {}", label))?;
    params
        .validate()
        .with_context(|| format!("invalid parameter value in {}", label))?;
    Ok(params)
}

pub fn read_params<P: AsRef<Path>>(path: P) -> Result<AnalyzerParams> {
    let path_ref = path.as_ref();
    let raw = fs::read_to_string(path_ref)
        .with_context(|| format!("failed to read parameter file: {}", path_ref.display()))?;
    let label = path_ref.display().to_string();
    parse_params_str(&raw, &label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let parsed = parse_params_str(DEFAULT_PARAMS_TOML, "embedded").unwrap();
        assert_eq!(parsed, AnalyzerParams::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let parsed = parse_params_str("baseline_threshold = 2.5\nspline_smoothing = 0.0\n", "inline")
            .unwrap();
        assert_eq!(parsed.baseline_threshold, 2.5);
        assert_eq!(parsed.spline_smoothing, Some(0.0));
        assert_eq!(parsed.envelope_window, 10);
        assert_eq!(parsed.min_cycles, 3);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(parse_params_str("baseline = 5.0\n", "inline").is_err());
        assert!(parse_params_str("resample_points = 1\n", "inline").is_err());
        assert!(parse_params_str("envelope_window = 0\n", "inline").is_err());
        assert!(parse_params_str("near_duplicate_dx = 0.0\n", "inline").is_err());
    }
}
