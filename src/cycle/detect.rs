//! Cycle boundaries (nullpoints) and per-cycle displacement maxima.

use crate::config::AnalyzerParams;

/// Indices where the force returns to baseline, one per cycle boundary.
///
/// A baseline window opens at the first sample with `y < baseline_threshold`
/// and closes at the first sample at or above the threshold, searched from
/// `lookahead_skip` samples past the opening. The nullpoint is the sample of
/// minimum displacement inside the window; scanning resumes `lookahead_skip`
/// samples after the window closes. A window still open at the end of the
/// signal is incomplete and dropped.
pub fn nullpoints(x: &[f64], y: &[f64], params: &AnalyzerParams) -> Vec<usize> {
    let n = x.len().min(y.len());
    let threshold = params.baseline_threshold;
    let skip = params.lookahead_skip;

    let mut out: Vec<usize> = Vec::new();
    let mut i = 0usize;
    while i < n {
        if y[i] < threshold {
            let mut j = i + skip;
            while j < n && y[j] < threshold {
                j += 1;
            }
            if j >= n {
                // Every later window would run off the end as well.
                break;
            }
            out.push(i + argmin(&x[i..j]));
            i = j + skip;
            continue;
        }
        i += 1;
    }
    out
}

/// Index of the largest displacement in each span `[nullpoints[k], nullpoints[k + 1])`.
pub fn cycle_maximums(x: &[f64], nullpoints: &[usize]) -> Vec<usize> {
    nullpoints
        .windows(2)
        .map(|w| w[0] + argmax(&x[w[0]..w[1]]))
        .collect()
}

pub fn is_valid(cycle_count: usize, params: &AnalyzerParams) -> bool {
    cycle_count > params.min_cycles
}

/// First index of the smallest value; 0 for an empty slice.
pub(crate) fn argmin(v: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &val) in v.iter().enumerate() {
        if val < v[best] {
            best = i;
        }
    }
    best
}

/// First index of the largest value; 0 for an empty slice.
pub(crate) fn argmax(v: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &val) in v.iter().enumerate() {
        if val > v[best] {
            best = i;
        }
    }
    best
}
