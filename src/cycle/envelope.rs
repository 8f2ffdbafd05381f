use crate::config::AnalyzerParams;
use crate::cycle::detect::argmax;
use crate::cycle::warning::AnalysisWarning;

/// True mechanical peak of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePoint {
    pub index: usize,
    pub force: f64,
    pub displacement: f64,
}

/// Per-cycle force peaks plus the displacement grid used for reporting.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// `None` where the search window was empty.
    pub points: Vec<Option<EnvelopePoint>>,
    /// One displacement per cycle; falls back to `x[cycle_maximum]` when the
    /// cycle has no envelope point.
    pub x_grid: Vec<f64>,
    pub warnings: Vec<AnalysisWarning>,
}

impl Envelope {
    /// Envelope points of cycles `0..=idx` that were found, in cycle order.
    pub fn curve_through(&self, idx: usize) -> (Vec<f64>, Vec<f64>) {
        self.points
            .iter()
            .take(idx + 1)
            .flatten()
            .map(|p| (p.force, p.displacement))
            .unzip()
    }
}

/// For each cycle, the force maximum in the `envelope_window` samples that
/// precede its displacement maximum (the maximum itself excluded).
pub fn extract(
    x: &[f64],
    y: &[f64],
    cycle_maximums: &[usize],
    params: &AnalyzerParams,
) -> Envelope {
    let mut env = Envelope {
        points: Vec::with_capacity(cycle_maximums.len()),
        x_grid: Vec::with_capacity(cycle_maximums.len()),
        warnings: Vec::new(),
    };
    for (cycle, &max_indent) in cycle_maximums.iter().enumerate() {
        let lo = max_indent.saturating_sub(params.envelope_window);
        if lo >= max_indent {
            env.warnings.push(AnalysisWarning::EmptyPeakWindow { cycle });
            env.points.push(None);
            env.x_grid.push(x[max_indent]);
            continue;
        }
        let index = lo + argmax(&y[lo..max_indent]);
        env.points.push(Some(EnvelopePoint {
            index,
            force: y[index],
            displacement: x[index],
        }));
        env.x_grid.push(x[index]);
    }
    env
}
