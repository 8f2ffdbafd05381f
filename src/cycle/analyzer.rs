use crate::config::AnalyzerParams;
use crate::cycle::detect;
use crate::cycle::envelope::{self, Envelope};
use crate::cycle::measurement::Measurement;
use crate::cycle::warning::AnalysisWarning;
use crate::numeric::integrate::{linspace, simpson};
use crate::numeric::spline::SmoothingSpline;
use log::debug;

/// Sample indices bounding one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePoints {
    /// Opening nullpoint.
    pub min1: usize,
    /// Displacement maximum of the cycle.
    pub max_indent: usize,
    /// Closing nullpoint.
    pub min2: usize,
    /// First sample at or after `min2` reaching `x[max_indent]` again.
    pub max_indent2: usize,
}

#[derive(Debug, Clone)]
pub struct Segmentation {
    pub nullpoints: Vec<usize>,
    pub cycle_maximums: Vec<usize>,
    pub envelope: Envelope,
}

impl Segmentation {
    pub fn cycle_count(&self) -> usize {
        self.cycle_maximums.len()
    }
}

#[derive(Debug, Clone)]
pub enum Classification {
    Evaluable(Segmentation),
    /// Too few cycles, e.g. a calibration run.
    NotEvaluable { cycle_count: usize },
}

/// Raw work integrals of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleIntegrals {
    pub loading: f64,
    pub unloading: f64,
    pub reloading: f64,
    /// Along the envelope curve from the first cycle through this one.
    pub total: f64,
}

impl CycleIntegrals {
    pub fn energies(&self) -> EnergyResult {
        EnergyResult {
            elastic: -self.unloading,
            plastic: self.loading - self.reloading,
            friction: self.reloading + self.unloading,
            plastic_total: self.total - self.reloading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyResult {
    pub elastic: f64,
    pub plastic: f64,
    pub friction: f64,
    pub plastic_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Elastic,
    Plastic,
    Friction,
    PlasticTotal,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::Elastic,
        Quantity::Plastic,
        Quantity::Friction,
        Quantity::PlasticTotal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Quantity::Elastic => "elastic",
            Quantity::Plastic => "plastic",
            Quantity::Friction => "friction",
            Quantity::PlasticTotal => "plastic_total",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Quantity::Elastic => "Elastic",
            Quantity::Plastic => "Plastic",
            Quantity::Friction => "Friction",
            Quantity::PlasticTotal => "Plastic total",
        }
    }
}

impl EnergyResult {
    pub fn get(&self, q: Quantity) -> f64 {
        match q {
            Quantity::Elastic => self.elastic,
            Quantity::Plastic => self.plastic,
            Quantity::Friction => self.friction,
            Quantity::PlasticTotal => self.plastic_total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub cycle: usize,
    pub x_grid: f64,
    pub integrals: CycleIntegrals,
    pub energy: EnergyResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementReport {
    pub name: String,
    pub cycle_count: usize,
    /// Evaluated cycles only; skipped cycles appear in `warnings`.
    pub cycles: Vec<CycleRecord>,
    pub warnings: Vec<AnalysisWarning>,
}

impl MeasurementReport {
    pub fn x_grid(&self) -> Vec<f64> {
        self.cycles.iter().map(|c| c.x_grid).collect()
    }

    pub fn series(&self, q: Quantity) -> Vec<f64> {
        self.cycles.iter().map(|c| c.energy.get(q)).collect()
    }
}

pub struct CycleAnalyzer<'a> {
    measurement: &'a Measurement,
    params: &'a AnalyzerParams,
}

impl<'a> CycleAnalyzer<'a> {
    pub fn new(measurement: &'a Measurement, params: &'a AnalyzerParams) -> Self {
        Self {
            measurement,
            params,
        }
    }

    pub fn analyse(&self) -> Classification {
        let x = self.measurement.x();
        let y = self.measurement.y();

        let nullpoints = detect::nullpoints(x, y, self.params);
        let cycle_maximums = detect::cycle_maximums(x, &nullpoints);
        let cycle_count = cycle_maximums.len();
        if !detect::is_valid(cycle_count, self.params) {
            debug!(
                "{}: {} cycle(s), not evaluable",
                self.measurement.name(),
                cycle_count
            );
            return Classification::NotEvaluable { cycle_count };
        }

        let envelope = envelope::extract(x, y, &cycle_maximums, self.params);
        debug!(
            "{}: {} nullpoints, {} cycles",
            self.measurement.name(),
            nullpoints.len(),
            cycle_count
        );
        Classification::Evaluable(Segmentation {
            nullpoints,
            cycle_maximums,
            envelope,
        })
    }

    /// `None` when `idx` is out of range or the signal ends before the
    /// reload reaches the cycle's peak displacement.
    pub fn cycle_points(&self, seg: &Segmentation, idx: usize) -> Option<CyclePoints> {
        let x = self.measurement.x();
        let max_indent = *seg.cycle_maximums.get(idx)?;
        let min1 = seg.nullpoints[idx];
        let min2 = seg.nullpoints[idx + 1];
        let target = x[max_indent];
        let max_indent2 = (min2..x.len()).find(|&k| x[k] >= target)?;
        Some(CyclePoints {
            min1,
            max_indent,
            min2,
            max_indent2,
        })
    }

    pub fn evaluate_cycle(
        &self,
        seg: &Segmentation,
        idx: usize,
    ) -> Result<CycleIntegrals, AnalysisWarning> {
        let x = self.measurement.x();
        let y = self.measurement.y();
        let CyclePoints {
            min1,
            max_indent,
            min2,
            max_indent2,
        } = self
            .cycle_points(seg, idx)
            .ok_or(AnalysisWarning::NoReloadCrossing { cycle: idx })?;

        let loading = simpson(&y[min1..=max_indent], &x[min1..=max_indent]);
        let unloading = simpson(&y[max_indent..=min2], &x[max_indent..=min2]);

        // The reload crossing rarely lands on x[max_indent] exactly, so the
        // reload is integrated on a spline resampled up to x[max_indent].
        let spline = SmoothingSpline::fit(
            &x[min2..=max_indent2],
            &y[min2..=max_indent2],
            self.params.spline_smoothing,
            self.params.near_duplicate_dx,
        )
        .filter(|s| s.knots().len() >= 2)
        .ok_or(AnalysisWarning::DegenerateReloadSegment { cycle: idx })?;
        let xs = linspace(x[min2], x[max_indent], self.params.resample_points);
        let ys: Vec<f64> = xs.iter().map(|&v| spline.eval(v)).collect();
        let reloading = simpson(&ys, &xs);

        let (env_y, env_x) = seg.envelope.curve_through(idx);
        let total = simpson(&env_y, &env_x);

        Ok(CycleIntegrals {
            loading,
            unloading,
            reloading,
            total,
        })
    }

    pub fn evaluate_all(&self, seg: &Segmentation) -> MeasurementReport {
        let mut warnings = seg.envelope.warnings.clone();
        let mut cycles: Vec<CycleRecord> = Vec::with_capacity(seg.cycle_count());
        for idx in 0..seg.cycle_count() {
            match self.evaluate_cycle(seg, idx) {
                Ok(integrals) => {
                    let energy = integrals.energies();
                    if energy.plastic > self.params.plastic_warning_threshold {
                        warnings.push(AnalysisWarning::ImplausiblePlastic {
                            cycle: idx,
                            value: energy.plastic,
                        });
                    }
                    cycles.push(CycleRecord {
                        cycle: idx,
                        x_grid: seg.envelope.x_grid[idx],
                        integrals,
                        energy,
                    });
                }
                Err(w) => warnings.push(w),
            }
        }
        warnings.sort_by_key(|w| w.cycle());

        MeasurementReport {
            name: self.measurement.name().to_string(),
            cycle_count: seg.cycle_count(),
            cycles,
            warnings,
        }
    }
}

/// Full analysis of one measurement; `None` if it is not evaluable.
pub fn analyze_measurement(
    measurement: &Measurement,
    params: &AnalyzerParams,
) -> Option<MeasurementReport> {
    let analyzer = CycleAnalyzer::new(measurement, params);
    match analyzer.analyse() {
        Classification::Evaluable(seg) => Some(analyzer.evaluate_all(&seg)),
        Classification::NotEvaluable { .. } => None,
    }
}
