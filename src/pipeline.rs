use crate::config::AnalyzerParams;
use crate::cycle::{Classification, CycleAnalyzer, Measurement};
use crate::io::discover::find_measurements;
use crate::io::measurement::{read_measurement, ColumnLayout};
use crate::plot::plot_energies;
use crate::report::write_energy_tables;
use anyhow::{anyhow, Result};
use log::{error, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: PathBuf,
    pub filename: Option<String>,
    pub extension: String,
    pub dest: PathBuf,
    pub layout: ColumnLayout,
    pub plot: bool,
    pub save_txt: bool,
    pub params: AnalyzerParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub evaluated: usize,
    pub not_evaluable: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Evaluated,
    NotEvaluable,
    Failed,
}

/// Analyses every matching measurement file independently. Runs on the
/// current rayon pool; a failing file is logged and counted, never fatal.
pub fn run(cfg: &PipelineConfig) -> Result<BatchSummary> {
    let files = find_measurements(&cfg.source, cfg.filename.as_deref(), &cfg.extension)?;
    if files.is_empty() {
        return Err(anyhow!(
            "no *.{} measurement files in {}",
            cfg.extension,
            cfg.source.display()
        ));
    }
    info!(
        "analysing {} measurement file(s) from {}",
        files.len(),
        cfg.source.display()
    );

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .enumerate()
        .map(|(i, path)| match process_file(cfg, i + 1, path) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{}: {:#}", path.display(), e);
                FileOutcome::Failed
            }
        })
        .collect();

    let mut summary = BatchSummary {
        files: files.len(),
        ..BatchSummary::default()
    };
    for o in outcomes {
        match o {
            FileOutcome::Evaluated => summary.evaluated += 1,
            FileOutcome::NotEvaluable => summary.not_evaluable += 1,
            FileOutcome::Failed => summary.failed += 1,
        }
    }

    println!(
        "files={} evaluated={} not_evaluable={} failed={}",
        summary.files, summary.evaluated, summary.not_evaluable, summary.failed
    );
    Ok(summary)
}

fn process_file(cfg: &PipelineConfig, figure_id: usize, path: &Path) -> Result<FileOutcome> {
    let measurement = read_measurement(path, &cfg.layout)?;
    report_near_duplicates(&measurement, cfg.params.near_duplicate_dx);

    let analyzer = CycleAnalyzer::new(&measurement, &cfg.params);
    let seg = match analyzer.analyse() {
        Classification::Evaluable(seg) => seg,
        Classification::NotEvaluable { cycle_count } => {
            info!(
                "{}: {} cycle(s) detected, not evaluable; skipped",
                measurement.name(),
                cycle_count
            );
            return Ok(FileOutcome::NotEvaluable);
        }
    };

    let report = analyzer.evaluate_all(&seg);
    for w in &report.warnings {
        warn!("{}: {}", report.name, w);
    }

    if cfg.save_txt {
        write_energy_tables(&cfg.dest, &report)?;
    }
    if cfg.plot {
        plot_energies(&cfg.dest, figure_id, &report, &measurement)?;
    }
    info!(
        "{}: {} of {} cycles evaluated",
        report.name,
        report.cycles.len(),
        report.cycle_count
    );
    Ok(FileOutcome::Evaluated)
}

fn report_near_duplicates(measurement: &Measurement, eps: f64) {
    for i in measurement.near_duplicate_displacements(eps) {
        warn!(
            "{}: displacement samples {} and {} are less than {:e} apart",
            measurement.name(),
            i,
            i + 1,
            eps
        );
    }
}
