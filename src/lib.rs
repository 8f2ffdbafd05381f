use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

pub mod config;
pub mod cycle;
pub mod io;
pub mod numeric;
pub mod pipeline;
pub mod plot;
pub mod report;

pub use config::AnalyzerParams;
pub use cycle::{analyze_measurement, Measurement, MeasurementReport};
pub use io::measurement::{ColumnLayout, Delimiter};
pub use pipeline::BatchSummary;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub source: String,
    pub filename: Option<String>,
    pub extension: String,
    pub dest: String,
    pub params_path: Option<String>,
    pub layout: ColumnLayout,
    pub plot: bool,
    pub save_txt: bool,
    pub threads: usize,
}

pub fn analyze(cfg: AnalyzeConfig) -> Result<BatchSummary> {
    if cfg.threads == 0 {
        return Err(anyhow!("--threads must be >= 1"));
    }
    if cfg.layout.x_col == cfg.layout.y_col {
        return Err(anyhow!("--x-col and --y-col must differ"));
    }
    if cfg.extension.is_empty() {
        return Err(anyhow!("--extension must not be empty"));
    }

    let params = match &cfg.params_path {
        Some(path) => config::read_params(path)
            .with_context(|| format!("failed reading --params: {}", path))?,
        None => config::parse_params_str(config::DEFAULT_PARAMS_TOML, "embedded defaults")?,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cfg.threads)
        .build()
        .context("failed creating rayon thread pool")?;

    let pipeline_cfg = pipeline::PipelineConfig {
        source: PathBuf::from(cfg.source),
        filename: cfg.filename,
        extension: cfg.extension,
        dest: PathBuf::from(cfg.dest),
        layout: cfg.layout,
        plot: cfg.plot,
        save_txt: cfg.save_txt,
        params,
    };
    pool.install(|| pipeline::run(&pipeline_cfg))
}
