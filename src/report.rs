use crate::cycle::{MeasurementReport, Quantity};
use crate::io::tsv::write_columns;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `<dest>/<quantity>/<name>.txt` for each energy quantity: the
/// envelope displacement grid next to the per-cycle values, two decimals.
pub fn write_energy_tables<P: AsRef<Path>>(dest: P, report: &MeasurementReport) -> Result<Vec<PathBuf>> {
    let dest = dest.as_ref();
    let x_grid = report.x_grid();
    let mut written: Vec<PathBuf> = Vec::with_capacity(Quantity::ALL.len());
    for q in Quantity::ALL {
        let dir = dest.join(q.name());
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed creating output dir: {}", dir.display()))?;
        let path = dir.join(format!("{}.txt", report.name));
        let values = report.series(q);
        write_columns(&path, &["x_grid", q.name()], &[&x_grid, &values], 2)?;
        written.push(path);
    }
    Ok(written)
}
