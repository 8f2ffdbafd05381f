//! Energy overview figures (SVG).

use crate::cycle::{Measurement, MeasurementReport, Quantity};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

const LINE: RGBColor = RGBColor(65, 105, 225);

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Renders `<dest>/<name>.svg`: one panel per energy quantity over the
/// envelope displacement grid, and the raw force-displacement trace below.
///
/// `figure_id` only labels the figure; batch workers pass their own.
pub fn plot_energies<P: AsRef<Path>>(
    dest: P,
    figure_id: usize,
    report: &MeasurementReport,
    measurement: &Measurement,
) -> Result<PathBuf> {
    let dest = dest.as_ref();
    fs::create_dir_all(dest)
        .with_context(|| format!("failed creating plot dir: {}", dest.display()))?;
    let path = dest.join(format!("{}.svg", report.name));

    {
        let root = SVGBackend::new(&path, (1200, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(
            &format!("#{} {}", figure_id, report.name),
            ("sans-serif", 18),
        )?;

        let rows = root.split_evenly((3, 1));
        let mut panels: Vec<Panel> = Vec::with_capacity(4);
        for row in rows.iter().take(2) {
            panels.extend(row.split_evenly((1, 2)));
        }

        let x_grid = report.x_grid();
        for (area, q) in panels.iter().zip(Quantity::ALL) {
            draw_energy_panel(area, q.title(), &x_grid, &report.series(q))?;
        }
        draw_trace_panel(&rows[2], measurement.x(), measurement.y())?;

        root.present()
            .with_context(|| format!("failed writing plot: {}", path.display()))?;
    }
    Ok(path)
}

fn draw_energy_panel(area: &Panel, title: &str, xs: &[f64], ys: &[f64]) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 16))
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(padded_range(xs), padded_range(ys))?;
    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(
        xs.iter().copied().zip(ys.iter().copied()),
        &LINE,
    ))?;
    chart.draw_series(
        xs.iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Circle::new((x, y), 3, LINE.filled())),
    )?;
    Ok(())
}

fn draw_trace_panel(area: &Panel, xs: &[f64], ys: &[f64]) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(padded_range(xs), padded_range(ys))?;
    chart
        .configure_mesh()
        .x_desc("displacement")
        .y_desc("force")
        .draw()?;
    chart.draw_series(LineSeries::new(
        xs.iter().copied().zip(ys.iter().copied()),
        LINE.stroke_width(1),
    ))?;
    Ok(())
}

fn padded_range(v: &[f64]) -> Range<f64> {
    let (lo, hi) = v
        .iter()
        .filter(|x| x.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo < 1e-12 {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ranges_are_padded_and_never_empty() {
        assert_eq!(padded_range(&[]), 0.0..1.0);
        assert_eq!(padded_range(&[2.0, 2.0]), 1.5..2.5);
        let r = padded_range(&[0.0, f64::NAN, 10.0]);
        assert_eq!(r, -0.5..10.5);
    }
}
