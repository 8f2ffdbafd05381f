use pretty_assertions::assert_eq;
use pushout_energy::pipeline::{run, BatchSummary, PipelineConfig};
use pushout_energy::{AnalyzerParams, ColumnLayout};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

// Same trace shape as the crate's internal `cycle::synthetic` fixture, which
// is test-only and not reachable from here; keep the two in step.
// Dwell at zero force, load along F*sqrt(s) to 1 + k, unload along F*(1 - t)³.
fn push_out_signal(cycles: usize) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = Vec::new();
    let mut origin = -0.002;
    for k in 0..=cycles {
        for m in 1..=10 {
            out.push((origin + 0.002 * m as f64, 0.0));
        }
        let load_start = origin + 0.02;
        let peak = 1.0 + k as f64;
        let force = 100.0 + 20.0 * k as f64;
        for m in 1..=40 {
            let s = m as f64 / 40.0;
            out.push((load_start + s * (peak - load_start), force * s.sqrt()));
        }
        if k == cycles {
            break;
        }
        for m in 1..=40 {
            let t = m as f64 / 40.0;
            out.push((peak - 0.4 * t, force * (1.0 - t).powi(3)));
        }
        origin = peak - 0.4;
    }
    out
}

fn write_table(path: &Path, samples: &[(f64, f64)]) {
    let mut text = String::from("time cycle displacement force\n");
    for (i, (x, y)) in samples.iter().enumerate() {
        writeln!(text, "{:.3} 1 {:.9} {:.6}", i as f64 * 0.01, x, y).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn config(source: &Path, dest: &Path, plot: bool) -> PipelineConfig {
    PipelineConfig {
        source: source.to_path_buf(),
        filename: None,
        extension: "TXT".to_string(),
        dest: dest.to_path_buf(),
        layout: ColumnLayout::default(),
        plot,
        save_txt: true,
        params: AnalyzerParams::default(),
    }
}

#[test]
fn batch_mixes_evaluable_calibration_and_broken_files() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();

    write_table(&source.path().join("probe.TXT"), &push_out_signal(5));
    let calibration: Vec<(f64, f64)> = (0..400).map(|i| (i as f64 * 0.01, 0.0)).collect();
    write_table(&source.path().join("calibration.TXT"), &calibration);
    fs::write(source.path().join("broken.TXT"), "header\n0 1 nope 3.0\n").unwrap();
    fs::write(source.path().join("ignored.csv"), "x,y\n").unwrap();

    let summary = run(&config(source.path(), dest.path(), false)).unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            files: 3,
            evaluated: 1,
            not_evaluable: 1,
            failed: 1,
        }
    );

    for quantity in ["elastic", "plastic", "friction", "plastic_total"] {
        let table = fs::read_to_string(dest.path().join(quantity).join("probe.TXT.txt")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], format!("x_grid\t{quantity}"));
        assert_eq!(lines.len(), 6, "{quantity}: {table}");
    }
    assert!(!dest.path().join("elastic").join("calibration.TXT.txt").exists());

    let elastic = fs::read_to_string(dest.path().join("elastic").join("probe.TXT.txt")).unwrap();
    let first: Vec<f64> = elastic.lines().nth(1).unwrap().split('\t').map(|v| v.parse().unwrap()).collect();
    // F * 0.4 / 4 for the first cycle.
    assert!((first[1] - 10.0).abs() < 0.02, "{elastic}");
}

#[test]
fn single_file_with_plot() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_table(&source.path().join("run7.dat"), &push_out_signal(6));

    let mut cfg = config(source.path(), dest.path(), true);
    cfg.filename = Some("run7.dat".to_string());
    let summary = run(&cfg).unwrap();
    assert_eq!(summary.evaluated, 1);

    let svg = fs::read_to_string(dest.path().join("run7.dat.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Plastic total"));
}

#[test]
fn empty_source_is_an_error() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    assert!(run(&config(source.path(), dest.path(), false)).is_err());
}
