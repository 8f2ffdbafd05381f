use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes equal-length numeric columns as a tab-separated table with a
/// header row, each value rounded to `decimals` places.
pub fn write_columns<P: AsRef<Path>>(
    path: P,
    header: &[&str],
    columns: &[&[f64]],
    decimals: usize,
) -> Result<()> {
    let path = path.as_ref();
    if header.len() != columns.len() {
        return Err(anyhow!(
            "{}: {} header fields for {} columns",
            path.display(),
            header.len(),
            columns.len()
        ));
    }
    let n_rows = columns.first().map_or(0, |c| c.len());
    if columns.iter().any(|c| c.len() != n_rows) {
        return Err(anyhow!("{}: columns differ in length", path.display()));
    }

    let file = File::create(path).with_context(|| format!("failed to create: {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}", header.join("\t"))?;
    for row in 0..n_rows {
        let line: Vec<String> = columns
            .iter()
            .map(|c| format!("{:.*}", decimals, c[row]))
            .collect();
        writeln!(w, "{}", line.join("\t"))?;
    }
    w.flush()
        .with_context(|| format!("failed flushing: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_rounded_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        write_columns(&path, &["a", "b"], &[&[1.0, 2.345], &[-0.004, 10.0]], 2).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a\tb\n1.00\t-0.00\n2.35\t10.00\n");
    }

    #[test]
    fn rejects_ragged_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        assert!(write_columns(&path, &["a", "b"], &[&[1.0], &[1.0, 2.0]], 2).is_err());
        assert!(write_columns(&path, &["a"], &[&[1.0], &[2.0]], 2).is_err());
    }
}
