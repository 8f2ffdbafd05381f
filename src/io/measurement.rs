use crate::cycle::Measurement;
use crate::io::discover::{is_gzip, measurement_name};
use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Whitespace,
    Tab,
    Comma,
}

/// Where displacement and force live in a measurement table (zero-based columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub x_col: usize,
    pub y_col: usize,
    pub delimiter: Delimiter,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            x_col: 2,
            y_col: 3,
            delimiter: Delimiter::Whitespace,
        }
    }
}

/// Reads one measurement table. The first line is a header; `#` starts a
/// comment; blank lines are ignored. `.gz` files are decompressed.
pub fn read_measurement<P: AsRef<Path>>(path: P, layout: &ColumnLayout) -> Result<Measurement> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
    let reader: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let (x, y) = match layout.delimiter {
        Delimiter::Whitespace => read_whitespace(BufReader::new(reader), layout),
        Delimiter::Tab => read_delimited(reader, b'\t', layout),
        Delimiter::Comma => read_delimited(reader, b',', layout),
    }
    .with_context(|| format!("failed parsing measurement: {}", path.display()))?;

    Measurement::new(measurement_name(path), x, y)
}

fn read_whitespace<R: BufRead>(reader: R, layout: &ColumnLayout) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut x: Vec<f64> = Vec::new();
    let mut y: Vec<f64> = Vec::new();
    for (line_idx, line) in reader.lines().enumerate().skip(1) {
        let line = line.with_context(|| format!("failed reading line {}", line_idx + 1))?;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let fields: Vec<&str> = content.split_whitespace().collect();
        x.push(parse_value(fields.get(layout.x_col).copied(), "displacement", line_idx + 1)?);
        y.push(parse_value(fields.get(layout.y_col).copied(), "force", line_idx + 1)?);
    }
    Ok((x, y))
}

fn read_delimited<R: Read>(reader: R, delimiter: u8, layout: &ColumnLayout) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut x: Vec<f64> = Vec::new();
    let mut y: Vec<f64> = Vec::new();
    for (row_idx, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("failed reading record {}", row_idx + 1))?;
        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }
        x.push(parse_value(rec.get(layout.x_col), "displacement", row_idx + 1)?);
        y.push(parse_value(rec.get(layout.y_col), "force", row_idx + 1)?);
    }
    Ok((x, y))
}

fn parse_value(raw: Option<&str>, label: &str, record: usize) -> Result<f64> {
    let raw = raw.ok_or_else(|| anyhow!("missing {} column at record {}", label, record))?;
    raw.parse()
        .with_context(|| format!("invalid {} '{}' at record {}", label, raw, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TABLE: &str = "Zeit Zyklus Weg Kraft\n\
                         0.0 1 0.10 1.5\n\
                         # pause\n\
                         \n\
                         0.1 1 0.20 7.25 # inline comment\n\
                         0.2 1 0.30 12.0\n";

    #[test]
    fn whitespace_table_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.TXT");
        std::fs::write(&path, TABLE).unwrap();

        let m = read_measurement(&path, &ColumnLayout::default()).unwrap();
        assert_eq!(m.name(), "probe.TXT");
        assert_eq!(m.x(), &[0.10, 0.20, 0.30]);
        assert_eq!(m.y(), &[1.5, 7.25, 12.0]);
    }

    #[test]
    fn gzip_and_comma_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.csv.gz");
        let file = File::create(&path).unwrap();
        let mut gz = GzEncoder::new(file, Compression::default());
        gz.write_all(b"x,y\n0.5,3.0\n0.75, 4.5\n").unwrap();
        gz.finish().unwrap();

        let layout = ColumnLayout {
            x_col: 0,
            y_col: 1,
            delimiter: Delimiter::Comma,
        };
        let m = read_measurement(&path, &layout).unwrap();
        assert_eq!(m.name(), "probe.csv");
        assert_eq!(m.x(), &[0.5, 0.75]);
        assert_eq!(m.y(), &[3.0, 4.5]);
    }

    #[test]
    fn reports_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.TXT");
        std::fs::write(&path, "h\n0 1 0.1 2.0\n0 1 abc 2.0\n").unwrap();
        let err = read_measurement(&path, &ColumnLayout::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid displacement 'abc'"));

        std::fs::write(&path, "h\n0 1 0.1\n").unwrap();
        assert!(read_measurement(&path, &ColumnLayout::default()).is_err());
    }
}
