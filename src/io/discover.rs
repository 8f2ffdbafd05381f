use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Measurement files to analyse: `source/filename` if a name is given,
/// otherwise every file in `source` with the given extension (optionally
/// gzip-compressed), sorted by path. The extension match is case-sensitive.
///
/// `filename` is an exact file name; wildcards are not expanded.
pub fn find_measurements<P: AsRef<Path>>(
    source: P,
    filename: Option<&str>,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    if let Some(name) = filename {
        let path = source.join(name);
        if !path.is_file() {
            return Err(anyhow!("measurement file not found: {}", path.display()));
        }
        return Ok(vec![path]);
    }

    let entries = fs::read_dir(source)
        .with_context(|| format!("failed to list source directory: {}", source.display()))?;
    let mut out: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed reading entry in {}", source.display()))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, extension) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// File name with a trailing `.gz` removed.
pub fn measurement_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".gz") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let name = measurement_name(path);
    Path::new(&name).extension().and_then(|s| s.to_str()) == Some(extension)
}
