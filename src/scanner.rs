use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Collect the CSV inputs named by `root`.
///
/// A file is taken as-is whatever its extension. A directory is walked
/// recursively for `*.csv` files, returned in sorted path order so batch
/// order is reproducible. Hidden entries (leading `.`) are skipped.
pub fn scan_inputs(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut results = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str().unwrap_or("")))
    {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            tracing::warn!("skipping non-CSV file {}", path.display());
            continue;
        }
        results.push(path.to_path_buf());
    }

    if results.is_empty() {
        return Err(Error::NoInputs {
            path: root.to_path_buf(),
        });
    }
    results.sort();
    Ok(results)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
