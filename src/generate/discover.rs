//! Source discovery for one build-unit group.
//!
//! Discovery is flat: each group directory is listed, never walked. The CUDA
//! subdirectories form their own groups, so recursion would double-count.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Extension of accelerator sources. These always come first in a group.
pub const CUDA_EXT: &str = "cu";
/// Extension of host-only sources.
pub const CPP_EXT: &str = "cpp";

/// List the files directly under `directory` whose extension equals
/// `extension`, dropping any path the `exclude` predicate matches.
///
/// A missing directory is not an error: optional group directories (the CUDA
/// subfolders) simply contribute nothing. The result is sorted
/// lexicographically by full path string.
pub fn discover<F>(directory: &Path, extension: &str, exclude: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to list directory '{}'", directory.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in '{}'", directory.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        if exclude(&path) {
            continue;
        }
        sources.push(path);
    }

    sources.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(sources)
}

/// Collect the sources of one group in emission order: all `.cu` files
/// (sorted), then all `.cpp` files (sorted). The two phases are never merged
/// into a single sort.
pub fn collect_group_sources<F>(directory: &Path, exclude: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool + Copy,
{
    let mut sources = discover(directory, CUDA_EXT, exclude)?;
    sources.extend(discover(directory, CPP_EXT, exclude)?);
    Ok(sources)
}

/// Exclusion semantic used at every call site: a pattern excludes a path if
/// it matches anywhere in the path's string form.
pub fn matches_any(patterns: &[Regex], path: &Path) -> bool {
    let text = path.to_string_lossy();
    patterns.iter().any(|re| re.is_match(&text))
}

/// Compile config exclusion patterns once per run.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("Invalid exclude pattern '{p}'")))
        .collect()
}
