//! Uber-header generation.
//!
//! Collects every public header under the library subtree and emits a single
//! header of `#include` directives. Compiling that one file is a quick way to
//! check that all public headers parse cleanly and stay warning-free.

use anyhow::{Context, Result};
use colored::*;
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;

use crate::config;
use crate::generate::{compile_patterns, matches_any};

/// Recursively collect root-relative paths of `.h` files under
/// `root/subdir`. A relative path matching one of `excludes` is skipped; a
/// matching directory prunes its whole subtree.
pub fn collect_headers(root: &Path, subdir: &str, excludes: &[Regex]) -> Result<Vec<String>> {
    let walk_root = root.join(subdir);
    let mut headers = Vec::new();

    let walker = WalkDir::new(&walk_root).min_depth(1).into_iter();
    for entry in walker.filter_entry(|e| {
        e.path()
            .strip_prefix(root)
            .map(|rel| !matches_any(excludes, rel))
            .unwrap_or(true)
    }) {
        let entry =
            entry.with_context(|| format!("Failed to walk '{}'", walk_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "h") {
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .with_context(|| format!("'{}' is outside '{}'", path.display(), root.display()))?;
        headers.push(rel.display().to_string());
    }

    headers.sort();
    Ok(headers)
}

/// Render the uber header: generated-file banner, an `#error` when nothing
/// was found, the feature-suppression defines, then one include per header.
pub fn write_uber_header<W: Write>(out: &mut W, headers: &[String]) -> Result<()> {
    writeln!(out, "/* File is generated by mkgen uber-header */")?;
    if headers.is_empty() {
        writeln!(out, "#error no include files found")?;
        writeln!(out)?;
    }
    writeln!(out, "#define THRUST_CPP11_REQUIRED_NO_ERROR")?;
    writeln!(out, "#define THRUST_CPP14_REQUIRED_NO_ERROR")?;
    writeln!(out, "#define THRUST_MODERN_GCC_REQUIRED_NO_ERROR")?;
    for header in headers {
        writeln!(out, "#include <{header}>")?;
    }
    Ok(())
}

/// CLI entry: resolve subdir/excludes from arguments or `mkgen.toml`
/// defaults, collect, and write to `output` or stdout.
pub fn generate_uber_header(
    root: &Path,
    subdir: Option<&str>,
    cli_excludes: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let config = config::load(root)?;
    let subdir = subdir.unwrap_or(&config.uber.subdir);
    let patterns = if cli_excludes.is_empty() {
        config.uber.exclude.as_slice()
    } else {
        cli_excludes
    };
    let excludes = compile_patterns(patterns)?;

    let headers = collect_headers(root, subdir, &excludes)?;
    if headers.is_empty() {
        eprintln!(
            "{} No headers found under '{}'",
            "!".yellow(),
            root.join(subdir).display()
        );
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_uber_header(&mut writer, &headers)?;
            writer.flush()?;
            println!(
                "{} Wrote uber header with {} includes to '{}'",
                "✓".green(),
                headers.len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            write_uber_header(&mut stdout.lock(), &headers)?;
        }
    }
    Ok(())
}
