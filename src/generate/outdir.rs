//! Output directory lifecycle.
//!
//! Descriptors are regenerated from scratch on every run, so the output
//! directory is replaced wholesale rather than diffed. Stale descriptors from
//! a previous run must not survive.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Remove `path` if it exists, then recreate it (with parents) empty.
///
/// A missing directory is fine; any other removal failure (permissions)
/// surfaces instead of being swallowed.
pub fn reset(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to remove output directory '{}'", path.display())
            });
        }
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create output directory '{}'", path.display()))
}
