//! Aggregate manifest serialization.
//!
//! Three flat files consumed by the external Makefile driver: the full test
//! project list, the test dependency edges, and the example project list.
//! Existing files are overwritten, never merged.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const TESTING_MANIFEST: &str = "testing.mk";
pub const DEPENDENCIES_MANIFEST: &str = "dependencies.mk";
pub const EXAMPLES_MANIFEST: &str = "examples.mk";

/// The shared test-support unit every test depends on. Built from its own
/// hand-maintained project file, so it is appended here rather than emitted.
pub const TESTFRAMEWORK_UNIT: &str = "internal/build/testframework";

/// Write `testing.mk`: one `PROJECTS +=` line per test unit plus the fixed
/// test-support entry.
pub fn write_testing_manifest(out_dir: &Path, units: &[String]) -> Result<()> {
    let mut content = String::new();
    for unit in units {
        content.push_str(&format!("PROJECTS += {unit}\n"));
    }
    content.push_str(&format!("PROJECTS += {TESTFRAMEWORK_UNIT}\n"));
    write_manifest(out_dir, TESTING_MANIFEST, &content)
}

/// Write `dependencies.mk`: one `<unit>: testframework` line per test unit.
pub fn write_dependencies_manifest(out_dir: &Path, edges: &[String]) -> Result<()> {
    let mut content = String::new();
    for edge in edges {
        content.push_str(edge);
        content.push('\n');
    }
    write_manifest(out_dir, DEPENDENCIES_MANIFEST, &content)
}

/// Write `examples.mk`: one `PROJECTS +=` line per example unit.
pub fn write_examples_manifest(out_dir: &Path, units: &[String]) -> Result<()> {
    let mut content = String::new();
    for unit in units {
        content.push_str(&format!("PROJECTS += {unit}\n"));
    }
    write_manifest(out_dir, EXAMPLES_MANIFEST, &content)
}

fn write_manifest(out_dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = out_dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write '{}'", path.display()))
}
