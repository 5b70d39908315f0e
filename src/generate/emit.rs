//! Per-unit descriptor emission.
//!
//! Every discovered source becomes one `.mk` descriptor naming the source,
//! the derived unit name, and the shared build-rule fragment the external
//! Makefile driver includes to actually compile the unit.

use anyhow::{Context, Result};
use colored::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether a group builds against the test rule fragment or the example one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Test,
    Example,
}

/// Accumulated results of one group emission, threaded back to the driver.
#[derive(Debug, Default)]
pub struct EmittedGroup {
    /// Manifest-relative unit references, one per descriptor written.
    pub units: Vec<String>,
    /// `<name>: testframework` edges; empty for example groups.
    pub dependencies: Vec<String>,
}

/// Write one descriptor per source into `out_dir` and return the group's
/// accumulators. `manifest_dir` is how the output directory is referenced
/// from the aggregate manifests; it differs from `out_dir` when generation
/// is rooted at a source tree.
pub fn emit(
    out_dir: &Path,
    manifest_dir: &Path,
    sources: &[PathBuf],
    group: &str,
    kind: UnitKind,
    prefix: &str,
) -> Result<EmittedGroup> {
    let mut emitted = EmittedGroup::default();
    let mut seen: HashSet<String> = HashSet::new();

    for source in sources {
        let stem = source
            .file_stem()
            .with_context(|| format!("Source '{}' has no file name", source.display()))?
            .to_string_lossy();
        let name = format!("{prefix}.{group}.{stem}");

        if !seen.insert(name.clone()) {
            println!(
                "{} Skipping '{}': unit name '{}' already emitted in this group",
                "!".yellow(),
                source.display(),
                name
            );
            continue;
        }

        let descriptor = render_descriptor(kind, source, &name);
        let descriptor_path = out_dir.join(format!("{name}.mk"));
        fs::write(&descriptor_path, descriptor)
            .with_context(|| format!("Failed to write '{}'", descriptor_path.display()))?;

        emitted.units.push(manifest_dir.join(&name).display().to_string());
        if kind == UnitKind::Test {
            emitted.dependencies.push(format!("{name}: testframework"));
        }
    }

    Ok(emitted)
}

fn render_descriptor(kind: UnitKind, source: &Path, name: &str) -> String {
    match kind {
        UnitKind::Test => format!(
            "\nTEST_SRC   := {}\nTEST_NAME  := {}\ninclude $(ROOTDIR)/thrust/internal/build/generic_test.mk\n",
            source.display(),
            name
        ),
        UnitKind::Example => format!(
            "\nEXAMPLE_SRC   := {}\nEXAMPLE_NAME  := {}\ninclude $(ROOTDIR)/thrust/internal/build/generic_example.mk\n",
            source.display(),
            name
        ),
    }
}
