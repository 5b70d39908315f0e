//! Build-manifest generation.
//!
//! One run scans the four build-unit groups (plain and CUDA tests, plain and
//! CUDA examples), writes a descriptor per unit into a freshly reset output
//! directory, and serializes the three aggregate manifests the Makefile
//! driver consumes. Discovery, emission, and manifest writing are strictly
//! sequential so the output reflects a single filesystem snapshot.

mod discover;
mod emit;
mod manifest;
mod outdir;

pub use discover::{CPP_EXT, CUDA_EXT, collect_group_sources, compile_patterns, discover, matches_any};
pub use emit::{EmittedGroup, UnitKind, emit};
pub use manifest::{
    DEPENDENCIES_MANIFEST, EXAMPLES_MANIFEST, TESTING_MANIFEST, TESTFRAMEWORK_UNIT,
    write_dependencies_manifest, write_examples_manifest, write_testing_manifest,
};
pub use outdir::reset;

use crate::config;
use crate::paths;
use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};

/// Run one full generation pass.
///
/// With a `source_root`, group directories are scanned beneath it and every
/// recorded path (sources in descriptors, unit references in manifests) is
/// expressed relative to it, so the generated tree is location-independent.
/// Without one, scanning and recording happen relative to the working
/// directory.
pub fn run(out_dir: &Path, source_root: Option<&Path>) -> Result<()> {
    let scan_base = source_root.unwrap_or(Path::new(""));
    let config = config::load(scan_base)?;

    let manifest_dir = match source_root {
        Some(root) => paths::relative_path(out_dir, root)?,
        None => out_dir.to_path_buf(),
    };

    outdir::reset(out_dir)?;

    let naming = &config.naming;
    let d = &config.discovery;
    let test_excludes = discover::compile_patterns(&d.test_exclude)?;
    let example_excludes = discover::compile_patterns(&d.example_exclude)?;

    let test_dir = scan_base.join(&d.test_dir);
    let example_dir = scan_base.join(&d.example_dir);
    let groups = [
        (test_dir.clone(), "test".to_string(), UnitKind::Test),
        (
            test_dir.join(&d.cuda_subdir),
            format!("test.{}", d.cuda_subdir),
            UnitKind::Test,
        ),
        (example_dir.clone(), "example".to_string(), UnitKind::Example),
        (
            example_dir.join(&d.cuda_subdir),
            format!("example.{}", d.cuda_subdir),
            UnitKind::Example,
        ),
    ];

    let mut test_units = Vec::new();
    let mut dependency_edges = Vec::new();
    let mut example_units = Vec::new();

    for (dir, group, kind) in groups {
        let excludes = match kind {
            UnitKind::Test => &test_excludes,
            UnitKind::Example => &example_excludes,
        };
        println!(
            "{} Generating project files in '{}' for group '{}' from '{}'",
            "⚙".cyan(),
            out_dir.display(),
            group,
            dir.display()
        );

        let sources =
            discover::collect_group_sources(&dir, |p| discover::matches_any(excludes, p))?;
        let recorded = record_sources(sources, source_root)?;
        let emitted = emit::emit(
            out_dir,
            &manifest_dir,
            &recorded,
            &group,
            kind,
            &naming.prefix,
        )?;

        match kind {
            UnitKind::Test => {
                test_units.extend(emitted.units);
                dependency_edges.extend(emitted.dependencies);
            }
            UnitKind::Example => example_units.extend(emitted.units),
        }
    }

    manifest::write_testing_manifest(out_dir, &test_units)?;
    manifest::write_dependencies_manifest(out_dir, &dependency_edges)?;
    manifest::write_examples_manifest(out_dir, &example_units)?;

    println!(
        "{} Generated {} test and {} example project files in '{}'",
        "✓".green(),
        test_units.len(),
        example_units.len(),
        out_dir.display()
    );
    Ok(())
}

fn record_sources(sources: Vec<PathBuf>, source_root: Option<&Path>) -> Result<Vec<PathBuf>> {
    match source_root {
        Some(root) => sources
            .iter()
            .map(|s| paths::relative_path(s, root))
            .collect(),
        None => Ok(sources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_shared_base_names_stay_distinct_across_groups() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("testing/a.cu"));
        touch(&root.join("testing/b.cpp"));
        touch(&root.join("testing/cuda/a.cu"));
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();

        assert!(out.join("thrust.test.a.mk").exists());
        assert!(out.join("thrust.test.b.mk").exists());
        assert!(out.join("thrust.test.cuda.a.mk").exists());

        let deps = fs::read_to_string(out.join(DEPENDENCIES_MANIFEST)).unwrap();
        assert_eq!(
            deps.lines().collect::<Vec<_>>(),
            vec![
                "thrust.test.a: testframework",
                "thrust.test.b: testframework",
                "thrust.test.cuda.a: testframework",
            ]
        );
    }

    #[test]
    fn test_cuda_only_example_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("examples")).unwrap();
        touch(&root.join("examples/cuda/ex1.cu"));
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();

        let examples = fs::read_to_string(out.join(EXAMPLES_MANIFEST)).unwrap();
        assert_eq!(
            examples,
            "PROJECTS += generated/thrust.example.cuda.ex1\n"
        );
    }

    #[test]
    fn test_stale_descriptors_do_not_survive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("testing/scan.cu"));
        let out = root.join("generated");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("old.mk"), "stale").unwrap();

        run(&out, Some(root)).unwrap();

        assert!(!out.join("old.mk").exists());
        assert!(out.join("thrust.test.scan.mk").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("testing/a.cu"));
        touch(&root.join("testing/b.cpp"));
        touch(&root.join("examples/saxpy.cu"));
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();
        let first: Vec<(String, String)> = read_tree(&out);
        run(&out, Some(root)).unwrap();
        let second: Vec<(String, String)> = read_tree(&out);

        assert_eq!(first, second);
    }

    fn read_tree(dir: &Path) -> Vec<(String, String)> {
        let mut files: Vec<(String, String)> = fs::read_dir(dir)
            .unwrap()
            .map(|e| {
                let path = e.unwrap().path();
                (
                    path.file_name().unwrap().to_string_lossy().to_string(),
                    fs::read_to_string(&path).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_recorded_paths_are_root_relative() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("testing/scan.cu"));
        let out = root.join("internal/build/generated");

        run(&out, Some(root)).unwrap();

        let descriptor = fs::read_to_string(out.join("thrust.test.scan.mk")).unwrap();
        assert!(descriptor.contains("TEST_SRC   := testing/scan.cu"));

        let testing = fs::read_to_string(out.join(TESTING_MANIFEST)).unwrap();
        assert_eq!(
            testing.lines().next().unwrap(),
            "PROJECTS += internal/build/generated/thrust.test.scan"
        );
    }

    #[test]
    fn test_default_config_excludes_testframework() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("testing/scan.cu"));
        touch(&root.join("testing/testframework.cu"));
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();

        assert!(!out.join("thrust.test.testframework.mk").exists());
        let testing = fs::read_to_string(out.join(TESTING_MANIFEST)).unwrap();
        assert!(!testing.contains("testframework.cu"));
        // The support unit itself is still listed once.
        assert!(testing.contains(TESTFRAMEWORK_UNIT));
    }

    #[test]
    fn test_config_overrides_prefix_and_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("mkgen.toml"),
            r#"
[naming]
prefix = "cub"

[discovery]
test_dir = "unit_tests"
"#,
        )
        .unwrap();
        touch(&root.join("unit_tests/radix.cu"));
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();

        assert!(out.join("cub.test.radix.mk").exists());
    }

    #[test]
    fn test_empty_tree_still_writes_manifests() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let out = root.join("generated");

        run(&out, Some(root)).unwrap();

        let testing = fs::read_to_string(out.join(TESTING_MANIFEST)).unwrap();
        assert_eq!(testing, format!("PROJECTS += {TESTFRAMEWORK_UNIT}\n"));
        assert_eq!(
            fs::read_to_string(out.join(DEPENDENCIES_MANIFEST)).unwrap(),
            ""
        );
        assert_eq!(fs::read_to_string(out.join(EXAMPLES_MANIFEST)).unwrap(), "");
    }
}
