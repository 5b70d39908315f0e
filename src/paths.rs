//! Working-directory-independent path relativization.
//!
//! Generated descriptors and manifests reference the output directory and the
//! scanned sources relative to the project root, so a checkout can move
//! without invalidating them. Everything here is lexical: no path needs to
//! exist on disk.

use anyhow::{Result, bail};
use std::path::{Component, Path, PathBuf};

/// Express `target` relative to `base`.
///
/// Both inputs are absolutized lexically first. Returns `.` when the two
/// resolve to the same location.
pub fn relative_path(target: &Path, base: &Path) -> Result<PathBuf> {
    if target.as_os_str().is_empty() {
        bail!("no target path specified");
    }
    if base.as_os_str().is_empty() {
        bail!("no base path specified");
    }

    let target = absolutize(target)?;
    let base = absolutize(base)?;

    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(t, b)| t == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part);
    }

    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Ok(rel)
}

/// Anchor a relative path at the working directory and collapse `.`/`..`
/// segments without consulting the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let anchored = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&anchored))
}

fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                // ".." above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
