use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional `mkgen.toml` at the source root. Every field has a default that
/// matches the stock Thrust tree, so most checkouts carry no config at all.
#[derive(Deserialize, Debug, Default)]
pub struct GenConfig {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub uber: UberConfig,
}

#[derive(Deserialize, Debug)]
pub struct NamingConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Deserialize, Debug)]
pub struct DiscoveryConfig {
    #[serde(default = "default_test_dir")]
    pub test_dir: String,
    #[serde(default = "default_example_dir")]
    pub example_dir: String,
    #[serde(default = "default_cuda_subdir")]
    pub cuda_subdir: String,
    #[serde(default = "default_test_exclude")]
    pub test_exclude: Vec<String>,
    #[serde(default)]
    pub example_exclude: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct UberConfig {
    #[serde(default = "default_uber_subdir")]
    pub subdir: String,
    #[serde(default = "default_uber_exclude")]
    pub exclude: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            test_dir: default_test_dir(),
            example_dir: default_example_dir(),
            cuda_subdir: default_cuda_subdir(),
            test_exclude: default_test_exclude(),
            example_exclude: Vec::new(),
        }
    }
}

impl Default for UberConfig {
    fn default() -> Self {
        Self {
            subdir: default_uber_subdir(),
            exclude: default_uber_exclude(),
        }
    }
}

fn default_prefix() -> String {
    "thrust".to_string()
}

fn default_test_dir() -> String {
    "testing".to_string()
}

fn default_example_dir() -> String {
    "examples".to_string()
}

fn default_cuda_subdir() -> String {
    "cuda".to_string()
}

fn default_test_exclude() -> Vec<String> {
    // The test framework sources build into their own support unit.
    vec![r"testframework\.cu$".to_string()]
}

fn default_uber_subdir() -> String {
    "thrust".to_string()
}

fn default_uber_exclude() -> Vec<String> {
    vec![
        ".*/detail$".to_string(),
        "thrust/iterator".to_string(),
        "thrust/random".to_string(),
        "thrust/system/tbb".to_string(),
    ]
}

/// Load `mkgen.toml` from `root`, falling back to defaults when absent.
pub fn load(root: &Path) -> Result<GenConfig> {
    let path = root.join("mkgen.toml");
    if !path.exists() {
        return Ok(GenConfig::default());
    }
    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse '{}' - check for syntax errors", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = load(temp_dir.path()).unwrap();
        assert_eq!(config.naming.prefix, "thrust");
        assert_eq!(config.discovery.test_dir, "testing");
        assert_eq!(config.discovery.example_dir, "examples");
        assert_eq!(config.discovery.cuda_subdir, "cuda");
        assert_eq!(config.discovery.test_exclude, vec![r"testframework\.cu$"]);
        assert!(config.discovery.example_exclude.is_empty());
        assert_eq!(config.uber.subdir, "thrust");
        assert_eq!(config.uber.exclude.len(), 4);
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("mkgen.toml"),
            r#"
[naming]
prefix = "cub"

[discovery]
test_dir = "tests"
"#,
        )
        .unwrap();

        let config = load(temp_dir.path()).unwrap();
        assert_eq!(config.naming.prefix, "cub");
        assert_eq!(config.discovery.test_dir, "tests");
        assert_eq!(config.discovery.example_dir, "examples");
        assert_eq!(config.uber.subdir, "thrust");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("mkgen.toml"), "[naming\nprefix=").unwrap();
        assert!(load(temp_dir.path()).is_err());
    }
}
