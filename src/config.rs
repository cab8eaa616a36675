//! Project configuration (`stackforge.yaml`): CLI flag > config file >
//! built-in default.
//!
//! Shaped after a `Config`/`find_config_file`/`load_config` convention,
//! re-keyed to this crate's domain (`base_path`, `stacks_glob`,
//! `stack_config_path_template`, `stack_name_pattern`, the two
//! `process_*_deps` flags).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "stackforge.yaml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_stacks_glob")]
    pub stacks_glob: Vec<String>,
    #[serde(default = "default_stack_config_path_template")]
    pub stack_config_path_template: String,
    #[serde(default)]
    pub stack_name_pattern: Option<String>,
    #[serde(default)]
    pub process_stack_deps: bool,
    #[serde(default = "default_true")]
    pub process_component_deps: bool,
}

fn default_base_path() -> String {
    "./stacks".to_string()
}

fn default_stacks_glob() -> Vec<String> {
    vec!["orgs/**/*.yaml".to_string()]
}

fn default_stack_config_path_template() -> String {
    "%s".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            stacks_glob: default_stacks_glob(),
            stack_config_path_template: default_stack_config_path_template(),
            stack_name_pattern: None,
            process_stack_deps: false,
            process_component_deps: true,
        }
    }
}

/// Search `start_dir` and its ancestors (stopping at the first `.git`) for
/// `stackforge.yaml`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration, so callers can report where (if
/// anywhere) it was read from.
pub struct ConfigLoadResult {
    pub config: ProjectConfig,
    pub loaded_from: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: ProjectConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(ConfigLoadResult {
                config,
                loaded_from: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: ProjectConfig::default(),
            loaded_from: None,
        }),
    }
}

pub fn default_config_yaml() -> Result<String> {
    serde_yaml::to_string(&ProjectConfig::default()).context("failed to generate default config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let result = load_config(dir.path()).unwrap();
        assert!(result.loaded_from.is_none());
        assert_eq!(result.config.base_path, default_base_path());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "base_path: ./infra\nprocess_stack_deps: true\n",
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert_eq!(result.config.base_path, "./infra");
        assert!(result.config.process_stack_deps);
        // Untouched fields still fall back to their defaults.
        assert!(result.config.process_component_deps);
    }

    #[test]
    fn search_stops_at_a_git_boundary() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let result = load_config(&nested).unwrap();
        assert!(result.loaded_from.is_none());
    }

    #[test]
    fn default_config_yaml_round_trips() {
        let yaml = default_config_yaml().unwrap();
        let parsed: ProjectConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.base_path, default_base_path());
    }
}
