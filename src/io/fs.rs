//! Filesystem-backed `DocumentLoader` and `GlobExpander`.
//!
//! Grounded on `pkg/stack/stack_processor_utils.go`'s `getFileContent`/
//! `GetGlobMatches`, which cache file bytes and glob results in a
//! `sync.Map` keyed by path/pattern. Here the cache is a plain
//! `Mutex<HashMap<..>>` — a cache miss does file I/O, which dominates lock
//! hold time, so a lock-free map buys nothing a `glob`/`walkdir`-based
//! crate without async contention doesn't already have.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CompileError, Result};
use crate::io::yaml;
use crate::session::{DocumentLoader, GlobExpander};
use crate::value::Value;

/// Loads and parses YAML documents from disk, caching by absolute path for
/// the lifetime of the session that owns it.
#[derive(Default)]
pub struct FsDocumentLoader {
    cache: Mutex<HashMap<PathBuf, Value>>,
}

impl FsDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn load(&self, path: &Path) -> Result<Value> {
        if let Some(cached) = self.cache.lock().unwrap().get(path) {
            return Ok(cached.clone());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CompileError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        let value = yaml::parse(path, &content)?;

        self.cache
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), value.clone());
        Ok(value)
    }
}

/// Expands `**`-style glob patterns against the filesystem, anchored at the
/// deepest non-wildcard prefix, caching by pattern string.
#[derive(Default)]
pub struct FsGlobExpander {
    cache: Mutex<HashMap<String, Vec<PathBuf>>>,
}

impl FsGlobExpander {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobExpander for FsGlobExpander {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        if let Some(cached) = self.cache.lock().unwrap().get(pattern) {
            return Ok(cached.clone());
        }

        let mut matches: Vec<PathBuf> = glob::glob(pattern)
            .map(|paths| paths.filter_map(std::result::Result::ok).collect())
            .unwrap_or_default();

        // Both .yaml and .yml can match the same glob; order lexicographically
        // on the path string so results are deterministic either way.
        matches.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

        self.cache
            .lock()
            .unwrap()
            .insert(pattern.to_string(), matches.clone());
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loader_caches_by_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.yaml");
        fs::write(&file, "vars:\n  region: us-east-1\n").unwrap();

        let loader = FsDocumentLoader::new();
        let first = loader.load(&file).unwrap();

        // Mutate on disk; the cached value must still be returned.
        fs::write(&file, "vars:\n  region: us-west-2\n").unwrap();
        let second = loader.load(&file).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn loader_reports_missing_file() {
        let loader = FsDocumentLoader::new();
        let err = loader.load(Path::new("/nonexistent/x.yaml")).unwrap_err();
        assert!(matches!(err, CompileError::LoadError { .. }));
    }

    #[test]
    fn expander_returns_sorted_matches() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "{}").unwrap();
        fs::write(dir.path().join("a.yaml"), "{}").unwrap();

        let expander = FsGlobExpander::new();
        let pattern = format!("{}/*.yaml", dir.path().display());
        let matches = expander.expand(&pattern).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches[0].to_string_lossy() < matches[1].to_string_lossy());
    }

    #[test]
    fn expander_returns_empty_on_zero_matches() {
        let expander = FsGlobExpander::new();
        let matches = expander.expand("/nonexistent/**/*.yaml").unwrap();
        assert!(matches.is_empty());
    }
}
