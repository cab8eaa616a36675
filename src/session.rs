//! `CompileSession` — the caller-owned bundle of loader/expander caches for
//! one compilation.
//!
//! These caches are explicit objects owned by the session, not process
//! globals. A session is created per call to `compile` unless the caller
//! wants cross-compile sharing, in which case it passes the same session
//! again.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::value::Value;

/// Reads a file path and returns its parsed document tree. Implementations
/// are expected to cache by absolute path for the session's lifetime.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Expands a glob pattern (rooted at some base directory, supporting `**`)
/// into a finite, ordered set of concrete paths. Implementations are
/// expected to cache by pattern for the session's lifetime.
pub trait GlobExpander: Send + Sync {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Bundles one `DocumentLoader` and one `GlobExpander` for a single
/// compilation. Not `Clone` — pass `&CompileSession` around instead of
/// copying it, so cache state stays single-owner.
pub struct CompileSession {
    pub loader: Box<dyn DocumentLoader>,
    pub expander: Box<dyn GlobExpander>,
}

impl CompileSession {
    pub fn new(loader: Box<dyn DocumentLoader>, expander: Box<dyn GlobExpander>) -> Self {
        Self { loader, expander }
    }
}
