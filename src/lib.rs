//! stackforge - a hierarchical configuration compiler for terraform/helmfile
//! stacks.
//!
//! Reads a tree of YAML stack files linked by imports, resolves per-component
//! inheritance chains, and materialises a fully-merged document per root
//! stack. A projection layer can then translate the materialised stacks into
//! flat, name-addressable deployment units.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface layer
//! - `config`: project configuration (`stackforge.yaml`)
//! - `error`: the compiler's error type
//! - `import`: import-graph resolution
//! - `inheritance`: per-component base-chain resolution
//! - `io`: document loading and glob expansion (filesystem + YAML codec)
//! - `keys`: stack-key and path-token helpers
//! - `merge`: two-/three-way deep-merge primitives
//! - `projection`: legacy and context-aware projection to deployment units
//! - `session`: the caller-owned loader/expander bundle for one compilation
//! - `stack`: per-root materialisation and dependency computation
//! - `value`: the internal document tree type

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod inheritance;
pub mod io;
pub mod keys;
pub mod merge;
pub mod projection;
pub mod session;
pub mod stack;
pub mod value;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::Result;
use crate::session::CompileSession;
use crate::stack::ProcessFlags;
use crate::value::Value;

/// The result of compiling a set of root stacks: the serialised YAML for
/// each root (index-aligned with the input `roots` order) and a JSON-ready
/// map keyed by stack-key.
pub struct CompileResult {
    pub serialised: Vec<String>,
    pub stacks: IndexMap<String, Value>,
}

/// Compiles every root in `roots` against `base_dir`, returning one
/// materialised document per root.
pub fn compile(
    session: &CompileSession,
    base_dir: &Path,
    roots: &[PathBuf],
    flags: ProcessFlags,
) -> Result<CompileResult> {
    let compiled = stack::process_roots(session, base_dir, roots, flags)?;

    let mut stacks = IndexMap::new();
    let mut serialised = Vec::with_capacity(compiled.len());
    for root in compiled {
        serialised.push(root.serialised);
        stacks.insert(root.stack_key, root.document);
    }
    Ok(CompileResult { serialised, stacks })
}
