//! The import resolver: recursively walks a file's `import` list, loading
//! and deep-merging everything it pulls in, current file last so it
//! overrides its own imports.
//!
//! Grounded on `pkg/stack/stack_processor.go`'s `ProcessYAMLConfigFile`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{CompileError, Result};
use crate::keys::{relative_key, with_default_extension};
use crate::merge::merge_all;
use crate::session::CompileSession;
use crate::value::Value;

/// Resolve `file_path`'s imports against `base_dir`, returning the
/// deep-merged tree. `imports` accumulates every imported file's tree keyed
/// by its import-key across the whole recursive traversal (used later for
/// dependency computation); `visiting` tracks the paths currently on the
/// recursion stack so cycles longer than one hop are caught explicitly
/// rather than recursing until stack exhaustion.
pub fn resolve_imports(
    session: &CompileSession,
    base_dir: &Path,
    file_path: &Path,
    imports: &mut HashMap<String, Value>,
) -> Result<Value> {
    let mut visiting = HashSet::new();
    resolve_imports_inner(session, base_dir, file_path, imports, &mut visiting)
}

fn resolve_imports_inner(
    session: &CompileSession,
    base_dir: &Path,
    file_path: &Path,
    imports: &mut HashMap<String, Value>,
    visiting: &mut HashSet<PathBuf>,
) -> Result<Value> {
    visiting.insert(file_path.to_path_buf());

    let document = session.loader.load(file_path)?;
    let mut parts: Vec<Value> = Vec::new();

    if let Some(import_list) = document.get("import").and_then(Value::as_seq) {
        for entry in import_list {
            let entry_str = entry.as_str().unwrap_or_default();
            let entry_with_ext = with_default_extension(entry_str);
            let candidate = base_dir.join(&entry_with_ext);

            if paths_equal(&candidate, file_path) {
                return Err(CompileError::SelfImportError {
                    file: file_path.to_path_buf(),
                    import: entry_str.to_string(),
                });
            }

            let pattern = candidate.to_string_lossy().into_owned();
            let matched = session.expander.expand(&pattern)?;
            if matched.is_empty() {
                return Err(CompileError::NoImportMatchError {
                    file: file_path.to_path_buf(),
                    pattern,
                });
            }

            for matched_path in matched {
                if visiting.contains(&matched_path) {
                    let cycle: Vec<PathBuf> = visiting.iter().cloned().collect();
                    return Err(CompileError::ImportCycleError {
                        file: file_path.to_path_buf(),
                        import: entry_str.to_string(),
                        cycle,
                    });
                }

                let imported_tree = resolve_imports_inner(
                    session,
                    base_dir,
                    &matched_path,
                    imports,
                    visiting,
                )?;
                let import_key = relative_key(base_dir, &matched_path);
                imports.insert(import_key, imported_tree.clone());
                parts.push(imported_tree);
            }
        }
    }

    parts.push(document);
    visiting.remove(file_path);

    merge_all(&parts)
}

fn paths_equal(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
