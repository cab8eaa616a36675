//! The stack processor: turns one root stack file into a fully materialised
//! configuration, running one task per root stack file in parallel.
//!
//! Grounded on `pkg/stack/stack_processor.go`'s `ProcessYAMLConfigFiles` for
//! the parallel fan-out and `ProcessConfig` for the per-component backend,
//! workspace, and command precedence rules.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::error::{CompileError, Result};
use crate::import::resolve_imports;
use crate::inheritance::resolve_base_chain;
use crate::io::yaml;
use crate::keys::relative_key;
use crate::merge::{merge2, merge3};
use crate::session::CompileSession;
use crate::stack::deps::compute_deps;
use crate::stack::types::{GlobalSections, MaterialisedComponent, StackDocument};
use crate::value::Value;

const COMPONENT_TYPES: [&str; 2] = ["terraform", "helmfile"];

/// Flags controlling optional, more expensive derivations.
/// `process_component_deps` gates `stack::deps::compute_deps` below.
/// `process_stack_deps` is part of this struct for surface parity with the
/// upstream config/CLI flag it mirrors, but nothing in this crate reads it —
/// cross-stack `deps:` labels in the projection layer are built
/// unconditionally, same as the system this is modeled on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessFlags {
    pub process_component_deps: bool,
    pub process_stack_deps: bool,
}

/// One compiled root: its stack-key, materialised document, and the
/// reference-textual serialisation used for the index-aligned list output.
pub struct CompiledRoot {
    pub stack_key: String,
    pub document: Value,
    pub serialised: String,
}

/// Compile every root in `roots`, one rayon task per root. On the first
/// task error, that error is recorded; every task still runs to completion,
/// and the error is returned once all have finished — no partial result
/// accompanies it.
pub fn process_roots(
    session: &CompileSession,
    base_dir: &Path,
    roots: &[PathBuf],
    flags: ProcessFlags,
) -> Result<Vec<CompiledRoot>> {
    let error: Mutex<Option<CompileError>> = Mutex::new(None);
    let results: Mutex<Vec<Option<CompiledRoot>>> =
        Mutex::new((0..roots.len()).map(|_| None).collect());

    roots.par_iter().enumerate().for_each(|(index, root)| {
        match process_root(session, base_dir, root, flags) {
            Ok(compiled) => results.lock().unwrap()[index] = Some(compiled),
            Err(e) => {
                let mut slot = error.lock().unwrap();
                if slot.is_none() {
                    *slot = Some(e);
                }
            }
        }
    });

    if let Some(e) = error.into_inner().unwrap() {
        return Err(e);
    }

    Ok(results
        .into_inner()
        .unwrap()
        .into_iter()
        .map(|r| r.expect("every slot is filled when no task recorded an error"))
        .collect())
}

fn process_root(
    session: &CompileSession,
    base_dir: &Path,
    root: &Path,
    flags: ProcessFlags,
) -> Result<CompiledRoot> {
    let stack_key = relative_key(base_dir, root);
    let mut imports = HashMap::new();
    let merged = resolve_imports(session, base_dir, root, &mut imports)?;

    let document = materialise(&stack_key, &merged, &imports, flags)?;
    let serialised = yaml::to_string(&document);

    Ok(CompiledRoot {
        stack_key,
        document,
        serialised,
    })
}

fn materialise(
    stack_key: &str,
    merged: &Value,
    imports: &HashMap<String, Value>,
    flags: ProcessFlags,
) -> Result<Value> {
    let globals = GlobalSections::read(merged);

    let mut doc = StackDocument {
        stack_key: stack_key.to_string(),
        terraform: IndexMap::new(),
        helmfile: IndexMap::new(),
        imports: sorted_unique(imports.keys().cloned()),
    };

    for component_type in COMPONENT_TYPES {
        let type_section = globals.type_section(component_type);
        let global_and_type_vars = merge2(&globals.vars, &type_section.section("vars"))?;
        let global_and_type_settings =
            merge2(&globals.settings, &type_section.section("settings"))?;
        let global_and_type_env = merge2(&globals.env, &type_section.section("env"))?;

        let type_components = globals.components.section(component_type);
        let Some(entries) = type_components.as_map() else {
            continue;
        };

        for (name, entry) in entries {
            let materialised = materialise_component(
                stack_key,
                component_type,
                name,
                entry,
                entries,
                &global_and_type_vars,
                &global_and_type_settings,
                &global_and_type_env,
                &globals,
                imports,
                flags,
            )?;

            if component_type == "terraform" {
                doc.terraform.insert(name.clone(), materialised);
            } else {
                doc.helmfile.insert(name.clone(), materialised);
            }
        }
    }

    Ok(doc.to_value())
}

#[allow(clippy::too_many_arguments)]
fn materialise_component(
    stack_key: &str,
    component_type: &str,
    name: &str,
    entry: &Value,
    siblings: &IndexMap<String, Value>,
    global_and_type_vars: &Value,
    global_and_type_settings: &Value,
    global_and_type_env: &Value,
    globals: &GlobalSections,
    imports: &HashMap<String, Value>,
    flags: ProcessFlags,
) -> Result<MaterialisedComponent> {
    let base_component = entry.get("component").and_then(Value::as_str);

    let base_state = match base_component {
        Some(base) => Some(resolve_base_chain(
            siblings,
            stack_key,
            component_type,
            name,
            base,
        )?),
        None => None,
    };

    // Pull everything we need out of `base_state` as owned values up front,
    // so the rest of this function never has to juggle its borrow lifetime.
    let (
        base_vars,
        base_settings,
        base_env,
        base_backend,
        base_remote_state_backend,
        base_command,
        base_backend_type,
        base_remote_state_backend_type,
        inheritance,
        final_base_component_name,
    ) = match base_state {
        Some(s) => (
            s.vars,
            s.settings,
            s.env,
            s.backend,
            s.remote_state_backend,
            s.command,
            s.backend_type,
            s.remote_state_backend_type,
            s.inheritance_chain,
            s.final_base_component_name,
        ),
        None => (
            Value::empty_map(),
            Value::empty_map(),
            Value::empty_map(),
            Value::empty_map(),
            Value::empty_map(),
            String::new(),
            String::new(),
            String::new(),
            Vec::new(),
            None,
        ),
    };

    let vars = merge3(global_and_type_vars, &base_vars, &entry.section("vars"))?;
    let settings = merge3(
        global_and_type_settings,
        &base_settings,
        &entry.section("settings"),
    )?;
    let env = merge3(global_and_type_env, &base_env, &entry.section("env"))?;

    let global_backend_type = globals.type_section(component_type).string_section("backend_type");
    let entry_backend_type = entry.string_section("backend_type");
    let backend_type = last_non_empty(&[
        global_backend_type.as_str(),
        base_backend_type.as_str(),
        entry_backend_type.as_str(),
    ])
    .to_string();

    let global_backend = globals.type_section(component_type).section("backend");
    let merged_backend = merge3(&global_backend, &base_backend, &entry.section("backend"))?;
    let backend = merged_backend.section(&backend_type);
    let backend = if backend_type == "s3" {
        synthesize_workspace_key_prefix(backend, base_component, name)
    } else {
        backend
    };

    let global_remote_state_backend_type = globals
        .type_section(component_type)
        .string_section("remote_state_backend_type");
    let entry_remote_state_backend_type = entry.string_section("remote_state_backend_type");
    let remote_state_backend_type = last_non_empty(&[
        backend_type.as_str(),
        global_remote_state_backend_type.as_str(),
        base_remote_state_backend_type.as_str(),
        entry_remote_state_backend_type.as_str(),
    ])
    .to_string();

    let global_remote_state_backend = globals
        .type_section(component_type)
        .section("remote_state_backend");
    let remote_state_backend_overlay = merge3(
        &global_remote_state_backend,
        &base_remote_state_backend,
        &entry.section("remote_state_backend"),
    )?;
    let remote_state_backend_merged = merge2(&merged_backend, &remote_state_backend_overlay)?;
    let remote_state_backend = remote_state_backend_merged.section(&remote_state_backend_type);

    let default_command = if component_type == "terraform" {
        "terraform"
    } else {
        "helmfile"
    };
    let entry_command = entry.string_section("command");
    let command = last_non_empty(&[default_command, base_command.as_str(), entry_command.as_str()])
        .to_string();

    let deps = if flags.process_component_deps {
        compute_deps(stack_key, component_type, name, base_component, imports)
    } else {
        Vec::new()
    };

    Ok(MaterialisedComponent {
        vars,
        settings,
        env,
        command,
        inheritance,
        deps,
        stacks: entry.section("stacks"),
        component: final_base_component_name,
        backend_type,
        backend,
        remote_state_backend_type,
        remote_state_backend,
    })
}

/// synthesise `workspace_key_prefix` for an s3 backend lacking one, from the
/// base-component name if present, else the component's own name, `/` → `-`.
fn synthesize_workspace_key_prefix(
    mut backend: Value,
    base_component: Option<&str>,
    component: &str,
) -> Value {
    let has_prefix = backend
        .get("workspace_key_prefix")
        .map(|v| !v.is_empty_section())
        .unwrap_or(false);
    if has_prefix {
        return backend;
    }

    let source = base_component.filter(|b| !b.is_empty()).unwrap_or(component);
    let prefix = source.replace('/', "-");

    match backend.as_map_mut() {
        Some(map) => {
            map.insert("workspace_key_prefix".to_string(), Value::String(prefix));
        }
        None => {
            let mut map = IndexMap::new();
            map.insert("workspace_key_prefix".to_string(), Value::String(prefix));
            backend = Value::Map(map);
        }
    }
    backend
}

/// Pick the last non-empty string in `values`, preserving precedence order
/// (rightmost wins); if every value is empty, returns the first (the
/// caller's default).
fn last_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values
        .iter()
        .rev()
        .find(|v| !v.is_empty())
        .copied()
        .unwrap_or_else(|| values.first().copied().unwrap_or(""))
}

fn sorted_unique<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut v: Vec<String> = items.into_iter().collect();
    v.sort();
    v.dedup();
    v
}
