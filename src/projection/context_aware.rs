//! Context-aware projection: the stack-key is first reduced to a context
//! prefix via `StackContext` and a `stack_name_pattern`, then used
//! everywhere the legacy mode uses the raw stack-key.
//!
//! Grounded on `pkg/spacelift/spacelift_stack_processor.go`'s
//! `TransformStackConfigToSpaceliftStacks`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::Result;
use crate::projection::context::{context_prefix, StackContext};
use crate::projection::depends_on::resolve_depends_on;
use crate::projection::labels::{apply_template, dedup_preserve_order, string_list};
use crate::projection::types::{ProjectedStack, ProjectionOptions};
use crate::value::Value;

pub fn context_aware_transform(
    stacks: &IndexMap<String, Value>,
    options: &ProjectionOptions,
) -> Result<IndexMap<String, ProjectedStack>> {
    let pattern = options.stack_name_pattern.as_deref();
    let all_projected_names = collect_all_names(stacks, pattern)?;

    let mut result = IndexMap::new();
    for (stack_key, document) in stacks {
        let Some(terraform) = document
            .get_path(&["components", "terraform"])
            .and_then(Value::as_map)
        else {
            continue;
        };

        let imports = if options.process_imports {
            string_list(document, "imports")
        } else {
            Vec::new()
        };

        let component_names: HashSet<String> = terraform
            .keys()
            .map(|name| name.replace('/', "-"))
            .collect();

        for (component, entry) in terraform {
            let settings = entry.section("settings");
            let spacelift = settings.section("spacelift");
            let enabled = spacelift
                .get("workspace_enabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !enabled {
                continue;
            }

            let vars = entry.section("vars");
            let context = StackContext::from_vars(&vars);
            let prefix = context_prefix(stack_key, &context, pattern)?;

            let deps = string_list(entry, "deps");
            let stacks_hint = string_list(entry, "stacks");
            let inheritance = string_list(entry, "inheritance");
            let base_component = entry
                .get("component")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let backend_type = entry.string_section("backend_type");
            let backend = entry.section("backend");

            let workspace = if backend_type == "s3" && base_component.is_empty() {
                prefix.clone()
            } else {
                format!("{prefix}-{component}")
            };
            let workspace = workspace.replace('/', "-");

            let mut labels = Vec::new();
            for v in &imports {
                labels.push(apply_template("import", &options.stack_config_path_template, v));
            }
            for v in &stacks_hint {
                labels.push(apply_template("stack", &options.stack_config_path_template, v));
            }
            for v in &deps {
                labels.push(apply_template("deps", &options.stack_config_path_template, v));
            }
            labels.extend(string_list(&spacelift, "labels"));

            for referent in string_list(&spacelift, "depends_on") {
                let resolved = resolve_depends_on(
                    &referent,
                    &all_projected_names,
                    &prefix,
                    &component_names,
                    component,
                    stack_key,
                )?;
                labels.push(format!("depends-on:{resolved}"));
            }

            labels.push(format!("folder:component/{component}"));
            labels.push(format!("folder:{}", prefix.replace('-', "/")));

            let projected = ProjectedStack {
                enabled,
                component: component.clone(),
                stack: prefix.clone(),
                imports: imports.clone(),
                vars,
                settings: settings.clone(),
                env: entry.section("env"),
                deps,
                stacks: stacks_hint,
                inheritance: Some(inheritance),
                base_component,
                backend_type,
                backend,
                workspace,
                labels: dedup_preserve_order(labels),
            };

            let projected_name = format!("{prefix}-{component}").replace('/', "-");
            result.insert(projected_name, projected);
        }
    }

    Ok(result)
}

fn collect_all_names(
    stacks: &IndexMap<String, Value>,
    pattern: Option<&str>,
) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for (stack_key, document) in stacks {
        let Some(terraform) = document
            .get_path(&["components", "terraform"])
            .and_then(Value::as_map)
        else {
            continue;
        };
        for (component, entry) in terraform {
            let vars = entry.section("vars");
            let context = StackContext::from_vars(&vars);
            let prefix = context_prefix(stack_key, &context, pattern)?;
            names.insert(format!("{prefix}-{component}").replace('/', "-"));
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests;
