//! Legacy projection: projected name and workspace are derived directly
//! from the stack-key, with no context extraction.
//!
//! Grounded on `pkg/spacelift/spacelift_stack_processor.go`'s
//! `LegacyTransformStackConfigToSpaceliftStacks`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::Result;
use crate::projection::depends_on::resolve_depends_on;
use crate::projection::labels::{apply_template, dedup_preserve_order, string_list};
use crate::projection::types::{ProjectedStack, ProjectionOptions};
use crate::value::Value;

/// Project every `workspace_enabled` terraform component across `stacks`
/// into a map keyed by `<stack>-<component>` (`/` normalised to `-`).
pub fn legacy_transform(
    stacks: &IndexMap<String, Value>,
    options: &ProjectionOptions,
) -> Result<IndexMap<String, ProjectedStack>> {
    let all_projected_names = collect_all_names(stacks);

    let mut result = IndexMap::new();
    for (stack_key, document) in stacks {
        let Some(terraform) = document
            .get_path(&["components", "terraform"])
            .and_then(Value::as_map)
        else {
            continue;
        };
        let component_names: HashSet<String> = terraform.keys().cloned().collect();

        let imports = if options.process_imports {
            string_list(document, "imports")
        } else {
            Vec::new()
        };

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

            let deps = string_list(entry, "deps");
            let stacks_hint = string_list(entry, "stacks");
            let base_component = entry
                .get("component")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let backend_type = entry.string_section("backend_type");
            let backend = entry.section("backend");

            let workspace = if backend_type == "s3" && base_component.is_empty() {
                stack_key.clone()
            } else {
                format!("{stack_key}-{component}")
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
                    stack_key,
                    &component_names,
                    component,
                    stack_key,
                )?;
                labels.push(format!("depends-on:{resolved}"));
            }

            labels.push(format!("folder:component/{component}"));
            if let Some((first, second)) = stack_key.split_once('-') {
                labels.push(format!("folder:{first}/{second}"));
            }

            let projected = ProjectedStack {
                enabled,
                component: component.clone(),
                stack: stack_key.clone(),
                imports: imports.clone(),
                vars: entry.section("vars"),
                settings: settings.clone(),
                env: entry.section("env"),
                deps,
                stacks: stacks_hint,
                inheritance: None,
                base_component,
                backend_type,
                backend,
                workspace,
                labels: dedup_preserve_order(labels),
            };

            let projected_name = format!("{stack_key}-{component}").replace('/', "-");
            result.insert(projected_name, projected);
        }
    }

    Ok(result)
}

fn collect_all_names(stacks: &IndexMap<String, Value>) -> HashSet<String> {
    let mut names = HashSet::new();
    for (stack_key, document) in stacks {
        if let Some(terraform) = document
            .get_path(&["components", "terraform"])
            .and_then(Value::as_map)
        {
            for component in terraform.keys() {
                names.insert(format!("{stack_key}-{component}"));
            }
        }
    }
    names
}
