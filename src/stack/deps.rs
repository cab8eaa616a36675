//! Dependency computation: decides which of a file's imports a given
//! component depends on, so the projection layer can label cross-stack
//! edges.
//!
//! Grounded on `pkg/stack/stack_processor_utils.go`'s
//! `FindComponentDependencies`/`FindComponentsDependencies`.

use std::collections::HashMap;

use crate::value::Value;

/// An import counts as a dependency of `component` (of `component_type`,
/// optionally inheriting from `base_component`) if any of four checks match
/// its tree. These are naturally short-circuit checks run per import; since
/// each only decides membership, evaluating them as an unordered OR yields
/// the same result set.
pub fn compute_deps(
    stack_key: &str,
    component_type: &str,
    component: &str,
    base_component: Option<&str>,
    imports: &HashMap<String, Value>,
) -> Vec<String> {
    let mut deps: Vec<String> = imports
        .iter()
        .filter(|(_, tree)| is_dependency(tree, component_type, component, base_component))
        .map(|(key, _)| key.clone())
        .collect();

    deps.push(stack_key.to_string());
    deps.sort();
    deps.dedup();
    deps
}

fn is_dependency(
    tree: &Value,
    component_type: &str,
    component: &str,
    base_component: Option<&str>,
) -> bool {
    if !tree.section("vars").is_empty_section() {
        return true;
    }
    if !tree.section(component_type).section("vars").is_empty_section() {
        return true;
    }
    if has_non_empty_component_entry(tree, component_type, component) {
        return true;
    }
    if let Some(base) = base_component {
        if !base.is_empty() && has_non_empty_component_entry(tree, component_type, base) {
            return true;
        }
    }
    false
}

fn has_non_empty_component_entry(tree: &Value, component_type: &str, component: &str) -> bool {
    tree.get_path(&["components", component_type, component])
        .map(|v| !v.is_empty_section())
        .unwrap_or(false)
}
