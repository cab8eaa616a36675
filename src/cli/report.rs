//! Rendering compiled output to stdout: the serialised-list form, the
//! JSON stack map, and the projection map.

use anyhow::Result;
use colored::Colorize;
use indexmap::IndexMap;

use crate::projection::ProjectedStack;
use crate::value::Value;

/// `stackforge compile` default output: the index-aligned serialised
/// documents, one YAML document per root, separated by `---`.
pub fn print_compile_list(serialised: &[String]) {
    for (index, doc) in serialised.iter().enumerate() {
        if index > 0 {
            println!("---");
        }
        print!("{doc}");
    }
}

/// `stackforge compile --json` / `stackforge describe` output: a JSON map
/// keyed by stack-key.
pub fn print_stacks_json(stacks: &IndexMap<String, Value>) -> Result<()> {
    let json: serde_json::Map<String, serde_json::Value> = stacks
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
        .collect();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// `stackforge describe --component <type>/<name>` output: the
/// materialised view of one component across every resolved stack.
pub fn print_component_json(
    stacks: &IndexMap<String, Value>,
    component_type: &str,
    component: &str,
) -> Result<()> {
    let mut out = serde_json::Map::new();
    for (stack_key, document) in stacks {
        if let Some(entry) = document.get_path(&["components", component_type, component]) {
            out.insert(stack_key.clone(), serde_json::Value::from(entry));
        }
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// `stackforge spacelift-stacks` output.
pub fn print_projection_json(projected: &IndexMap<String, ProjectedStack>) -> Result<()> {
    let json: serde_json::Map<String, serde_json::Value> = projected
        .iter()
        .map(|(name, stack)| (name.clone(), serde_json::Value::from(&stack.to_value())))
        .collect();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub fn print_summary(label: &str, count: usize) {
    eprintln!("{} {label}: {count}", "✓".green());
}
