//! Resolves `settings.spacelift.depends_on` entries to a full projected
//! stack name.
//!
//! Grounded on `pkg/spacelift/spacelift_stack_processor.go`'s
//! `buildSpaceliftDependsOnStackName`.

use std::collections::HashSet;

use crate::error::{CompileError, Result};

/// Resolve one `depends_on` referent against the set of all projected
/// stack names and the component names present in the current stack.
pub fn resolve_depends_on(
    referent: &str,
    all_projected_names: &HashSet<String>,
    current_projected_stack: &str,
    component_names_in_current_stack: &HashSet<String>,
    current_component: &str,
    current_stack: &str,
) -> Result<String> {
    if all_projected_names.contains(referent) {
        return Ok(referent.to_string());
    }
    if component_names_in_current_stack.contains(referent) {
        return Ok(format!("{current_projected_stack}-{referent}"));
    }
    Err(CompileError::UnresolvableDependencyError {
        stack: current_stack.to_string(),
        component: current_component.to_string(),
        referent: referent.to_string(),
    })
}
