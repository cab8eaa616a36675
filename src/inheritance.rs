//! The inheritance resolver: walks a component's `component:` base-chain
//! within one component-type map, composing the chain's sections
//! furthest-ancestor-first.
//!
//! Grounded directly on `pkg/stack/stack_processor.go`'s
//! `processBaseComponentConfig`, including its recursion shape (recurse
//! into the base's own base first, then fold this base's sections on top)
//! and its `BaseComponentConfig` accumulator, renamed `BaseChainState` here.

use indexmap::IndexMap;

use crate::error::{CompileError, Result};
use crate::merge::merge2;
use crate::value::Value;

/// Accumulated state from walking a base-component chain.
#[derive(Debug, Clone, Default)]
pub struct BaseChainState {
    pub vars: Value,
    pub settings: Value,
    pub env: Value,
    pub command: String,
    pub backend_type: String,
    pub backend: Value,
    pub remote_state_backend_type: String,
    pub remote_state_backend: Value,
    /// The component's immediate base, i.e. the first base name written.
    /// Only this name is surfaced, regardless of how deep the chain runs.
    pub final_base_component_name: Option<String>,
    /// Nearest base first, furthest ancestor last.
    pub inheritance_chain: Vec<String>,
}

impl BaseChainState {
    fn empty() -> Self {
        Self {
            vars: Value::empty_map(),
            settings: Value::empty_map(),
            env: Value::empty_map(),
            command: String::new(),
            backend_type: String::new(),
            backend: Value::empty_map(),
            remote_state_backend_type: String::new(),
            remote_state_backend: Value::empty_map(),
            final_base_component_name: None,
            inheritance_chain: Vec::new(),
        }
    }
}

/// Resolve the base-component chain for `component`'s declared base
/// `base_component`, within `components` (all components of one type in
/// this stack). A self-referencing base (`component == base_component`) is
/// a no-op.
pub fn resolve_base_chain(
    components: &IndexMap<String, Value>,
    stack: &str,
    component_type: &str,
    component: &str,
    base_component: &str,
) -> Result<BaseChainState> {
    let mut state = BaseChainState::empty();
    if component == base_component {
        return Ok(state);
    }
    fold_base(
        &mut state,
        components,
        stack,
        component_type,
        component,
        base_component,
    )?;
    // Only the starting component's own immediate base is surfaced,
    // regardless of how deep the chain runs.
    state.final_base_component_name = Some(base_component.to_string());
    Ok(state)
}

fn fold_base(
    state: &mut BaseChainState,
    components: &IndexMap<String, Value>,
    stack: &str,
    component_type: &str,
    component: &str,
    base_component: &str,
) -> Result<()> {
    // A base can declare itself as its own base at any depth, not just at
    // the chain's starting component — this guard has to run on every call,
    // not only at `resolve_base_chain`'s entry, or such a base recurses into
    // itself forever.
    if component == base_component {
        return Ok(());
    }

    let Some(base_map) = components.get(base_component) else {
        return Err(CompileError::MissingBaseError {
            stack: stack.to_string(),
            component_type: component_type.to_string(),
            component: component.to_string(),
            base: base_component.to_string(),
        });
    };

    // Recurse into this base's own base first, so the accumulator folds
    // furthest-ancestor-first.
    if let Some(grand_base) = base_map.get("component").and_then(Value::as_str) {
        fold_base(
            state,
            components,
            stack,
            component_type,
            base_component,
            grand_base,
        )?;
    }

    state.vars = merge2(&state.vars, &base_map.section("vars"))?;
    state.settings = merge2(&state.settings, &base_map.section("settings"))?;
    state.env = merge2(&state.env, &base_map.section("env"))?;
    state.backend = merge2(&state.backend, &base_map.section("backend"))?;
    state.remote_state_backend = merge2(
        &state.remote_state_backend,
        &base_map.section("remote_state_backend"),
    )?;

    // Scalars keep the nearest-base value written as recursion unwinds —
    // the recursive call above ran for the *grandparent* first, so this
    // assignment (the nearer base) naturally overwrites it.
    if let Some(cmd) = base_map.get("command").and_then(Value::as_str) {
        if !cmd.is_empty() {
            state.command = cmd.to_string();
        }
    }
    if let Some(bt) = base_map.get("backend_type").and_then(Value::as_str) {
        if !bt.is_empty() {
            state.backend_type = bt.to_string();
        }
    }
    if let Some(rsbt) = base_map
        .get("remote_state_backend_type")
        .and_then(Value::as_str)
    {
        if !rsbt.is_empty() {
            state.remote_state_backend_type = rsbt.to_string();
        }
    }

    state
        .inheritance_chain
        .insert(0, base_component.to_string());

    Ok(())
}

#[cfg(test)]
mod tests;
