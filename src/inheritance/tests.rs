use indexmap::IndexMap;

use crate::value::Value;

use super::*;

fn component(pairs: &[(&str, Value)]) -> Value {
    let mut m = IndexMap::new();
    for (k, v) in pairs {
        m.insert(k.to_string(), v.clone());
    }
    Value::Map(m)
}

fn vars(pairs: &[(&str, &str)]) -> Value {
    let mut m = IndexMap::new();
    for (k, v) in pairs {
        m.insert(k.to_string(), Value::String(v.to_string()));
    }
    Value::Map(m)
}

#[test]
fn self_referencing_base_is_a_no_op() {
    let mut components = IndexMap::new();
    components.insert("vpc".to_string(), component(&[]));
    let state = resolve_base_chain(&components, "prod", "terraform", "vpc", "vpc").unwrap();
    assert!(state.inheritance_chain.is_empty());
    assert_eq!(state.final_base_component_name, None);
}

#[test]
fn self_reference_one_hop_into_the_chain_does_not_recurse_forever() {
    let mut components = IndexMap::new();
    components.insert(
        "vpc-defaults".to_string(),
        component(&[("component", Value::String("network-defaults".into()))]),
    );
    components.insert(
        "network-defaults".to_string(),
        component(&[("component", Value::String("network-defaults".into()))]),
    );

    let state =
        resolve_base_chain(&components, "prod", "terraform", "vpc-defaults", "network-defaults")
            .unwrap();

    // The self-referencing base folds in its own (empty) section and stops;
    // it never contributes a second time under its own name.
    assert_eq!(
        state.inheritance_chain,
        vec!["network-defaults".to_string()]
    );
    assert_eq!(state.command, "");
}

#[test]
fn missing_base_is_an_error() {
    let components: IndexMap<String, Value> = IndexMap::new();
    let err =
        resolve_base_chain(&components, "prod", "terraform", "vpc", "vpc-defaults").unwrap_err();
    assert!(matches!(err, CompileError::MissingBaseError { .. }));
}

#[test]
fn chain_collects_furthest_ancestor_last_nearest_first() {
    let mut components = IndexMap::new();
    components.insert(
        "vpc-defaults".to_string(),
        component(&[
            ("command", Value::String("vpc-defaults-cmd".into())),
            ("component", Value::String("network-defaults".into())),
        ]),
    );
    components.insert(
        "network-defaults".to_string(),
        component(&[("command", Value::String("network-defaults-cmd".into()))]),
    );

    let state =
        resolve_base_chain(&components, "prod", "terraform", "vpc", "vpc-defaults").unwrap();

    assert_eq!(
        state.inheritance_chain,
        vec!["vpc-defaults".to_string(), "network-defaults".to_string()]
    );
    // Nearest non-empty command wins.
    assert_eq!(state.command, "vpc-defaults-cmd");
    // Only the starting point's immediate base is surfaced.
    assert_eq!(
        state.final_base_component_name,
        Some("vpc-defaults".to_string())
    );
}

#[test]
fn command_falls_through_to_furthest_ancestor_when_nearer_bases_are_silent() {
    let mut components = IndexMap::new();
    components.insert(
        "vpc-defaults".to_string(),
        component(&[("component", Value::String("network-defaults".into()))]),
    );
    components.insert(
        "network-defaults".to_string(),
        component(&[("command", Value::String("network-defaults-cmd".into()))]),
    );

    let state =
        resolve_base_chain(&components, "prod", "terraform", "vpc", "vpc-defaults").unwrap();
    assert_eq!(state.command, "network-defaults-cmd");
}

#[test]
fn vars_merge_furthest_first_then_nearer_overrides() {
    let mut components = IndexMap::new();
    components.insert(
        "vpc-defaults".to_string(),
        component(&[
            ("vars", vars(&[("region", "us-east-1")])),
            ("component", Value::String("network-defaults".into())),
        ]),
    );
    components.insert(
        "network-defaults".to_string(),
        component(&[("vars", vars(&[("region", "us-west-2"), ("org", "acme")]))]),
    );

    let state =
        resolve_base_chain(&components, "prod", "terraform", "vpc", "vpc-defaults").unwrap();
    assert_eq!(
        state.vars.get("region").and_then(Value::as_str),
        Some("us-east-1")
    );
    assert_eq!(
        state.vars.get("org").and_then(Value::as_str),
        Some("acme")
    );
}
