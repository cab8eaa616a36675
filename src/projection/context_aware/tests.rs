use indexmap::IndexMap;

use crate::value::Value;

use super::*;

fn map(pairs: &[(&str, Value)]) -> Value {
    let mut m = IndexMap::new();
    for (k, v) in pairs {
        m.insert(k.to_string(), v.clone());
    }
    Value::Map(m)
}

fn component(tenant: &str, environment: &str, stage: &str) -> Value {
    let spacelift = map(&[("workspace_enabled", Value::Bool(true))]);
    map(&[
        ("settings", map(&[("spacelift", spacelift)])),
        (
            "vars",
            map(&[
                ("tenant", Value::String(tenant.to_string())),
                ("environment", Value::String(environment.to_string())),
                ("stage", Value::String(stage.to_string())),
            ]),
        ),
        ("env", Value::empty_map()),
        ("backend_type", Value::String("s3".to_string())),
        ("backend", Value::empty_map()),
        ("deps", Value::Seq(vec![])),
        ("stacks", Value::Seq(vec![])),
    ])
}

fn stack_with(terraform: &[(&str, Value)]) -> Value {
    let mut terraform_map = IndexMap::new();
    for (name, v) in terraform {
        terraform_map.insert(name.to_string(), v.clone());
    }
    let components = map(&[("terraform", Value::Map(terraform_map))]);
    map(&[("components", components), ("imports", Value::Seq(vec![]))])
}

#[test]
fn projected_name_uses_the_context_prefix_not_the_stack_key() {
    let mut stacks = IndexMap::new();
    stacks.insert(
        "raw-stack-key".to_string(),
        stack_with(&[("vpc", component("core", "ue2", "prod"))]),
    );
    let options = ProjectionOptions {
        stack_name_pattern: Some("{tenant}-{environment}-{stage}".to_string()),
        ..ProjectionOptions::default()
    };
    let result = context_aware_transform(&stacks, &options).unwrap();
    let projected = result.get("core-ue2-prod-vpc").unwrap();
    assert_eq!(projected.stack, "core-ue2-prod");
    assert_eq!(projected.workspace, "core-ue2-prod");
}

#[test]
fn folder_label_replaces_dashes_with_slashes() {
    let mut stacks = IndexMap::new();
    stacks.insert(
        "raw".to_string(),
        stack_with(&[("vpc", component("core", "ue2", "prod"))]),
    );
    let options = ProjectionOptions {
        stack_name_pattern: Some("{tenant}-{environment}-{stage}".to_string()),
        ..ProjectionOptions::default()
    };
    let result = context_aware_transform(&stacks, &options).unwrap();
    let projected = result.get("core-ue2-prod-vpc").unwrap();
    assert!(projected.labels.contains(&"folder:core/ue2/prod".to_string()));
    assert!(projected.labels.contains(&"folder:component/vpc".to_string()));
}

#[test]
fn no_pattern_behaves_like_the_stack_key() {
    let mut stacks = IndexMap::new();
    stacks.insert(
        "prod".to_string(),
        stack_with(&[("vpc", component("core", "ue2", "prod"))]),
    );
    let result = context_aware_transform(&stacks, &ProjectionOptions::default()).unwrap();
    let projected = result.get("prod-vpc").unwrap();
    assert_eq!(projected.stack, "prod");
}
