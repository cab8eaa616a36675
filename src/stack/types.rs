//! Shared types for the stack processor: the six global sections read off
//! a merged document, and the materialised output shape for one (stack,
//! component-type, component) triple.
//!
//! Grounded on `pkg/stack/stack_processor_utils.go`'s per-stack processing
//! structs (`ProcessStackConfig` et al.), flattened here into plain `Value`
//! trees since the core has no need for the Go types' JSON tags.

use indexmap::IndexMap;

use crate::value::{string_seq, Value};

/// The six top-level "global" sections read off a merged stack document.
pub struct GlobalSections {
    pub vars: Value,
    pub settings: Value,
    pub env: Value,
    pub terraform: Value,
    pub helmfile: Value,
    pub components: Value,
}

impl GlobalSections {
    pub fn read(document: &Value) -> Self {
        Self {
            vars: document.section("vars"),
            settings: document.section("settings"),
            env: document.section("env"),
            terraform: document.section("terraform"),
            helmfile: document.section("helmfile"),
            components: document.section("components"),
        }
    }

    pub fn type_section(&self, component_type: &str) -> &Value {
        match component_type {
            "terraform" => &self.terraform,
            _ => &self.helmfile,
        }
    }
}

/// One materialised (stack, type, component) entry. `backend*` and
/// `remote_state_backend*` are only meaningful for terraform components;
/// helmfile components carry them at their empty defaults and
/// `to_value` omits them.
#[derive(Debug, Clone)]
pub struct MaterialisedComponent {
    pub vars: Value,
    pub settings: Value,
    pub env: Value,
    pub command: String,
    pub inheritance: Vec<String>,
    pub deps: Vec<String>,
    pub stacks: Value,
    pub component: Option<String>,
    pub backend_type: String,
    pub backend: Value,
    pub remote_state_backend_type: String,
    pub remote_state_backend: Value,
}

impl MaterialisedComponent {
    /// Render as the `Value` shape emitted in the materialised document.
    pub fn to_value(&self, component_type: &str) -> Value {
        let mut m = IndexMap::new();
        m.insert("vars".to_string(), self.vars.clone());
        m.insert("settings".to_string(), self.settings.clone());
        m.insert("env".to_string(), self.env.clone());
        m.insert("command".to_string(), Value::String(self.command.clone()));
        m.insert("inheritance".to_string(), string_seq(self.inheritance.clone()));
        m.insert("deps".to_string(), string_seq(self.deps.clone()));
        m.insert("stacks".to_string(), self.stacks.clone());
        if let Some(base) = &self.component {
            m.insert("component".to_string(), Value::String(base.clone()));
        }
        if component_type == "terraform" {
            m.insert(
                "backend_type".to_string(),
                Value::String(self.backend_type.clone()),
            );
            m.insert("backend".to_string(), self.backend.clone());
            m.insert(
                "remote_state_backend_type".to_string(),
                Value::String(self.remote_state_backend_type.clone()),
            );
            m.insert(
                "remote_state_backend".to_string(),
                self.remote_state_backend.clone(),
            );
        }
        Value::Map(m)
    }
}

/// The fully materialised output for one root stack file:
/// `{components: {terraform: {...}, helmfile: {...}}, imports: [...]}`.
#[derive(Debug, Clone)]
pub struct StackDocument {
    pub stack_key: String,
    pub terraform: IndexMap<String, MaterialisedComponent>,
    pub helmfile: IndexMap<String, MaterialisedComponent>,
    pub imports: Vec<String>,
}

impl StackDocument {
    pub fn to_value(&self) -> Value {
        let mut terraform = IndexMap::new();
        for (name, c) in &self.terraform {
            terraform.insert(name.clone(), c.to_value("terraform"));
        }
        let mut helmfile = IndexMap::new();
        for (name, c) in &self.helmfile {
            helmfile.insert(name.clone(), c.to_value("helmfile"));
        }

        let mut components = IndexMap::new();
        components.insert("terraform".to_string(), Value::Map(terraform));
        components.insert("helmfile".to_string(), Value::Map(helmfile));

        let mut root = IndexMap::new();
        root.insert("components".to_string(), Value::Map(components));
        root.insert("imports".to_string(), string_seq(self.imports.clone()));
        Value::Map(root)
    }
}
