//! Shared types for the projection layer.

use indexmap::IndexMap;

use crate::value::{string_seq, Value};

/// Formatting parameters controlling projection.
#[derive(Debug, Clone)]
pub struct ProjectionOptions {
    /// Format string with exactly one `%s` placeholder, used to build the
    /// `import:`/`stack:`/`deps:` labels.
    pub stack_config_path_template: String,
    /// Present only in context-aware mode.
    pub stack_name_pattern: Option<String>,
    pub process_imports: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            stack_config_path_template: "%s".to_string(),
            stack_name_pattern: None,
            process_imports: true,
        }
    }
}

/// One projected-(stack, component) descriptor.
#[derive(Debug, Clone)]
pub struct ProjectedStack {
    pub enabled: bool,
    pub component: String,
    pub stack: String,
    pub imports: Vec<String>,
    pub vars: Value,
    pub settings: Value,
    pub env: Value,
    pub deps: Vec<String>,
    pub stacks: Vec<String>,
    /// Only populated in context-aware mode.
    pub inheritance: Option<Vec<String>>,
    pub base_component: String,
    pub backend_type: String,
    pub backend: Value,
    pub workspace: String,
    pub labels: Vec<String>,
}

impl ProjectedStack {
    pub fn to_value(&self) -> Value {
        let mut m = IndexMap::new();
        m.insert("enabled".to_string(), Value::Bool(self.enabled));
        m.insert("component".to_string(), Value::String(self.component.clone()));
        m.insert("stack".to_string(), Value::String(self.stack.clone()));
        m.insert("imports".to_string(), string_seq(self.imports.clone()));
        m.insert("vars".to_string(), self.vars.clone());
        m.insert("settings".to_string(), self.settings.clone());
        m.insert("env".to_string(), self.env.clone());
        m.insert("deps".to_string(), string_seq(self.deps.clone()));
        m.insert("stacks".to_string(), string_seq(self.stacks.clone()));
        if let Some(inheritance) = &self.inheritance {
            m.insert("inheritance".to_string(), string_seq(inheritance.clone()));
        }
        m.insert(
            "base_component".to_string(),
            Value::String(self.base_component.clone()),
        );
        m.insert(
            "backend_type".to_string(),
            Value::String(self.backend_type.clone()),
        );
        m.insert("backend".to_string(), self.backend.clone());
        m.insert("workspace".to_string(), Value::String(self.workspace.clone()));
        m.insert("labels".to_string(), string_seq(self.labels.clone()));
        Value::Map(m)
    }
}
