//! Context-aware stack naming: builds a short, readable stack prefix from a
//! `{namespace}-{tenant}-{environment}-{stage}-{region}`-style pattern.
//!
//! Shaped after `GetContextFromVars`/`GetContextPrefix` conventions; the
//! five field names and `{token}`-style pattern are recovered from their
//! call sites in `spacelift_stack_processor.go`.

use crate::error::{CompileError, Result};
use crate::value::Value;

const CONTEXT_FIELDS: [&str; 5] = ["namespace", "tenant", "environment", "stage", "region"];

/// The `{namespace, tenant, environment, stage, region}` tuple extracted
/// from a component's effective `vars`, used to build a context-aware
/// projected stack name.
#[derive(Debug, Clone, Default)]
pub struct StackContext {
    pub namespace: Option<String>,
    pub tenant: Option<String>,
    pub environment: Option<String>,
    pub stage: Option<String>,
    pub region: Option<String>,
}

impl StackContext {
    /// Reads the five recognised context fields out of a component's
    /// effective `vars`, skipping any that are absent or non-string.
    pub fn from_vars(vars: &Value) -> Self {
        let field = |name: &str| vars.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            namespace: field("namespace"),
            tenant: field("tenant"),
            environment: field("environment"),
            stage: field("stage"),
            region: field("region"),
        }
    }

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "namespace" => self.namespace.as_deref(),
            "tenant" => self.tenant.as_deref(),
            "environment" => self.environment.as_deref(),
            "stage" => self.stage.as_deref(),
            "region" => self.region.as_deref(),
            _ => None,
        }
    }
}

/// Build the context prefix for `stack_key` under `pattern` (e.g.
/// `"{tenant}-{environment}-{stage}"`). Each `{field}` token present in the
/// pattern is substituted with the matching context field; tokens whose
/// field is absent from the context are dropped along with the separators
/// around them, and any resulting empty segment is removed before
/// rejoining on `-`. When `pattern` is `None`, `stack_key` is used verbatim
/// (falls back to legacy naming).
pub fn context_prefix(stack_key: &str, context: &StackContext, pattern: Option<&str>) -> Result<String> {
    let Some(pattern) = pattern else {
        return Ok(stack_key.to_string());
    };

    let mut segments = Vec::new();
    for raw_segment in pattern.split('-') {
        if let Some(field) = raw_segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            if !CONTEXT_FIELDS.contains(&field) {
                return Err(CompileError::ContextPatternError {
                    pattern: pattern.to_string(),
                    placeholder: field.to_string(),
                });
            }
            if let Some(value) = context.get(field) {
                if !value.is_empty() {
                    segments.push(value.to_string());
                }
            }
        } else if !raw_segment.is_empty() {
            segments.push(raw_segment.to_string());
        }
    }

    Ok(segments.join("-"))
}
