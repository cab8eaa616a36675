//! Typed error kinds for the compiler core.
//!
//! The core returns a `CompileError` rather than an opaque `anyhow::Error`
//! because callers (and, in this crate, the CLI) need to branch on *kind* —
//! e.g. to decide whether a failure is retryable or to print a tailored
//! message — not just read a string.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to load '{path}': {source}")]
    LoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid import in '{file}': the file imports itself as '{import}'")]
    SelfImportError { file: PathBuf, import: String },

    #[error(
        "invalid import in '{file}': '{import}' forms a cycle: {}",
        cycle.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> ")
    )]
    ImportCycleError {
        file: PathBuf,
        import: String,
        cycle: Vec<PathBuf>,
    },

    #[error("invalid import in '{file}': no matches found for '{pattern}'")]
    NoImportMatchError { file: PathBuf, pattern: String },

    #[error("structural error at '{}': expected {expected}, found {found}", path.join("."))]
    StructuralError {
        path: Vec<String>,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot merge incompatible types at '{}': {left} vs {right}", path.join("."))]
    MergeTypeError {
        path: Vec<String>,
        left: &'static str,
        right: &'static str,
    },

    #[error(
        "{component_type} component '{component}' in stack '{stack}' declares base component \
         '{base}', but '{base}' is not defined in the stack"
    )]
    MissingBaseError {
        stack: String,
        component_type: String,
        component: String,
        base: String,
    },

    #[error(
        "component '{component}' in stack '{stack}' specifies 'depends_on' dependency \
         '{referent}', but '{referent}' is neither a projected stack nor a component in '{stack}'"
    )]
    UnresolvableDependencyError {
        stack: String,
        component: String,
        referent: String,
    },

    #[error("unresolved placeholder '{{{placeholder}}}' in stack name pattern '{pattern}'")]
    ContextPatternError { pattern: String, placeholder: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;

pub(crate) fn type_name(v: &crate::value::Value) -> &'static str {
    use crate::value::Value;
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Seq(_) => "sequence",
        Value::Map(_) => "mapping",
    }
}
