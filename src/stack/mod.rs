//! The stack processor and its supporting dependency computation: turns
//! resolved-and-merged root documents into fully materialised
//! per-(stack, component) configuration.

pub mod deps;
pub mod processor;
pub mod types;

pub use processor::{process_roots, CompiledRoot, ProcessFlags};
