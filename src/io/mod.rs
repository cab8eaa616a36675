//! Concrete, filesystem-backed implementations of the core's I/O traits.
//!
//! Everything in this module is an external collaborator — the core never
//! names `serde_yaml` or `glob` directly, only the traits in
//! `crate::session`.

pub mod fs;
pub mod yaml;
