//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `compile`: resolve imports/inheritance and print the materialised docs
//! - `describe`: print the materialised map (or one component) as JSON
//! - `spacelift-stacks`: run the projection layer and print its output
//! - `init`: write a default `stackforge.yaml`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// If no command was given, print help and return `None`.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Compile(CompileArgs),
    Describe(DescribeArgs),
    SpaceliftStacks(SpaceliftStacksArgs),
    Init,
}

/// Arguments shared by every subcommand that loads stacks.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Root stack files to compile. When omitted, resolved from the
    /// project config's `stacks_glob`.
    pub roots: Vec<PathBuf>,

    /// Base directory imports and globs are resolved against (overrides
    /// the config file).
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Path to a `stackforge.yaml` config file (overrides the
    /// ancestor-directory search).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compute per-component dependency edges (overrides the config file).
    #[arg(long)]
    pub component_deps: bool,

    /// Compute cross-stack dependency edges (overrides the config file).
    #[arg(long)]
    pub stack_deps: bool,

    /// Print a JSON map keyed by stack-key instead of the serialised list.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print only `<type>/<name>`'s materialised view, across all
    /// resolved stacks.
    #[arg(long)]
    pub component: Option<String>,
}

#[derive(Debug, Args)]
pub struct SpaceliftStacksArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Use legacy (stack-key-based) naming instead of context-aware naming.
    #[arg(long)]
    pub legacy: bool,

    /// `{namespace}/{tenant}/{environment}/{stage}/{region}`-token pattern
    /// for context-aware naming (overrides the config file).
    #[arg(long)]
    pub name_pattern: Option<String>,

    /// Format string with one `%s`, used to build `import:`/`stack:`/
    /// `deps:` labels (overrides the config file).
    #[arg(long)]
    pub path_template: Option<String>,

    /// Omit `import:` labels even when imports were processed.
    #[arg(long)]
    pub no_imports: bool,
}
