//! Command dispatcher: resolves the project configuration, builds a
//! `CompileSession`, and wires each subcommand to the core.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{self, ProjectConfig, CONFIG_FILE_NAME};
use crate::io::fs::{FsDocumentLoader, FsGlobExpander};
use crate::projection::{self, ProjectionOptions};
use crate::session::{CompileSession, GlobExpander};
use crate::stack::ProcessFlags;

use super::args::{Command, CommonArgs, CompileArgs, DescribeArgs, SpaceliftStacksArgs};
use super::exit_status::ExitStatus;
use super::report;

pub fn run(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Compile(args) => compile(args),
        Command::Describe(args) => describe(args),
        Command::SpaceliftStacks(args) => spacelift_stacks(args),
        Command::Init => init(),
    }
}

fn resolve_project(common: &CommonArgs) -> Result<(PathBuf, ProjectConfig)> {
    let search_start = common
        .config
        .as_ref()
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match &common.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => config::load_config(&search_start)?.config,
    };

    let base_path = common
        .base_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.base_path));

    Ok((base_path, config))
}

fn resolve_roots(
    common: &CommonArgs,
    base_path: &Path,
    config: &ProjectConfig,
    expander: &dyn GlobExpander,
) -> Result<Vec<PathBuf>> {
    if !common.roots.is_empty() {
        return Ok(common.roots.clone());
    }

    let mut roots = Vec::new();
    for pattern in &config.stacks_glob {
        let full_pattern = base_path.join(pattern);
        let matches = expander.expand(&full_pattern.to_string_lossy())?;
        roots.extend(matches);
    }
    roots.sort();
    roots.dedup();
    Ok(roots)
}

fn build_session() -> CompileSession {
    CompileSession::new(
        Box::new(FsDocumentLoader::new()),
        Box::new(FsGlobExpander::new()),
    )
}

fn compile(args: CompileArgs) -> Result<ExitStatus> {
    let (base_path, config) = resolve_project(&args.common)?;
    let session = build_session();
    let roots = resolve_roots(&args.common, &base_path, &config, session.expander.as_ref())?;

    let flags = ProcessFlags {
        process_component_deps: args.component_deps || config.process_component_deps,
        process_stack_deps: args.stack_deps || config.process_stack_deps,
    };

    let result = crate::compile(&session, &base_path, &roots, flags)?;

    if args.json {
        report::print_stacks_json(&result.stacks)?;
    } else {
        report::print_compile_list(&result.serialised);
    }
    report::print_summary("stacks compiled", result.stacks.len());
    Ok(ExitStatus::Success)
}

fn describe(args: DescribeArgs) -> Result<ExitStatus> {
    let (base_path, config) = resolve_project(&args.common)?;
    let session = build_session();
    let roots = resolve_roots(&args.common, &base_path, &config, session.expander.as_ref())?;

    let flags = ProcessFlags {
        process_component_deps: config.process_component_deps,
        process_stack_deps: config.process_stack_deps,
    };
    let result = crate::compile(&session, &base_path, &roots, flags)?;

    match args.component {
        Some(spec) => {
            let Some((component_type, component)) = spec.split_once('/') else {
                bail!("--component must be of the form <type>/<name>, got '{spec}'");
            };
            report::print_component_json(&result.stacks, component_type, component)?;
        }
        None => report::print_stacks_json(&result.stacks)?,
    }
    Ok(ExitStatus::Success)
}

fn spacelift_stacks(args: SpaceliftStacksArgs) -> Result<ExitStatus> {
    let (base_path, config) = resolve_project(&args.common)?;
    let session = build_session();
    let roots = resolve_roots(&args.common, &base_path, &config, session.expander.as_ref())?;

    let flags = ProcessFlags {
        process_component_deps: config.process_component_deps,
        process_stack_deps: config.process_stack_deps,
    };
    let result = crate::compile(&session, &base_path, &roots, flags)?;

    let options = ProjectionOptions {
        stack_config_path_template: args
            .path_template
            .unwrap_or(config.stack_config_path_template),
        stack_name_pattern: args.name_pattern.or(config.stack_name_pattern),
        process_imports: !args.no_imports,
    };

    let projected = if args.legacy || options.stack_name_pattern.is_none() {
        projection::legacy_transform(&result.stacks, &options)?
    } else {
        projection::context_aware_transform(&result.stacks, &options)?
    };

    report::print_projection_json(&projected)?;
    report::print_summary("stacks projected", projected.len());
    Ok(ExitStatus::Success)
}

fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }
    fs::write(config_path, config::default_config_yaml()?)?;
    println!("Wrote {}", CONFIG_FILE_NAME);
    Ok(ExitStatus::Success)
}
