//! Input handling shared by the CLI commands

use std::path::{Path, PathBuf};

use bluegen_common::{ApiGroup, is_description_path, load_api_groups};
use bluegen_core::{GeneratorConfig, Renderer};
use clap::Args;
use tracing::debug;
use walkdir::WalkDir;

/// Arguments common to every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Description file, or a directory searched for .json/.yaml/.yml files
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: PathBuf,
    /// Directory receiving one sub-directory per Go package
    #[arg(long = "out-dir", short = 'o', value_name = "DIR")]
    pub out_dir: PathBuf,
    /// Generator configuration (TOML)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Everything a command needs to run the generator.
#[derive(Debug)]
pub struct Prepared {
    /// Loaded description groups, in file order.
    pub groups: Vec<ApiGroup>,
    /// Generator configuration.
    pub config: GeneratorConfig,
    /// Compiled template.
    pub renderer: Renderer,
}

/// Map a command result to an exit code, printing the error.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// List the description files under `input`, sorted by path.
pub fn collect_description_files(input: &Path) -> Result<Vec<PathBuf>, String> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(format!("Input path not found: {}", input.display()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.map_err(|err| format!("Failed to walk {}: {err}", input.display()))?;
        if entry.file_type().is_file() && is_description_path(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(format!(
            "No description files (.json, .yaml, .yml) found in {}",
            input.display()
        ));
    }
    Ok(files)
}

/// Load every description group reachable from `input`.
pub fn load_groups(input: &Path) -> Result<Vec<ApiGroup>, String> {
    let mut groups = Vec::new();
    for file in collect_description_files(input)? {
        let loaded = load_api_groups(&file)?;
        debug!(file = %file.display(), groups = loaded.len(), "Loaded description file.");
        groups.extend(loaded);
    }
    Ok(groups)
}

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, String> {
    path.map_or_else(
        || Ok(GeneratorConfig::default()),
        |path| GeneratorConfig::load(path).map_err(|err| err.to_string()),
    )
}

/// Load descriptions, configuration and template for a command.
pub fn prepare(args: &InputArgs) -> Result<Prepared, String> {
    let groups = load_groups(&args.input)?;
    let config = load_config(args.config.as_deref())?;
    let renderer = Renderer::new(config.template.as_deref()).map_err(|err| err.to_string())?;

    debug!(
        groups = groups.len(),
        interfaces = groups.iter().map(|group| group.apis.len()).sum::<usize>(),
        out_dir = %args.out_dir.display(),
        "Prepared generator inputs."
    );
    Ok(Prepared {
        groups,
        config,
        renderer,
    })
}
