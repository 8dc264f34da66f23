//! Batch generation across every interface of every description group.
//!
//! Each interface is an independent task owning exactly one output file, so
//! tasks run in parallel and a failed task never stops the others.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bluegen_common::{Api, ApiGroup};
use rayon::prelude::*;
use tracing::warn;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::generator::{generate_api, output_path, render_api};
use crate::render::Renderer;

/// A generation task that did not complete.
#[derive(Debug)]
pub struct TaskFailure {
    /// Interface the task was generating.
    pub interface: String,
    /// Why it failed.
    pub error: GenerateError,
}

/// Outcome of [`generate_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, sorted by path.
    pub generated: Vec<PathBuf>,
    /// Failed tasks, sorted by interface.
    pub failures: Vec<TaskFailure>,
}

impl BatchReport {
    /// True when every task succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// How a file on disk compares with what would be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Identical to the generated output.
    UpToDate,
    /// Differs from the generated output.
    Stale {
        /// Content currently on disk.
        current: String,
    },
    /// Not generated yet.
    Missing,
}

/// One checked output file.
#[derive(Debug)]
pub struct FileCheck {
    /// Interface the file is generated from.
    pub interface: String,
    /// Output path.
    pub path: PathBuf,
    /// Freshly rendered content.
    pub rendered: String,
    /// Comparison with the file on disk.
    pub status: FileStatus,
}

/// Outcome of [`check_all`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Checked files, sorted by path.
    pub files: Vec<FileCheck>,
    /// Tasks that could not be rendered or read, sorted by interface.
    pub failures: Vec<TaskFailure>,
}

impl CheckReport {
    /// Files that are stale or missing.
    pub fn outdated(&self) -> impl Iterator<Item = &FileCheck> {
        self.files
            .iter()
            .filter(|file| file.status != FileStatus::UpToDate)
    }

    /// True when every file rendered and matches what is on disk.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.outdated().next().is_none()
    }
}

fn tasks(groups: &[ApiGroup]) -> Vec<(&ApiGroup, &Api)> {
    groups
        .iter()
        .flat_map(|group| group.apis.iter().map(move |api| (group, api)))
        .collect()
}

fn failure(api: &Api, error: GenerateError) -> TaskFailure {
    warn!(interface = %api.interface, %error, "Generation task failed.");
    TaskFailure {
        interface: api.interface.clone(),
        error,
    }
}

/// Generate every interface in `groups` under `out_dir`.
pub fn generate_all(
    groups: &[ApiGroup],
    out_dir: &Path,
    config: &GeneratorConfig,
    renderer: &Renderer,
) -> BatchReport {
    let results: Vec<Result<PathBuf, TaskFailure>> = tasks(groups)
        .into_par_iter()
        .map(|(group, api)| {
            let path = output_path(out_dir, group, api);
            generate_api(renderer, &path, api, group, config)
                .map(|()| path)
                .map_err(|error| failure(api, error))
        })
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(path) => report.generated.push(path),
            Err(failure) => report.failures.push(failure),
        }
    }
    report.generated.sort();
    report
        .failures
        .sort_by(|a, b| a.interface.cmp(&b.interface));
    report
}

fn check_one(
    renderer: &Renderer,
    out_dir: &Path,
    group: &ApiGroup,
    api: &Api,
    config: &GeneratorConfig,
) -> Result<FileCheck, GenerateError> {
    let path = output_path(out_dir, group, api);
    let rendered = render_api(renderer, &path, api, group, config)?;

    let status = match fs::read_to_string(&path) {
        Ok(current) if current == rendered => FileStatus::UpToDate,
        Ok(current) => FileStatus::Stale { current },
        Err(err) if err.kind() == ErrorKind::NotFound => FileStatus::Missing,
        Err(source) => return Err(GenerateError::FileRead { path, source }),
    };

    Ok(FileCheck {
        interface: api.interface.clone(),
        path,
        rendered,
        status,
    })
}

/// Render every interface in memory and compare with the files under `out_dir`.
///
/// Nothing is written.
pub fn check_all(
    groups: &[ApiGroup],
    out_dir: &Path,
    config: &GeneratorConfig,
    renderer: &Renderer,
) -> CheckReport {
    let results: Vec<Result<FileCheck, TaskFailure>> = tasks(groups)
        .into_par_iter()
        .map(|(group, api)| {
            check_one(renderer, out_dir, group, api, config).map_err(|error| failure(api, error))
        })
        .collect();

    let mut report = CheckReport::default();
    for result in results {
        match result {
            Ok(file) => report.files.push(file),
            Err(failure) => report.failures.push(failure),
        }
    }
    report.files.sort_by(|a, b| a.path.cmp(&b.path));
    report
        .failures
        .sort_by(|a, b| a.interface.cmp(&b.interface));
    report
}
