//! Go binding generator for BlueZ D-Bus interface descriptions.
//!
//! The pipeline per interface:
//! 1. Model: `Api` -> `ApiDoc` (see [`ir`])
//! 2. Render: `ApiDoc` -> Go source (see [`render`])
//! 3. Write: one `gen_<Interface>.go` per interface (see [`generator`])
//!
//! [`batch`] runs that pipeline for many interfaces in parallel.

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod ir;
pub mod render;

pub use batch::{BatchReport, CheckReport, FileCheck, FileStatus, TaskFailure, check_all, generate_all};
pub use config::{GeneratorConfig, InterfaceOverride, ModulePaths};
pub use error::GenerateError;
pub use generator::{build_api_doc, generate_api, output_path, render_api};
pub use render::Renderer;
