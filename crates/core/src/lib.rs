//! tfgate-core - Terraform entrypoint discovery for plan/apply pipelines
//!
//! This crate provides functionality to:
//! - Parse Terraform configuration files and detect state backend declarations
//! - Find root configurations ("entrypoints") below a directory
//! - Build a graph of which local modules every entrypoint uses
//! - Translate a set of changed files into the entrypoints that need a new plan
pub mod config;
pub mod error;
pub mod git;
pub mod parser;
pub mod terraform;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use git::{DiffSource, GitCli};
pub use terraform::{
    BackendConfig, Entrypoint, ModuleUsageGraph, WalkOptions, changed_directories,
    get_entrypoint_directories, module_usage,
};
pub use utils::child_path;
