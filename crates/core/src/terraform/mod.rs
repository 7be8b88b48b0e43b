//! Terraform entrypoint discovery and module usage graph

pub mod backend;
pub mod changes;
pub mod entrypoints;
pub mod graph;
pub mod modules;
pub mod walk;

pub use backend::{BackendConfig, extract_backend_config, has_backend_config};
pub use changes::changed_directories;
pub use entrypoints::{Entrypoint, get_entrypoint_directories};
pub use graph::{ModuleReferences, ModuleUsageGraph, module_usage, modules};
pub use modules::{extract_modules, resolve_module_source};
pub use walk::WalkOptions;
