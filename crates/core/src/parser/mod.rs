//! Terraform configuration parsing using tree-sitter

pub mod blocks;
pub mod hcl_parser;

// Re-export commonly used items
pub use blocks::{BackendBlock, Block, ModuleBlock, TerraformBlock};
pub use hcl_parser::{Diagnostic, HclFile, HclParser, Parsed};

/// File extension of Terraform configuration files
pub const CONFIG_EXTENSION: &str = "tf";

/// Whether `path` names a Terraform configuration file
pub fn is_config_file(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext == CONFIG_EXTENSION)
}
