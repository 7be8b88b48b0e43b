//! Configuration management for tfgate

mod format;
mod settings;

// Re-export main types
pub use format::OutputFormat;
pub use settings::{CONFIG_FILE_NAME, Config};
