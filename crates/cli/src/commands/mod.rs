pub mod entrypoints;
pub mod modules;

pub use entrypoints::{entrypoints_command, select_entrypoints};
pub use modules::{collect_usage, modules_command};
