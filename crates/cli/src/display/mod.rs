pub mod formatter;

pub use formatter::{render_paths, render_usage};
