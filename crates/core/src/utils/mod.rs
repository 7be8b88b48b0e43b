pub mod paths;

pub use paths::child_path;
