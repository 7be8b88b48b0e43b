pub mod workdir;

pub use workdir::{relative_to, working_directory};
