use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tfgate_core::child_path;

/// Canonical current working directory
pub fn working_directory() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to get the working directory")?;
    std::fs::canonicalize(&cwd)
        .with_context(|| format!("failed to resolve working directory {}", cwd.display()))
}

/// Express absolute paths relative to `cwd`, as strings
pub fn relative_to<'a>(
    cwd: &Path,
    paths: impl IntoIterator<Item = &'a PathBuf>,
) -> Result<Vec<String>> {
    paths
        .into_iter()
        .map(|path| {
            child_path(cwd, path)
                .map(|relative| relative.display().to_string())
                .context("failed to compute relative path")
        })
        .collect()
}
