//! Directory walking shared by entrypoint discovery and module graphing

use crate::error::{Error, Result};
use crate::parser::{Parsed, is_config_file};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories that never contain user configuration
const SKIPPED_DIRECTORIES: &[&str] = &[".git", ".terraform"];

/// Options controlling a directory walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest directory level to visit below the root. `None` is unlimited,
    /// `Some(0)` only looks at files directly inside the root.
    pub max_depth: Option<usize>,
    /// Log syntax errors and keep going instead of failing the walk
    pub lenient_parsing: bool,
}

impl WalkOptions {
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn lenient(mut self, lenient_parsing: bool) -> Self {
        self.lenient_parsing = lenient_parsing;
        self
    }
}

/// Resolve the walk root to an absolute, canonical directory
pub(crate) fn canonical_root(root: &Path) -> Result<PathBuf> {
    fs::canonicalize(root).map_err(|e| Error::io_at(root, e))
}

/// All configuration files below `root`, in walk order
///
/// Entries are visited sorted by file name, so the order is stable across
/// runs and platforms. Symbolic links to files are included; symbolic links
/// to directories are not followed.
pub(crate) fn config_files(root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if let Some(depth) = max_depth {
        // Files inside a directory sit one level below it.
        walker = walker.max_depth(depth.saturating_add(1));
    }

    let mut files = Vec::new();
    for entry in walker.into_iter().filter_entry(|e| {
        e.depth() == 0
            || !e.file_type().is_dir()
            || !e
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name))
    }) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io_at(path, io),
                None => Error::IoError(std::io::Error::other(format!(
                    "failed to walk {}",
                    path.display()
                ))),
            }
        })?;

        // Symlinked files are read through the link; symlinked directories
        // are never descended into.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && is_config_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} configuration files under {:?}", files.len(), root);
    Ok(files)
}

/// Apply the strictness policy to a per-file parse result
pub(crate) fn accept<T>(path: &Path, parsed: Parsed<T>, options: &WalkOptions) -> Result<T> {
    if let Some(first) = parsed.diagnostics.first() {
        if !options.lenient_parsing {
            return Err(Error::ParseError {
                path: path.to_path_buf(),
                message: first.to_string(),
            });
        }
        for diagnostic in &parsed.diagnostics {
            tracing::warn!("{}:{}", path.display(), diagnostic);
        }
    }
    Ok(parsed.value)
}
