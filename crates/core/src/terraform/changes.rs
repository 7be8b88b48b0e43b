//! Map changed directories to the entrypoints that need a new plan

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::graph::ModuleUsageGraph;

impl ModuleUsageGraph {
    /// Entrypoints affected by changes in `changed_dirs`, sorted by path
    ///
    /// A changed module pulls in every entrypoint using it, and a changed
    /// entrypoint directory pulls in itself. Directories that are neither
    /// contribute nothing.
    pub fn modified_entrypoints<I, P>(&self, changed_dirs: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut modified = BTreeSet::new();
        for dir in changed_dirs {
            let dir = dir.as_ref();
            modified.extend(self.entrypoints_using(dir).cloned());
            if self.is_entrypoint(dir) {
                modified.insert(dir.to_path_buf());
            }
        }

        tracing::debug!("{} entrypoints affected by changes", modified.len());
        let mut modified: Vec<_> = modified.into_iter().collect();
        modified.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        modified
    }
}

/// Unique absolute parent directories of changed files
///
/// Relative file names are resolved against `repo_root`.
pub fn changed_directories<I, P>(repo_root: &Path, files: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let dirs: BTreeSet<PathBuf> = files
        .into_iter()
        .filter_map(|file| repo_root.join(file.as_ref()).parent().map(Path::to_path_buf))
        .collect();
    dirs.into_iter().collect()
}
