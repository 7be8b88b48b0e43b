use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Express `path` relative to `base`
///
/// Both paths must be absolute. `base` itself maps to `.`; anything outside
/// `base` is an [`Error::NotAChildPath`].
pub fn child_path(base: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| Error::NotAChildPath {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })?;

    if relative.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(Error::NotAChildPath {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        });
    }

    if relative.as_os_str().is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(relative.to_path_buf())
    }
}
