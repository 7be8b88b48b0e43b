//! Entrypoint discovery
//!
//! An entrypoint is a directory holding at least one configuration file with
//! a `terraform { backend "..." {} }` declaration.

use crate::error::Result;
use crate::parser::HclParser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::backend::{BackendConfig, extract_backend_config};
use super::walk::{WalkOptions, accept, canonical_root, config_files};

/// A root Terraform configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrypoint {
    /// Absolute directory of the configuration
    pub path: PathBuf,
    /// Absolute path of the file declaring the backend
    pub backend_file: PathBuf,
    pub backend: BackendConfig,
}

/// Find every entrypoint below `root`, sorted by directory path string
///
/// Files are visited in file-name order. When two files in one directory
/// both declare a backend, the one visited last (the lexicographically
/// greater file name) is kept, so the result is the same on every run.
pub fn get_entrypoint_directories(root: &Path, options: &WalkOptions) -> Result<Vec<Entrypoint>> {
    let root = canonical_root(root)?;
    tracing::debug!(
        "get_entrypoint_directories: root={:?}, max_depth={:?}",
        root,
        options.max_depth
    );

    let mut parser = HclParser::new()?;
    let mut by_directory: BTreeMap<PathBuf, Entrypoint> = BTreeMap::new();

    for file in config_files(&root, options.max_depth)? {
        let parsed = extract_backend_config(&mut parser, &file)?;
        let Some(backend) = accept(&file, parsed, options)? else {
            continue;
        };

        let Some(dir) = file.parent().map(Path::to_path_buf) else {
            continue;
        };
        if let Some(previous) = by_directory.get(&dir) {
            tracing::debug!(
                "{} also declares a backend, replacing {}",
                file.display(),
                previous.backend_file.display()
            );
        }
        by_directory.insert(
            dir.clone(),
            Entrypoint {
                path: dir,
                backend_file: file,
                backend,
            },
        );
    }

    tracing::debug!("Found {} entrypoints", by_directory.len());
    let mut entrypoints: Vec<_> = by_directory.into_values().collect();
    entrypoints.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
    Ok(entrypoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    const BACKEND: &str = r#"
terraform {
  backend "gcs" {
    bucket = "state"
    prefix = "p"
  }
}
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn dirs(root: &Path, entrypoints: &[Entrypoint]) -> Vec<String> {
        entrypoints
            .iter()
            .map(|e| e.path.strip_prefix(root).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn test_finds_entrypoints_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        write(&root, "project2/main.tf", BACKEND);
        write(&root, "project1/main.tf", BACKEND);
        write(&root, "project1/variables.tf", "variable \"x\" {}\n");
        write(&root, "modules/a/main.tf", "resource \"null_resource\" \"a\" {}\n");

        let options = WalkOptions::default();
        let first = get_entrypoint_directories(&root, &options).unwrap();
        let second = get_entrypoint_directories(&root, &options).unwrap();

        assert_eq!(dirs(&root, &first), vec!["project1", "project2"]);
        assert_eq!(first, second);
        assert_eq!(first[0].backend_file, root.join("project1/main.tf"));
        assert_eq!(first[0].backend.bucket.as_deref(), Some("state"));
    }

    #[test]
    fn test_no_backend_anywhere_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a/main.tf", "variable \"x\" {}\n");
        write(temp_dir.path(), "b/main.tf", "output \"y\" {\n  value = 1\n}\n");

        let entrypoints =
            get_entrypoint_directories(temp_dir.path(), &WalkOptions::default()).unwrap();
        assert!(entrypoints.is_empty());
    }

    #[test]
    fn test_two_backend_files_in_one_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        write(&root, "project/backend.tf", BACKEND);
        write(&root, "project/main.tf", BACKEND);

        let entrypoints = get_entrypoint_directories(&root, &WalkOptions::default()).unwrap();
        assert_eq!(entrypoints.len(), 1);
        assert_eq!(entrypoints[0].path, root.join("project"));
        assert_eq!(entrypoints[0].backend_file, root.join("project/main.tf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_backend_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        write(&root, "shared/backend.tf.src", BACKEND);
        write(&root, "proj/main.tf", "variable \"x\" {}\n");
        std::os::unix::fs::symlink(
            root.join("shared/backend.tf.src"),
            root.join("proj/backend.tf"),
        )
        .unwrap();

        let entrypoints = get_entrypoint_directories(&root, &WalkOptions::default()).unwrap();
        assert_eq!(dirs(&root, &entrypoints), vec!["proj"]);
        assert_eq!(entrypoints[0].backend_file, root.join("proj/backend.tf"));
    }

    #[test]
    fn test_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        write(&root, "main.tf", BACKEND);
        write(&root, "a/main.tf", BACKEND);
        write(&root, "a/b/main.tf", BACKEND);

        let at = |depth| {
            let options = WalkOptions::default().with_max_depth(depth);
            dirs(&root, &get_entrypoint_directories(&root, &options).unwrap())
        };

        assert_eq!(at(Some(0)), vec![""]);
        assert_eq!(at(Some(1)), vec!["", "a"]);
        assert_eq!(at(Some(2)), vec!["", "a", "a/b"]);
        assert_eq!(at(None), at(Some(2)));
    }

    #[test]
    fn test_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = get_entrypoint_directories(&missing, &WalkOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn test_parse_error_strict_and_lenient() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        write(&root, "good/main.tf", BACKEND);
        write(&root, "bad/main.tf", "module \"x\" {\n  source = \n");

        let strict = get_entrypoint_directories(&root, &WalkOptions::default());
        match strict {
            Err(Error::ParseError { path, .. }) => assert_eq!(path, root.join("bad/main.tf")),
            other => panic!("expected parse error, got {other:?}"),
        }

        let lenient =
            get_entrypoint_directories(&root, &WalkOptions::default().lenient(true)).unwrap();
        assert_eq!(dirs(&root, &lenient), vec!["good"]);
    }
}
