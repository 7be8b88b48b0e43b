//! Changed-file detection between two git refs

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of changed files between two refs
pub trait DiffSource {
    /// Absolute paths of files added, modified, renamed, copied or deleted
    /// between `source_ref` and `dest_ref`
    fn changed_files(&self, source_ref: &str, dest_ref: &str) -> Result<Vec<PathBuf>>;
}

/// [`DiffSource`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    working_dir: PathBuf,
}

impl GitCli {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Absolute path of the repository containing the working directory
    pub fn toplevel(&self) -> Result<PathBuf> {
        let stdout = self.run(&["rev-parse", "--show-toplevel"])?;
        let toplevel = PathBuf::from(stdout.trim_end());
        std::fs::canonicalize(&toplevel).map_err(|e| Error::io_at(toplevel, e))
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("git {} (in {})", args.join(" "), self.working_dir.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| Error::io_at(&self.working_dir, e))?;

        if !output.status.success() {
            return Err(Error::GitError {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DiffSource for GitCli {
    fn changed_files(&self, source_ref: &str, dest_ref: &str) -> Result<Vec<PathBuf>> {
        let toplevel = self.toplevel()?;
        let stdout = self.run(&[
            "diff",
            "--name-only",
            "--diff-filter=DMARC",
            "-z",
            source_ref,
            dest_ref,
        ])?;

        let files = parse_name_only(&stdout, &toplevel);
        tracing::debug!(
            "{} files changed between {} and {}",
            files.len(),
            source_ref,
            dest_ref
        );
        Ok(files)
    }
}

/// Split NUL-separated `--name-only -z` output into absolute paths
fn parse_name_only(stdout: &str, toplevel: &Path) -> Vec<PathBuf> {
    stdout
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(|name| toplevel.join(name))
        .collect()
}
