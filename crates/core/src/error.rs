use std::io;
use std::path::PathBuf;

/// Errors that can occur while discovering entrypoints and module usage
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("failed to parse {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("failed to resolve module source {source_ref:?} declared in {}", file.display())]
    UnresolvableModule { file: PathBuf, source_ref: String },

    #[error("{} is not a child of {}", path.display(), base.display())]
    NotAChildPath { path: PathBuf, base: PathBuf },

    #[error("invalid format {value:?}, supported formats are: {}", supported.join(", "))]
    InvalidFormat {
        value: String,
        supported: &'static [&'static str],
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("git {command} failed ({status}): {stderr}")]
    GitError {
        command: String,
        status: String,
        stderr: String,
    },
}

impl Error {
    /// Wrap an I/O failure on `path`, keeping "not found" distinguishable.
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.into(),
                source,
            }
        } else {
            Error::IoError(source)
        }
    }
}

/// Result type alias for tfgate operations
pub type Result<T> = std::result::Result<T, Error>;
