use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::commands::{entrypoints_command, modules_command};

#[derive(Parser, Debug)]
#[command(name = "tfgate")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging (written to stderr)")]
pub struct Runner {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List Terraform entrypoints (directories declaring a state backend)
    #[command(visible_alias = "e")]
    Entrypoints(EntrypointsArgs),
    /// Show which local modules every entrypoint uses
    #[command(visible_alias = "m")]
    Modules(DiscoveryArgs),
}

/// Options shared by every discovery command
#[derive(Args, Debug, Clone, Default)]
pub struct DiscoveryArgs {
    /// Directory to search (repeatable, defaults to the current directory)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Deepest directory level to search for entrypoints (-1 for unlimited)
    #[arg(long, allow_negative_numbers = true, value_name = "N")]
    pub max_depth: Option<i64>,

    /// Fail when a module source does not resolve to a local directory
    #[arg(long)]
    pub fail_unresolvable_modules: bool,

    /// Log syntax errors in configuration files instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Output format: json or text
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,
}

impl DiscoveryArgs {
    /// Directories to search, resolved against `cwd`
    pub fn directories(&self, cwd: &Path) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            return vec![cwd.to_path_buf()];
        }
        self.dirs.iter().map(|dir| cwd.join(dir)).collect()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct EntrypointsArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Only list entrypoints affected by changes between two git refs
    #[arg(long, requires_all = ["source_ref", "dest_ref"])]
    pub detect_changes: bool,

    /// Base ref of the comparison (e.g. the pull request target branch)
    #[arg(long, requires = "detect_changes", value_name = "REF")]
    pub source_ref: Option<String>,

    /// Head ref of the comparison (e.g. the pull request head commit)
    #[arg(long, requires = "detect_changes", value_name = "REF")]
    pub dest_ref: Option<String>,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Entrypoints(args) => entrypoints_command(&args),
            Commands::Modules(args) => modules_command(&args),
        }
    }
}
