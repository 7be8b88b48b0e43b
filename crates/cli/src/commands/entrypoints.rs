use anyhow::{Context, Result, anyhow};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tfgate_core::{
    Config, DiffSource, GitCli, changed_directories, get_entrypoint_directories, module_usage,
};
use tracing::{debug, info};

use crate::cli::EntrypointsArgs;
use crate::config::Settings;
use crate::display::render_paths;
use crate::utils::{relative_to, working_directory};

pub fn entrypoints_command(args: &EntrypointsArgs) -> Result<()> {
    let cwd = working_directory()?;
    let config = Config::discover(&cwd).context("failed to load configuration")?;
    let settings = Settings::resolve(&args.discovery, &config)?;

    let git = GitCli::new(&cwd);
    let selected = select_entrypoints(args, &settings, &cwd, &git)?;
    info!("Selected {} entrypoints", selected.len());

    let relative = relative_to(&cwd, &selected)?;
    let output = render_paths(settings.format, &relative)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Absolute entrypoint directories to report, sorted and deduplicated
///
/// Without `--detect-changes` every discovered entrypoint is returned and
/// the module graph is never built.
pub fn select_entrypoints(
    args: &EntrypointsArgs,
    settings: &Settings,
    cwd: &Path,
    diff: &dyn DiffSource,
) -> Result<Vec<PathBuf>> {
    let mut selected = BTreeSet::new();

    if args.detect_changes {
        let source_ref = args
            .source_ref
            .as_deref()
            .ok_or_else(|| anyhow!("--source-ref is required with --detect-changes"))?;
        let dest_ref = args
            .dest_ref
            .as_deref()
            .ok_or_else(|| anyhow!("--dest-ref is required with --detect-changes"))?;

        let files = diff
            .changed_files(source_ref, dest_ref)
            .with_context(|| format!("failed to diff {source_ref} and {dest_ref}"))?;
        let changed = changed_directories(cwd, &files);
        debug!("{} changed directories", changed.len());

        for dir in args.discovery.directories(cwd) {
            let graph = module_usage(&dir, &settings.walk, settings.skip_unresolvable_modules)
                .with_context(|| format!("failed to build module usage for {}", dir.display()))?;
            selected.extend(graph.modified_entrypoints(&changed));
        }
    } else {
        for dir in args.discovery.directories(cwd) {
            let entrypoints = get_entrypoint_directories(&dir, &settings.walk)
                .with_context(|| format!("failed to find entrypoints in {}", dir.display()))?;
            selected.extend(entrypoints.into_iter().map(|e| e.path));
        }
    }

    let mut selected: Vec<_> = selected.into_iter().collect();
    selected.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(selected)
}
