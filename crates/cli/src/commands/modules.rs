use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tfgate_core::{Config, module_usage};
use tracing::info;

use crate::cli::DiscoveryArgs;
use crate::config::Settings;
use crate::display::render_usage;
use crate::utils::{relative_to, working_directory};

pub fn modules_command(args: &DiscoveryArgs) -> Result<()> {
    let cwd = working_directory()?;
    let config = Config::discover(&cwd).context("failed to load configuration")?;
    let settings = Settings::resolve(args, &config)?;

    let usage = collect_usage(args, &settings, &cwd)?;
    info!("Collected module usage for {} entrypoints", usage.len());

    let output = render_usage(settings.format, &usage)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Entrypoint -> modules, relative to `cwd`, merged across all directories
pub fn collect_usage(
    args: &DiscoveryArgs,
    settings: &Settings,
    cwd: &Path,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut usage = BTreeMap::new();

    for dir in args.directories(cwd) {
        let graph = module_usage(&dir, &settings.walk, settings.skip_unresolvable_modules)
            .with_context(|| format!("failed to build module usage for {}", dir.display()))?;

        for (entrypoint, modules) in &graph.entrypoint_to_modules {
            let key = relative_to(cwd, [entrypoint])?.remove(0);
            let mut modules = relative_to(cwd, modules)?;
            modules.sort();
            usage.insert(key, modules);
        }
    }

    Ok(usage)
}
