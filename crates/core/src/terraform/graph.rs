//! Module usage graph
//!
//! Maps every entrypoint to the full set of local modules it uses, directly
//! or through other modules, and every module back to the entrypoints that
//! depend on it.

use crate::error::{Error, Result};
use crate::parser::HclParser;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::entrypoints::get_entrypoint_directories;
use super::modules::{extract_modules, resolve_module_source};
use super::walk::{WalkOptions, accept, canonical_root, config_files};

/// Directory -> module directories it references directly
pub type ModuleReferences = BTreeMap<PathBuf, BTreeSet<PathBuf>>;

/// Bidirectional index between entrypoints and the modules they depend on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleUsageGraph {
    /// Entrypoint directory -> every module directory reachable from it
    pub entrypoint_to_modules: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// Module directory -> every entrypoint directory that reaches it
    pub modules_to_entrypoints: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

/// Collect the local modules referenced by every directory below `root`
///
/// The walk is unbounded in depth. A source that does not resolve to an
/// existing directory is dropped when `skip_unresolvable` is set and is an
/// [`Error::UnresolvableModule`] otherwise. Self references are discarded.
pub fn modules(root: &Path, options: &WalkOptions, skip_unresolvable: bool) -> Result<ModuleReferences> {
    let root = canonical_root(root)?;
    let mut parser = HclParser::new()?;
    let mut references = ModuleReferences::new();

    for file in config_files(&root, None)? {
        let parsed = extract_modules(&mut parser, &file)?;
        let sources = accept(&file, parsed, options)?;

        let Some(dir) = file.parent() else {
            continue;
        };
        let used = references.entry(dir.to_path_buf()).or_default();

        for source in sources {
            match resolve_module_source(dir, &source) {
                Some(module_dir) if module_dir == dir => {
                    tracing::debug!("{} references its own directory, ignoring", file.display());
                }
                Some(module_dir) => {
                    used.insert(module_dir);
                }
                None if skip_unresolvable => {
                    tracing::debug!(
                        "Skipping unresolvable module source {:?} in {}",
                        source,
                        file.display()
                    );
                }
                None => {
                    return Err(Error::UnresolvableModule {
                        file: file.clone(),
                        source_ref: source,
                    });
                }
            }
        }
    }

    tracing::debug!("Collected module references for {} directories", references.len());
    Ok(references)
}

/// Build the module usage graph for the entrypoints below `root`
///
/// `options.max_depth` limits which entrypoints are discovered but not how
/// deep their module chains are followed.
///
/// Module references are only collected from files below `root`. A module
/// outside `root` contributes its own directory to the closure, but the
/// modules it references in turn are not followed.
pub fn module_usage(
    root: &Path,
    options: &WalkOptions,
    skip_unresolvable: bool,
) -> Result<ModuleUsageGraph> {
    let entrypoints = get_entrypoint_directories(root, options)?;
    let references = modules(root, options, skip_unresolvable)?;

    Ok(ModuleUsageGraph::build(
        entrypoints.into_iter().map(|e| e.path),
        &references,
    ))
}

impl ModuleUsageGraph {
    /// Close `references` over each entrypoint and derive the inverse index
    pub fn build(
        entrypoints: impl IntoIterator<Item = PathBuf>,
        references: &ModuleReferences,
    ) -> Self {
        let mut graph = ModuleUsageGraph::default();

        for entrypoint in entrypoints {
            let reachable = reachable_modules(&entrypoint, references);
            for module in &reachable {
                graph
                    .modules_to_entrypoints
                    .entry(module.clone())
                    .or_default()
                    .insert(entrypoint.clone());
            }
            graph.entrypoint_to_modules.insert(entrypoint, reachable);
        }

        graph
    }

    /// Whether `dir` is a known entrypoint
    pub fn is_entrypoint(&self, dir: &Path) -> bool {
        self.entrypoint_to_modules.contains_key(dir)
    }

    /// Entrypoints that depend on the module at `dir`
    pub fn entrypoints_using(&self, dir: &Path) -> impl Iterator<Item = &PathBuf> {
        self.modules_to_entrypoints.get(dir).into_iter().flatten()
    }
}

/// Depth-first walk over module references with a visited set, so cyclic
/// module graphs terminate.
fn reachable_modules(entrypoint: &Path, references: &ModuleReferences) -> BTreeSet<PathBuf> {
    let mut visited = BTreeSet::new();
    let mut stack: Vec<&PathBuf> = references.get(entrypoint).into_iter().flatten().collect();

    while let Some(module) = stack.pop() {
        if module == entrypoint || !visited.insert(module.clone()) {
            continue;
        }
        if let Some(children) = references.get(module) {
            stack.extend(children.iter());
        }
    }

    visited
}
