//! Module `source` extraction and resolution

use crate::error::Result;
use crate::parser::{HclParser, ModuleBlock, Parsed};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect the raw `source` strings of every top-level module block
///
/// Duplicates within a file collapse. Module blocks whose source is missing
/// or not a literal string are skipped.
pub fn extract_modules(parser: &mut HclParser, path: &Path) -> Result<Parsed<BTreeSet<String>>> {
    let file = parser.parse_file(path)?;

    let mut sources = BTreeSet::new();
    for module in file
        .blocks_of_type("module")
        .into_iter()
        .filter_map(ModuleBlock::from_block)
    {
        match module.source() {
            Some(source) => {
                sources.insert(source);
            }
            None => tracing::debug!(
                "module {:?} at {}:{} has no literal source",
                module.name(),
                path.display(),
                module.line()
            ),
        }
    }

    Ok(file.parsed(sources))
}

/// Resolve a module source against the directory of the declaring file
///
/// Returns the canonical directory when the source names an existing local
/// directory. Registry addresses, URLs and typos yield `None`.
pub fn resolve_module_source(dir: &Path, source: &str) -> Option<PathBuf> {
    fs::canonicalize(dir.join(source))
        .ok()
        .filter(|resolved| resolved.is_dir())
}
