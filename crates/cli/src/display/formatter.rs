use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tfgate_core::OutputFormat;

/// Render a list of paths: one per line, or a JSON array of strings
pub fn render_paths(format: OutputFormat, paths: &[String]) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(paths).context("failed to serialize paths")
        }
        OutputFormat::Text => Ok(paths.join("\n")),
    }
}

/// Render entrypoint -> modules: a JSON object, or an indented listing
pub fn render_usage(format: OutputFormat, usage: &BTreeMap<String, Vec<String>>) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(usage).context("failed to serialize module usage")
        }
        OutputFormat::Text => {
            let mut lines = Vec::new();
            for (entrypoint, modules) in usage {
                lines.push(entrypoint.clone());
                lines.extend(modules.iter().map(|module| format!("  {module}")));
            }
            Ok(lines.join("\n"))
        }
    }
}
