//! Effective settings: command-line flags layered over `.tfgate.json`

use anyhow::{Result, bail};
use tfgate_core::{Config, OutputFormat, WalkOptions};

use crate::cli::DiscoveryArgs;

/// Settings a discovery command runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub walk: WalkOptions,
    pub skip_unresolvable_modules: bool,
    pub format: OutputFormat,
}

impl Settings {
    /// Merge flags over the config file over built-in defaults
    pub fn resolve(args: &DiscoveryArgs, config: &Config) -> Result<Self> {
        let max_depth = match args.max_depth {
            Some(-1) => None,
            Some(depth) if depth < -1 => {
                bail!("invalid max depth {depth}, use -1 for unlimited")
            }
            Some(depth) => Some(usize::try_from(depth)?),
            None => config.max_depth,
        };

        let fail_unresolvable =
            args.fail_unresolvable_modules || config.fail_unresolvable_modules.unwrap_or(false);
        let lenient = args.lenient || config.lenient_parsing.unwrap_or(false);

        let format = match args.format.as_deref().or(config.format.as_deref()) {
            Some(value) => value.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            walk: WalkOptions::default()
                .with_max_depth(max_depth)
                .lenient(lenient),
            skip_unresolvable_modules: !fail_unresolvable,
            format,
        })
    }
}
