//! Remote state backend detection

use crate::error::Result;
use crate::parser::{HclFile, HclParser, Parsed, TerraformBlock};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Backend types whose bucket/prefix settings are decoded
const GCS_BACKEND: &str = "gcs";

/// A `backend` block declared inside a `terraform` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub backend_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Whether the file at `path` declares a state backend of any type
pub fn has_backend_config(parser: &mut HclParser, path: &Path) -> Result<Parsed<bool>> {
    let file = parser.parse_file(path)?;
    let found = first_backend(&file).is_some();
    Ok(file.parsed(found))
}

/// Extract the backend declared in the file at `path`, if any
///
/// Bucket and prefix are only read for the `gcs` backend; other backend
/// types produce a config with both unset.
pub fn extract_backend_config(
    parser: &mut HclParser,
    path: &Path,
) -> Result<Parsed<Option<BackendConfig>>> {
    let file = parser.parse_file(path)?;
    let config = first_backend(&file);
    Ok(file.parsed(config))
}

fn first_backend(file: &HclFile) -> Option<BackendConfig> {
    file.blocks_of_type("terraform")
        .into_iter()
        .filter_map(TerraformBlock::from_block)
        .flat_map(|terraform| terraform.backends())
        .map(|backend| {
            let backend_type = backend.backend_type();
            if backend_type == GCS_BACKEND {
                BackendConfig {
                    bucket: backend.attribute("bucket"),
                    prefix: backend.attribute("prefix"),
                    backend_type,
                }
            } else {
                BackendConfig {
                    backend_type,
                    ..Default::default()
                }
            }
        })
        .next()
}
